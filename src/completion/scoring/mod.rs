//! 补全评分系统
//!
//! 模糊匹配的评分策略是可替换的，合并与排序逻辑只依赖 `FuzzyScorer`。
//!
//! # 分层
//!
//! ```text
//! 前缀匹配   PREFIX_MATCH_TIER    + 模糊分
//! 子串匹配   SUBSTRING_MATCH_TIER + 模糊分
//! 子序列匹配 0                    + 模糊分
//! ```
//!
//! 模糊分被压缩到 `[0, TIER_SPAN)` 内，所以层级之间不会交叉：
//! 前缀匹配总是高于子串匹配，子串匹配总是高于零散的子序列匹配。
//! 分数量级与时近性加分（最高 20）相当，刚执行过的命令可以胜过较弱的模糊匹配。

pub mod calculator;
pub mod scorers;

pub use calculator::FuzzyScorer;
pub use scorers::{SkimScorer, SubstringScorer};

/// 每个匹配层级占用的分数跨度
pub const TIER_SPAN: i64 = 10;

/// skim 原始分压缩到层级内时的步长
pub const RAW_SCORE_STEP: i64 = 16;

/// 子串匹配层级的基础分
pub const SUBSTRING_MATCH_TIER: i64 = TIER_SPAN;

/// 前缀匹配层级的基础分
pub const PREFIX_MATCH_TIER: i64 = 2 * TIER_SPAN;

/// 将原始模糊分限制在单个层级内
#[inline]
pub fn clamp_fuzzy_score(score: i64) -> i64 {
    score.clamp(0, TIER_SPAN - 1)
}

/// 将 skim 原始分按步长压缩到单个层级内
#[inline]
pub fn scale_raw_score(raw: i64) -> i64 {
    clamp_fuzzy_score(raw / RAW_SCORE_STEP)
}

/// 根据查询与候选的关系返回层级基础分（忽略大小写）
pub fn match_tier(query: &str, candidate: &str) -> i64 {
    let query = query.to_lowercase();
    let candidate = candidate.to_lowercase();

    if candidate.starts_with(&query) {
        PREFIX_MATCH_TIER
    } else if candidate.contains(&query) {
        SUBSTRING_MATCH_TIER
    } else {
        0
    }
}

/// 时近性加分：`round(max_bonus * (size - position) / size)`
///
/// `position` 为距离最近使用端的位置，缓存为空时返回 0。
pub fn recency_bonus(position: usize, size: usize, max_bonus: i64) -> i64 {
    if size == 0 || position >= size {
        return 0;
    }

    let ratio = (size - position) as f64 / size as f64;
    (max_bonus as f64 * ratio).round() as i64
}

//! 补全建议相关的类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 最近使用缓存阶段的候选数量
pub const RECENT_SUGGESTION_LIMIT: usize = 5;

/// 模糊匹配阶段保留的候选数量
pub const FUZZY_SUGGESTION_LIMIT: usize = 15;

/// 最终返回的建议数量上限
pub const MAX_SUGGESTIONS: usize = 10;

/// 时近性加分上限（最近一条命令获得满分）
pub const RECENCY_BONUS_MAX: i64 = 20;

/// 仅历史模式返回的建议数量上限
pub const HISTORY_SUGGESTION_LIMIT: usize = 10;

/// 建议来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// 来自最近使用缓存
    Recent,
    /// 来自词汇表与历史的模糊匹配
    Fuzzy,
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Recent => "recent",
                Self::Fuzzy => "fuzzy",
            }
        )
    }
}

/// 单条补全建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// 建议的完整命令
    pub command: String,

    /// 综合分数（模糊匹配分 + 时近性加分）
    pub score: i64,

    /// 建议来源
    pub source: SuggestionSource,
}

impl Suggestion {
    pub fn new(command: impl Into<String>, score: i64, source: SuggestionSource) -> Self {
        Self {
            command: command.into(),
            score,
            source,
        }
    }
}

/// 建议流程中各阶段的数量预算与加分上限
///
/// 默认值对应 5 / 15 / 10 / 20，可按引擎实例覆盖。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    /// 最近使用阶段的候选数
    pub recent: usize,
    /// 模糊匹配阶段的候选数
    pub fuzzy: usize,
    /// 合并后返回的总数
    pub total: usize,
    /// 时近性加分上限
    pub recency_bonus: i64,
    /// 仅历史模式的返回数
    pub history: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            recent: RECENT_SUGGESTION_LIMIT,
            fuzzy: FUZZY_SUGGESTION_LIMIT,
            total: MAX_SUGGESTIONS,
            recency_bonus: RECENCY_BONUS_MAX,
            history: HISTORY_SUGGESTION_LIMIT,
        }
    }
}

//! 模糊评分接口
//!
//! 定义统一的评分接口，支持不同的模糊匹配算法

/// 模糊评分器
///
/// 返回 `None` 表示候选与查询不匹配；分数越高匹配越好。
/// 实现必须保持单调：前缀匹配 ≥ 连续子串匹配 ≥ 零散子序列匹配。
pub trait FuzzyScorer: Send + Sync {
    /// 计算查询与候选之间的匹配分数
    fn score(&self, query: &str, candidate: &str) -> Option<i64>;

    /// 评分器名称（用于调试和日志）
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// 为闭包实现 FuzzyScorer
///
/// 允许使用简单的函数作为评分器
impl<F> FuzzyScorer for F
where
    F: Fn(&str, &str) -> Option<i64> + Send + Sync,
{
    fn score(&self, query: &str, candidate: &str) -> Option<i64> {
        self(query, candidate)
    }
}

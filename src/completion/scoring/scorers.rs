//! 具体评分器实现

use super::calculator::FuzzyScorer;
use super::{clamp_fuzzy_score, match_tier, scale_raw_score};
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

/// 基于 skim 算法的模糊评分器
///
/// skim 分数衡量子序列的紧凑程度，压缩后叠加前缀/子串层级保证单调性。
pub struct SkimScorer {
    matcher: SkimMatcherV2,
}

impl SkimScorer {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl Default for SkimScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyScorer for SkimScorer {
    fn score(&self, query: &str, candidate: &str) -> Option<i64> {
        let raw = self.matcher.fuzzy_match(candidate, query)?;
        Some(match_tier(query, candidate) + scale_raw_score(raw))
    }

    fn name(&self) -> &'static str {
        "skim"
    }
}

/// 仅匹配连续子串的评分器
///
/// 不做子序列匹配；越短的候选分数越高。
pub struct SubstringScorer;

impl FuzzyScorer for SubstringScorer {
    fn score(&self, query: &str, candidate: &str) -> Option<i64> {
        let tier = match_tier(query, candidate);
        if tier == 0 {
            return None;
        }

        let length_penalty = candidate.chars().count() as i64;
        Some(tier + clamp_fuzzy_score(super::TIER_SPAN - 1 - length_penalty))
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

//! 补全引擎核心模块
//!
//! 组合最近使用缓存、命令历史和词汇表，生成排序后的补全建议

use crate::completion::cache::RecencyCache;
use crate::completion::error::HistoryResult;
use crate::completion::history::HistoryBuffer;
use crate::completion::scoring::{FuzzyScorer, SkimScorer};
use crate::completion::types::{Suggestion, SuggestionLimits, SuggestionSource};
use crate::completion::vocabulary::VocabularySource;
use crate::config::TerminalConfig;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 受锁保护的可变状态
struct EngineState {
    history: HistoryBuffer,
    cache: RecencyCache,
}

/// 某一时刻的只读状态副本
///
/// 评分在副本上进行，不持有引擎的锁。
#[derive(Debug, Clone)]
pub struct SuggestionSnapshot {
    /// 最近使用缓存
    pub cache: RecencyCache,
    /// 从旧到新的历史
    pub history: Vec<String>,
}

/// 补全建议引擎
pub struct SuggestionEngine {
    state: Mutex<EngineState>,
    vocabulary: VocabularySource,
    scorer: Arc<dyn FuzzyScorer>,
    limits: SuggestionLimits,
}

impl SuggestionEngine {
    /// 根据配置创建引擎（不读取历史文件）
    pub fn new(config: &TerminalConfig) -> Self {
        let mut history = HistoryBuffer::new(config.history_size);
        if let Some(path) = config.history_path() {
            history = history.with_path(path);
        }

        Self {
            state: Mutex::new(EngineState {
                history,
                cache: RecencyCache::new(config.lru_cache_size),
            }),
            vocabulary: VocabularySource::with_allowed(&config.allowed_commands),
            scorer: Arc::new(SkimScorer::new()),
            limits: SuggestionLimits::default(),
        }
    }

    /// 创建引擎并加载历史文件
    ///
    /// 读取失败只记录警告，引擎以空历史启动。
    pub async fn with_persisted_history(config: &TerminalConfig) -> Self {
        let engine = Self::new(config);

        match engine.load_history().await {
            Ok(count) => info!("补全引擎初始化完成，加载历史 {} 条", count),
            Err(e) => warn!("加载历史失败，使用空历史: {}", e),
        }

        engine
    }

    /// 替换模糊评分器
    pub fn with_scorer(mut self, scorer: impl FuzzyScorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    /// 替换数量预算
    pub fn with_limits(mut self, limits: SuggestionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// 按新配置构建一个新引擎
    ///
    /// 保留当前的历史和最近使用顺序（按新容量截断），评分器与预算沿用。
    pub fn reconfigured(&self, config: &TerminalConfig) -> Self {
        let snapshot = self.snapshot();
        let engine = Self::new(config);

        {
            let mut state = engine.state.lock();
            state.history.replace_entries(snapshot.history);
            state.cache = RecencyCache::from_recent_first(
                config.lru_cache_size,
                snapshot.cache.iter().map(str::to_string),
            );
        }

        Self {
            scorer: Arc::clone(&self.scorer),
            limits: self.limits,
            ..engine
        }
    }

    /// 记录一条已执行的命令
    ///
    /// 被历史接受时同时更新最近使用缓存。返回命令是否被接受。
    pub fn record(&self, line: &str) -> bool {
        let mut state = self.state.lock();

        if !state.history.add(line) {
            return false;
        }

        state.cache.put(line.trim());
        true
    }

    /// 获取当前状态的只读副本
    pub fn snapshot(&self) -> SuggestionSnapshot {
        let state = self.state.lock();

        SuggestionSnapshot {
            cache: state.cache.clone(),
            history: state.history.snapshot(),
        }
    }

    /// 获取补全建议
    ///
    /// 1. 最近使用缓存中包含输入的命令（最多 `limits.recent` 条）
    /// 2. 词汇表 ∪ 历史，去掉第 1 步已选的命令，模糊匹配后保留前 `limits.fuzzy` 条
    /// 3. 两部分按顺序拼接并截断到 `limits.total`
    /// 4. 综合分 = 模糊分 + 时近性加分，稳定排序（同分保持拼接顺序）
    ///
    /// 只含空白的输入与空输入一样，直接返回空列表。
    pub fn suggest(&self, prefix: &str) -> Vec<Suggestion> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }

        let start_time = Instant::now();
        let snapshot = self.snapshot();
        let suggestions = self.rank(prefix, &snapshot);

        debug!(
            "补全汇总: prefix='{}', scorer={}, items={}, elapsed={:?}",
            prefix,
            self.scorer.name(),
            suggestions.len(),
            start_time.elapsed()
        );

        suggestions
    }

    /// 在给定的状态副本上计算建议，空白输入返回空列表
    pub fn rank(&self, prefix: &str, snapshot: &SuggestionSnapshot) -> Vec<Suggestion> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }

        let limits = &self.limits;

        // 最近使用阶段
        let recent: Vec<&str> = snapshot.cache.suggestions(prefix, limits.recent).collect();
        let excluded: HashSet<&str> = recent.iter().copied().collect();

        // 候选池：词汇表 ∪ 历史，去重并排除最近使用阶段的结果
        let mut seen = HashSet::new();
        let pool = self
            .vocabulary
            .iter()
            .chain(snapshot.history.iter().map(String::as_str))
            .filter(|command| !excluded.contains(command) && seen.insert(*command));

        // 模糊匹配阶段
        let mut fuzzy: Vec<(&str, i64)> = pool
            .filter_map(|command| {
                self.scorer
                    .score(prefix, command)
                    .map(|score| (command, score))
            })
            .collect();
        fuzzy.sort_by(|a, b| b.1.cmp(&a.1));
        fuzzy.truncate(limits.fuzzy);

        // 合并，最近使用的在前
        let mut merged: Vec<Suggestion> = recent
            .into_iter()
            .map(|command| Suggestion::new(command, 0, SuggestionSource::Recent))
            .chain(
                fuzzy
                    .into_iter()
                    .map(|(command, score)| Suggestion::new(command, score, SuggestionSource::Fuzzy)),
            )
            .take(limits.total)
            .collect();

        // 综合评分
        for suggestion in &mut merged {
            suggestion.score += snapshot
                .cache
                .recency_bonus(&suggestion.command, limits.recency_bonus);
        }

        merged.sort_by(|a, b| b.score.cmp(&a.score));
        merged
    }

    /// 仅基于历史的模糊召回
    ///
    /// 忽略大小写，去重，同分时较新的命令在前。空白输入返回空列表。
    pub fn suggest_history(&self, prefix: &str) -> Vec<String> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }

        let history = self.state.lock().history.snapshot();

        let mut seen = HashSet::new();
        let mut matches: Vec<(&str, i64)> = history
            .iter()
            .rev()
            .map(String::as_str)
            .filter(|command| seen.insert(*command))
            .filter_map(|command| {
                self.scorer
                    .score(prefix, command)
                    .map(|score| (command, score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1));
        matches
            .into_iter()
            .take(self.limits.history)
            .map(|(command, _)| command.to_string())
            .collect()
    }

    /// 从历史文件重新加载历史
    ///
    /// 文件读取在锁外完成，读取成功后一次性替换。
    pub async fn load_history(&self) -> HistoryResult<usize> {
        let (path, capacity) = {
            let state = self.state.lock();
            (
                state.history.path().map(|p| p.to_path_buf()),
                state.history.capacity(),
            )
        };

        let Some(path) = path else {
            return Ok(0);
        };

        let entries = HistoryBuffer::read_history_file(&path, capacity).await?;
        let count = entries.len();
        self.state.lock().history.replace_entries(entries);

        Ok(count)
    }

    /// 保存历史到文件，未配置路径时什么也不做
    ///
    /// 写入失败返回错误，内存中的历史不受影响。
    pub async fn save_history(&self) -> HistoryResult<()> {
        let (path, entries) = {
            let state = self.state.lock();
            (
                state.history.path().map(|p| p.to_path_buf()),
                state.history.snapshot(),
            )
        };

        match path {
            Some(path) => HistoryBuffer::write_history_file(&path, &entries).await,
            None => Ok(()),
        }
    }

    /// 从旧到新的历史副本
    pub fn history(&self) -> Vec<String> {
        self.state.lock().history.snapshot()
    }

    /// 最近使用的命令（最近的在前）
    pub fn recent_commands(&self) -> Vec<String> {
        self.state.lock().cache.iter().map(str::to_string).collect()
    }

    pub fn vocabulary(&self) -> &VocabularySource {
        &self.vocabulary
    }

    pub fn limits(&self) -> SuggestionLimits {
        self.limits
    }

    /// 获取引擎统计信息
    pub fn stats(&self) -> EngineStats {
        let state = self.state.lock();

        EngineStats {
            vocabulary_size: self.vocabulary.len(),
            history_len: state.history.len(),
            history_capacity: state.history.capacity(),
            cache_len: state.cache.len(),
            cache_capacity: state.cache.capacity(),
            scorer: self.scorer.name(),
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(&TerminalConfig {
            history_file: String::new(),
            ..TerminalConfig::default()
        })
    }
}

/// 引擎统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStats {
    pub vocabulary_size: usize,
    pub history_len: usize,
    pub history_capacity: usize,
    pub cache_len: usize,
    pub cache_capacity: usize,
    pub scorer: &'static str,
}

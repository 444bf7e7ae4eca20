//! 最近使用命令缓存
//!
//! 记录最近执行过的命令，容量固定，满了以后淘汰最久未使用的命令

use crate::completion::scoring::recency_bonus;
use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::debug;

/// 默认缓存容量
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// 最近使用命令缓存
///
/// 内部是带索引的双向链表，头部是最近使用的命令。
/// `put` 和淘汰都是 O(1)。
pub struct RecencyCache {
    entries: LruCache<String, ()>,
}

impl RecencyCache {
    /// 创建新的缓存，容量为 0 时按 1 处理
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or_else(|| {
            debug!("缓存容量为0，使用最小容量1");
            NonZeroUsize::MIN
        });

        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// 按“最近优先”的顺序重建缓存
    pub fn from_recent_first<I>(capacity: usize, commands: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut cache = Self::new(capacity);
        let commands: Vec<String> = commands.into_iter().collect();

        // 从最旧的开始插入，最后插入的位于头部
        for command in commands.into_iter().rev() {
            cache.put(&command);
        }

        cache
    }

    /// 记录一次命令使用
    ///
    /// 已存在的命令移动到头部，大小不变；否则在满时先淘汰尾部再插入。
    pub fn put(&mut self, command: &str) {
        if self.entries.get(command).is_some() {
            return;
        }

        if let Some((evicted, _)) = self.entries.push(command.to_string(), ()) {
            debug!("缓存已满，淘汰命令: {}", evicted);
        }
    }

    /// 从最近到最久扫描，返回包含 `prefix` 的命令（忽略大小写）
    ///
    /// 每次调用都是新的惰性迭代器，不会修改缓存顺序。
    pub fn suggestions<'a>(
        &'a self,
        prefix: &str,
        limit: usize,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let needle = prefix.to_lowercase();

        self.iter()
            .filter(move |command| command.to_lowercase().contains(&needle))
            .take(limit)
    }

    /// 命令距离头部的位置，0 表示最近使用
    pub fn position(&self, command: &str) -> Option<usize> {
        if !self.entries.contains(command) {
            return None;
        }

        self.iter().position(|cached| cached == command)
    }

    /// 计算命令的时近性加分，不在缓存中返回 0
    pub fn recency_bonus(&self, command: &str, max_bonus: i64) -> i64 {
        self.position(command)
            .map(|position| recency_bonus(position, self.len(), max_bonus))
            .unwrap_or(0)
    }

    /// 按最近优先的顺序遍历命令
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(command, _)| command.as_str())
    }

    /// 当前缓存的命令数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 缓存容量
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Clone for RecencyCache {
    fn clone(&self) -> Self {
        Self::from_recent_first(self.capacity(), self.iter().map(str::to_string))
    }
}

impl std::fmt::Debug for RecencyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyCache")
            .field("capacity", &self.capacity())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for RecencyCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

//! 命令历史缓冲区
//!
//! 固定容量的环形缓冲区，按执行顺序保存命令，可选地持久化到纯文本文件。
//! 文件格式：每行一条命令，最旧的在前，保存时整体覆盖。

use crate::completion::error::{HistoryError, HistoryResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// 缓冲区允许的最小容量
pub const MIN_HISTORY_CAPACITY: usize = 1;

/// 命令历史缓冲区
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    /// 环形存储，未满时按顺序追加
    entries: Vec<String>,
    /// 缓冲区满后下一次覆盖的位置（也是最旧条目的位置）
    write_cursor: usize,
    /// 最大条目数
    capacity: usize,
    /// 历史文件路径
    path: Option<PathBuf>,
}

impl HistoryBuffer {
    /// 创建新的历史缓冲区
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_HISTORY_CAPACITY);

        Self {
            entries: Vec::with_capacity(capacity.min(1024)),
            write_cursor: 0,
            capacity,
            path: None,
        }
    }

    /// 设置历史文件路径
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 添加一条命令
    ///
    /// 空命令和与最近一条相同的命令会被忽略。返回命令是否被接受。
    pub fn add(&mut self, command: &str) -> bool {
        let command = command.trim();
        if command.is_empty() {
            return false;
        }

        if self.last() == Some(command) {
            debug!("忽略连续重复的命令: {}", command);
            return false;
        }

        if self.entries.len() < self.capacity {
            self.entries.push(command.to_string());
        } else {
            self.entries[self.write_cursor] = command.to_string();
            self.write_cursor = (self.write_cursor + 1) % self.capacity;
        }

        true
    }

    /// 最近添加的命令
    pub fn last(&self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        let index = (self.write_cursor + self.entries.len() - 1) % self.entries.len();
        Some(self.entries[index].as_str())
    }

    /// 按从旧到新的顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let (newer, older) = self.entries.split_at(self.write_cursor);
        older.iter().chain(newer.iter()).map(String::as_str)
    }

    /// 从旧到新的完整历史副本
    pub fn snapshot(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// 用给定的命令替换全部历史，只保留最新的 `capacity` 条
    pub fn replace_entries(&mut self, mut entries: Vec<String>) {
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }

        self.entries = entries;
        self.write_cursor = 0;
    }

    /// 清空历史
    pub fn clear(&mut self) {
        self.entries.clear();
        self.write_cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 历史文件路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 从历史文件加载，返回加载的条目数
    ///
    /// 文件不存在不算错误，历史保持为空。
    pub async fn load_from_disk(&mut self) -> HistoryResult<usize> {
        let Some(path) = self.path.clone() else {
            return Ok(0);
        };

        let entries = Self::read_history_file(&path, self.capacity).await?;
        let count = entries.len();
        self.replace_entries(entries);

        Ok(count)
    }

    /// 保存到历史文件，未配置路径时什么也不做
    pub async fn save_to_disk(&self) -> HistoryResult<()> {
        match &self.path {
            Some(path) => Self::write_history_file(path, &self.snapshot()).await,
            None => Ok(()),
        }
    }

    /// 读取历史文件并解析，只保留最新的 `capacity` 条
    pub async fn read_history_file(path: &Path, capacity: usize) -> HistoryResult<Vec<String>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("未找到历史文件，使用空历史: {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!("读取历史文件失败 {}: {}", path.display(), e);
                return Err(HistoryError::io("reading history file", path, e));
            }
        };

        let mut entries = parse_history_content(&content);
        let capacity = capacity.max(MIN_HISTORY_CAPACITY);
        if entries.len() > capacity {
            entries.drain(..entries.len() - capacity);
        }

        debug!("从 {} 加载了 {} 条历史", path.display(), entries.len());
        Ok(entries)
    }

    /// 以从旧到新的顺序整体覆盖写入历史文件
    pub async fn write_history_file(path: &Path, entries: &[String]) -> HistoryResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    warn!("创建历史目录失败 {}: {}", parent.display(), e);
                    HistoryError::io("creating history directory", parent, e)
                })?;
            }
        }

        let content = entries.join("\n");
        fs::write(path, content).await.map_err(|e| {
            warn!("保存历史失败 {}: {}", path.display(), e);
            HistoryError::io("writing history file", path, e)
        })?;

        debug!("保存了 {} 条历史到 {}", entries.len(), path.display());
        Ok(())
    }
}

/// 解析历史文件内容：逐行去除首尾空白，丢弃空行
pub fn parse_history_content(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/*!
 * 配置数据类型定义
 *
 * 结构与 TOML 配置文件格式保持一致，缺失的字段使用默认值。
 */

use crate::config::defaults::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PTY_";

/// 终端与补全配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalConfig {
    /// 命令提示符
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// 历史缓冲区容量
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// 历史文件路径，空字符串表示不持久化
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// 最近使用缓存容量
    #[serde(default = "default_lru_cache_size")]
    pub lru_cache_size: usize,

    /// 额外允许的命令，加入补全词汇表
    #[serde(default)]
    pub allowed_commands: Vec<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        create_default_config()
    }
}

impl TerminalConfig {
    /// 修正不合理的配置值
    ///
    /// - 历史容量低于下限时提升到 `MIN_HISTORY_SIZE`
    /// - 缓存容量为 0 时使用默认值
    /// - 相对的历史文件路径解析到用户主目录下
    /// - 去掉空白的允许命令
    pub fn normalized(mut self) -> Self {
        if self.history_size < MIN_HISTORY_SIZE {
            debug!(
                "历史容量 {} 低于下限，使用 {}",
                self.history_size, MIN_HISTORY_SIZE
            );
            self.history_size = MIN_HISTORY_SIZE;
        }

        if self.lru_cache_size == 0 {
            self.lru_cache_size = DEFAULT_LRU_CACHE_SIZE;
        }

        let history_file = self.history_file.trim();
        if !history_file.is_empty() && !Path::new(history_file).is_absolute() {
            match dirs::home_dir() {
                Some(home) => {
                    self.history_file = home.join(history_file).to_string_lossy().into_owned();
                }
                None => warn!("无法获取用户主目录，历史文件保持相对路径: {}", history_file),
            }
        }

        self.allowed_commands = self
            .allowed_commands
            .into_iter()
            .map(|command| command.trim().to_string())
            .filter(|command| !command.is_empty())
            .collect();

        self
    }

    /// 应用 `PTY_` 前缀的环境变量覆盖
    ///
    /// 支持 `PTY_HISTORY_SIZE`、`PTY_HISTORY_FILE`、`PTY_LRU_CACHE_SIZE`
    /// 和逗号分隔的 `PTY_ALLOWED_COMMANDS`。
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        if let Some(value) = var("PROMPT") {
            self.prompt = value;
        }

        if let Some(value) = var("HISTORY_SIZE") {
            match value.trim().parse() {
                Ok(size) => self.history_size = size,
                Err(e) => warn!("忽略无效的 {}HISTORY_SIZE={}: {}", ENV_PREFIX, value, e),
            }
        }

        if let Some(value) = var("HISTORY_FILE") {
            self.history_file = value;
        }

        if let Some(value) = var("LRU_CACHE_SIZE") {
            match value.trim().parse() {
                Ok(size) => self.lru_cache_size = size,
                Err(e) => warn!("忽略无效的 {}LRU_CACHE_SIZE={}: {}", ENV_PREFIX, value, e),
            }
        }

        if let Some(value) = var("ALLOWED_COMMANDS") {
            self.allowed_commands = if value.is_empty() {
                Vec::new()
            } else {
                value.split(',').map(str::to_string).collect()
            };
        }
    }

    /// 历史文件路径，未配置时返回 None
    pub fn history_path(&self) -> Option<PathBuf> {
        let path = self.history_file.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

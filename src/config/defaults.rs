/*!
 * 配置系统默认值
 *
 * 提供所有配置项的默认值和下限。
 */

use crate::config::types::TerminalConfig;

/// 默认提示符
pub const DEFAULT_PROMPT: &str = "> ";

/// 默认历史条数
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// 历史条数下限，低于此值会被提升
pub const MIN_HISTORY_SIZE: usize = 100;

/// 默认历史文件（相对路径会解析到用户主目录下）
pub const DEFAULT_HISTORY_FILE: &str = ".pty_history";

/// 默认最近使用缓存容量
pub const DEFAULT_LRU_CACHE_SIZE: usize = 100;

/// 创建默认配置
pub fn create_default_config() -> TerminalConfig {
    TerminalConfig {
        prompt: default_prompt(),
        history_size: default_history_size(),
        history_file: default_history_file(),
        lru_cache_size: default_lru_cache_size(),
        allowed_commands: Vec::new(),
    }
}

pub(crate) fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

pub(crate) fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

pub(crate) fn default_history_file() -> String {
    DEFAULT_HISTORY_FILE.to_string()
}

pub(crate) fn default_lru_cache_size() -> usize {
    DEFAULT_LRU_CACHE_SIZE
}

//! 终端命令补全模块
//!
//! 提供命令建议功能，包括：
//! - 最近使用命令缓存
//! - 命令历史（环形缓冲区，可持久化）
//! - 内置与配置命令词汇表
//! - 模糊匹配与时近性综合排序
//! - 命令参数补全

pub mod cache;
pub mod engine;
pub mod error;
pub mod history;
pub mod metadata;
pub mod scoring;
pub mod types;
pub mod vocabulary;

pub use cache::*;
pub use engine::*;
pub use error::*;
pub use history::*;
pub use metadata::{ArgumentCompleter, CommandSpec};
pub use scoring::{FuzzyScorer, SkimScorer, SubstringScorer};
pub use types::*;
pub use vocabulary::*;

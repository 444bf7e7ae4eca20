//! termsuggest 命令建议库
//!
//! 交互式终端前端的补全核心：根据输入片段、命令历史和配置的命令集
//! 生成排序后的补全建议。
//! 主要功能包括：
//! - 最近使用缓存与环形历史
//! - 模糊匹配与时近性综合排序
//! - 基于 TOML 的配置

pub mod completion; // 命令补全功能模块
pub mod config; // 配置模块
pub mod utils; // 工具和错误处理模块

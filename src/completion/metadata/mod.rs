//! 命令参数元数据模块
//!
//! 以命令树描述已知命令的子命令、选项和文件参数，用于补全命令头之后的参数
//!

pub mod builtin;
pub mod command_spec;
pub mod completer;

pub use command_spec::CommandSpec;
pub use completer::ArgumentCompleter;

/*!
 * 配置模块
 *
 * 基于 TOML 的终端配置：默认值、环境变量覆盖与取值修正。
 * 配置是显式传入引擎的值对象，重新加载即重新构建引擎。
 */

pub mod defaults;
pub mod error;
pub mod reader;
pub mod types;

pub use defaults::*;
pub use error::{ConfigError, ConfigResult};
pub use reader::{parse_toml_content, ConfigReader};
pub use types::*;

/// 应用目录名
pub const APP_DIR_NAME: &str = "termsuggest";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.toml";

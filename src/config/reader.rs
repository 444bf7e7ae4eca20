/*!
 * TOML配置读取器
 *
 * 负责从文件系统读取和解析TOML配置文件
 */

use crate::config::{
    defaults::create_default_config,
    error::{ConfigError, ConfigResult},
    types::TerminalConfig,
    APP_DIR_NAME, CONFIG_FILE_NAME,
};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// TOML配置读取器
pub struct ConfigReader {
    /// 显式指定的配置文件
    explicit_path: Option<PathBuf>,
}

impl ConfigReader {
    /// 创建新的配置读取器，未指定路径时使用默认位置
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// 默认配置文件路径：`<config_dir>/termsuggest/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认位置不存在时返回默认配置。
    /// 读取后依次应用环境变量覆盖和取值修正。
    pub async fn load_config(&self) -> ConfigResult<TerminalConfig> {
        let mut config = match &self.explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.clone()));
                }
                Self::read_config_file(path).await?
            }
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::read_config_file(&path).await?,
                None => {
                    info!("未找到配置文件，使用默认配置");
                    create_default_config()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config.normalized())
    }

    /// 读取并解析配置文件
    async fn read_config_file(path: &Path) -> ConfigResult<TerminalConfig> {
        debug!("开始加载TOML配置: {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::io("reading config file", path, e))?;

        let config = parse_toml_content(&content).map_err(|e| ConfigError::parse(path, e))?;
        info!("配置文件解析成功: {}", path.display());
        Ok(config)
    }
}

/// 解析TOML内容为配置结构（不做修正）
pub fn parse_toml_content(content: &str) -> Result<TerminalConfig, toml::de::Error> {
    toml::from_str::<TerminalConfig>(content)
}

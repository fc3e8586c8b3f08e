//! 配置加载
//!
//! 分层来源（后者覆盖前者）：
//! 1. 内置默认值；
//! 2. 可选的 `bookshelf.toml`，或 `BOOKSHELF_CONFIG` 指定的文件（此时文件必须存在）；
//! 3. 前缀为 `BOOKSHELF_`、层级以 `__` 分隔的环境变量，例如 `BOOKSHELF_SERVER__PORT=9000`。
//!
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

pub const CONFIG_PATH_ENV: &str = "BOOKSHELF_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "bookshelf";
const ENV_PREFIX: &str = "BOOKSHELF";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub snowflake: SnowflakeSettings,
    pub log: LogSettings,
    pub errors: ErrorSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeSettings {
    pub worker_id: u8,
    pub data_center_id: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `RUST_LOG` 未设置时使用的过滤规则
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorSettings {
    /// 附在 500 响应描述末尾的联系邮箱
    pub contact_email: String,
}

impl Settings {
    /// 从默认值、配置文件与环境变量加载
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => File::with_name(&path).required(true),
            Err(_) => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::defaults()?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 只含内置默认值的构建器
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("snowflake.worker_id", 0)?
            .set_default("snowflake.data_center_id", 0)?
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?
            .set_default("errors.contact_email", "contact@bookshelf.local")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

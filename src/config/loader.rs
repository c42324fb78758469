//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PLOTPATH_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `PLOTPATH_SERVER__HOST=127.0.0.1`
/// - `PLOTPATH_SERVER__PORT=8080`
/// - `PLOTPATH_BACKEND__URL=http://backend:9000`
/// - `PLOTPATH_SESSION__EXPIRE_SECS=3600`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("backend.url", "http://localhost:9000")?
        .set_default("backend.timeout_secs", 30)?
        .set_default("backend.max_retries", 0)?
        .set_default("session.reap_enabled", true)?
        .set_default("session.reap_interval_secs", 600)?
        .set_default("session.expire_secs", 7200)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: PLOTPATH_
    // 层级分隔符: __ (双下划线)
    // 例如: PLOTPATH_BACKEND__URL=http://backend:9000
    builder = builder.add_source(
        Environment::with_prefix("PLOTPATH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.backend.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Backend URL cannot be empty".to_string(),
        ));
    }

    if config.session.reap_enabled && config.session.reap_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Reap interval cannot be 0 when session reaping is enabled".to_string(),
        ));
    }

    if config.session.expire_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session expire time cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Backend URL: {}", config.backend.url);
    tracing::info!("Backend Timeout: {}s", config.backend.timeout_secs);
    tracing::info!("Session Reaping: {}", config.session.reap_enabled);
    if config.session.reap_enabled {
        tracing::info!("Reap Interval: {}s", config.session.reap_interval_secs);
        tracing::info!("Session Expire: {}s", config.session.expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_backend_url() {
        let mut config = AppConfig::default();
        config.backend.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_expire() {
        let mut config = AppConfig::default();
        config.session.expire_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}

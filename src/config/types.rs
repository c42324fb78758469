//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 平台后端配置
    #[serde(default)]
    pub backend: BackendConfig,

    /// 编辑会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 平台后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// 平台后端基础 URL
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,

    /// 只读请求最大重试次数
    #[serde(default)]
    pub max_retries: u32,
}

fn default_backend_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_backend_timeout() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_backend_timeout(),
            max_retries: 0,
        }
    }
}

/// 编辑会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 是否启用过期会话回收
    #[serde(default = "default_reap_enabled")]
    pub reap_enabled: bool,

    /// 回收扫描间隔（秒）
    #[serde(default = "default_reap_interval")]
    pub reap_interval_secs: u64,

    /// 会话空闲过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub expire_secs: u64,
}

fn default_reap_enabled() -> bool {
    true
}

fn default_reap_interval() -> u64 {
    600 // 10 分钟
}

fn default_session_expire() -> u64 {
    7200 // 2 小时
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reap_enabled: default_reap_enabled(),
            reap_interval_secs: default_reap_interval(),
            expire_secs: default_session_expire(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

//! Backend Adapters - 平台后端客户端
//!
//! ChapterProviderPort / PathGatewayPort 的两个实现：
//! - HttpBackendClient: 调用平台后端 REST API
//! - FakeBackendClient: 内存实现，测试与本地开发用

mod fake_backend_client;
mod http_backend_client;

pub use fake_backend_client::FakeBackendClient;
pub use http_backend_client::{HttpBackendClient, HttpBackendClientConfig};

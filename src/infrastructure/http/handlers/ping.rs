//! Ping Handler
//!
//! 健康检查；编辑器前端用它探测服务可用性。

use axum::Json;
use serde::Serialize;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping_reports_service_identity() {
        let Json(response) = ping().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.service, "plotpath");
        assert!(!response.version.is_empty());
    }
}

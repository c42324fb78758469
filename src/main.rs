//! Plotpath - 分支小说阅读路径编辑服务
//!
//! - Domain: chapter/, path/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters, reaper

use std::sync::Arc;

use plotpath::config::{load_config, print_config};
use plotpath::infrastructure::adapters::{HttpBackendClient, HttpBackendClientConfig};
use plotpath::infrastructure::http::{AppState, HttpServer, ServerConfig};
use plotpath::infrastructure::memory::InMemorySessionManager;
use plotpath::infrastructure::{SessionReaper, SessionReaperConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},plotpath={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Plotpath - 分支小说阅读路径编辑服务");
    print_config(&config);

    // 创建平台后端客户端（同时实现 ChapterProvider 与 PathGateway 两个端口）
    let backend_config = HttpBackendClientConfig {
        base_url: config.backend.url.clone(),
        timeout_secs: config.backend.timeout_secs,
        max_retries: config.backend.max_retries,
    };
    let backend = Arc::new(
        HttpBackendClient::new(backend_config)
            .map_err(|e| anyhow::anyhow!("Failed to create backend client: {}", e))?,
    );

    // 创建内存 Session 管理器
    let session_manager = Arc::new(InMemorySessionManager::new());

    // 启动过期会话回收任务
    if config.session.reap_enabled {
        let reaper = SessionReaper::new(
            SessionReaperConfig {
                interval_secs: config.session.reap_interval_secs,
                expire_secs: config.session.expire_secs,
            },
            session_manager.clone(),
        );
        tokio::spawn(reaper.run());
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(session_manager, backend.clone(), backend);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

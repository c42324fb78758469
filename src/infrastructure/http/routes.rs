//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/session/open       POST  打开编辑会话（装载章节树与已保存路径）
//! - /api/session/close      POST  关闭编辑会话
//! - /api/path/select        POST  追加章节到草稿
//! - /api/path/remove_last   POST  移除草稿最后一步
//! - /api/path/rationale     POST  更新步骤理由
//! - /api/path/discard       POST  放弃草稿并从后端重新装载
//! - /api/path/save          POST  校验并保存到平台后端
//! - /api/path/candidates    POST  下一步候选章节
//! - /api/path/state         POST  草稿当前状态

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/session", session_routes())
        .nest("/path", path_routes())
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", post(handlers::open_session))
        .route("/close", post(handlers::close_session))
}

/// Path 路由
fn path_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/select", post(handlers::select_chapter))
        .route("/remove_last", post(handlers::remove_last_step))
        .route("/rationale", post(handlers::update_rationale))
        .route("/discard", post(handlers::discard_draft))
        .route("/save", post(handlers::save_path))
        .route("/candidates", post(handlers::next_candidates))
        .route("/state", post(handlers::draft_state))
}

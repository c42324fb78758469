//! Session Handlers - 编辑会话

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{CloseEditSessionCommand, OpenEditSessionCommand};
use crate::infrastructure::http::dto::{ApiResponse, StepDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Open Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub novel_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OpenSessionResponseDto {
    pub session_id: String,
    pub novel_id: Uuid,
    pub path_id: Option<Uuid>,
    /// 从已保存路径装载的草稿步骤
    pub steps: Vec<StepDto>,
}

pub async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<Json<ApiResponse<OpenSessionResponseDto>>, ApiError> {
    let cmd = OpenEditSessionCommand {
        novel_id: req.novel_id,
    };

    let result = state.open_session_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(OpenSessionResponseDto {
        session_id: result.session_id,
        novel_id: result.novel_id,
        path_id: result.path_id,
        steps: result.steps.iter().map(StepDto::from).collect(),
    })))
}

// ============================================================================
// Close Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CloseSessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct CloseSessionResponseDto {
    pub session_id: String,
}

pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CloseSessionRequest>,
) -> Result<Json<ApiResponse<CloseSessionResponseDto>>, ApiError> {
    let cmd = CloseEditSessionCommand {
        session_id: req.session_id,
    };

    let result = state.close_session_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(CloseSessionResponseDto {
        session_id: result.session_id,
    })))
}

//! Path Handlers - 路径草稿操作

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    DiscardDraftCommand, GetDraftState, GetNextCandidates, RemoveLastStepCommand, SavePathCommand,
    SelectChapterCommand, UpdateStepRationaleCommand,
};
use crate::domain::chapter::ChapterId;
use crate::infrastructure::http::dto::{ApiResponse, Empty, StepDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Select Chapter
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectChapterRequest {
    pub session_id: String,
    pub chapter_id: Uuid,
    /// 省略时使用默认理由文本
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SelectChapterResponseDto {
    pub session_id: String,
    pub step: StepDto,
    pub step_count: usize,
}

pub async fn select_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectChapterRequest>,
) -> Result<Json<ApiResponse<SelectChapterResponseDto>>, ApiError> {
    let cmd = SelectChapterCommand {
        session_id: req.session_id,
        chapter_id: ChapterId::from_uuid(req.chapter_id),
        rationale: req.rationale,
    };

    let result = state.select_chapter_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(SelectChapterResponseDto {
        session_id: result.session_id,
        step: StepDto::from(result.step),
        step_count: result.step_count,
    })))
}

// ============================================================================
// Remove Last Step
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RemoveLastStepRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveLastStepResponseDto {
    pub session_id: String,
    pub removed: Option<StepDto>,
    pub step_count: usize,
}

pub async fn remove_last_step(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveLastStepRequest>,
) -> Result<Json<ApiResponse<RemoveLastStepResponseDto>>, ApiError> {
    let cmd = RemoveLastStepCommand {
        session_id: req.session_id,
    };

    let result = state.remove_last_step_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(RemoveLastStepResponseDto {
        session_id: result.session_id,
        removed: result.removed.map(StepDto::from),
        step_count: result.step_count,
    })))
}

// ============================================================================
// Update Rationale
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateRationaleRequest {
    pub session_id: String,
    pub chapter_id: Uuid,
    pub rationale: String,
}

pub async fn update_rationale(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRationaleRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = UpdateStepRationaleCommand {
        session_id: req.session_id,
        chapter_id: ChapterId::from_uuid(req.chapter_id),
        rationale: req.rationale,
    };

    state.update_rationale_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::ok()))
}

// ============================================================================
// Discard Draft
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DiscardDraftRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct DiscardDraftResponseDto {
    pub session_id: String,
    pub steps: Vec<StepDto>,
}

pub async fn discard_draft(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DiscardDraftRequest>,
) -> Result<Json<ApiResponse<DiscardDraftResponseDto>>, ApiError> {
    let cmd = DiscardDraftCommand {
        session_id: req.session_id,
    };

    let result = state.discard_draft_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(DiscardDraftResponseDto {
        session_id: result.session_id,
        steps: result.steps.iter().map(StepDto::from).collect(),
    })))
}

// ============================================================================
// Save Path
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SavePathRequest {
    pub session_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SavePathResponseDto {
    pub session_id: String,
    pub path_id: Uuid,
    pub created: bool,
    pub step_count: usize,
}

pub async fn save_path(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SavePathRequest>,
) -> Result<Json<ApiResponse<SavePathResponseDto>>, ApiError> {
    let cmd = SavePathCommand {
        session_id: req.session_id,
        name: req.name,
        description: req.description,
    };

    let result = state.save_path_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(SavePathResponseDto {
        session_id: result.session_id,
        path_id: result.path_id,
        created: result.created,
        step_count: result.step_count,
    })))
}

// ============================================================================
// Next Candidates
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NextCandidatesRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct CandidateDto {
    pub chapter_id: Uuid,
    pub title: String,
    pub word_count: u32,
    pub is_leaf: bool,
}

#[derive(Debug, Serialize)]
pub struct NextCandidatesResponseDto {
    pub session_id: String,
    pub candidates: Vec<CandidateDto>,
}

pub async fn next_candidates(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NextCandidatesRequest>,
) -> Result<Json<ApiResponse<NextCandidatesResponseDto>>, ApiError> {
    let query = GetNextCandidates {
        session_id: req.session_id,
    };

    let result = state.next_candidates_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(NextCandidatesResponseDto {
        session_id: result.session_id,
        candidates: result
            .candidates
            .into_iter()
            .map(|c| CandidateDto {
                chapter_id: *c.chapter_id.as_uuid(),
                title: c.title,
                word_count: c.word_count,
                is_leaf: c.is_leaf,
            })
            .collect(),
    })))
}

// ============================================================================
// Draft State
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DraftStateRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct DraftStateResponseDto {
    pub session_id: String,
    pub novel_id: Uuid,
    pub path_id: Option<Uuid>,
    pub steps: Vec<StepDto>,
    pub busy: bool,
    pub extendable: bool,
}

pub async fn draft_state(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DraftStateRequest>,
) -> Result<Json<ApiResponse<DraftStateResponseDto>>, ApiError> {
    let query = GetDraftState {
        session_id: req.session_id,
    };

    let result = state.draft_state_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(DraftStateResponseDto {
        session_id: result.session_id,
        novel_id: result.novel_id,
        path_id: result.path_id,
        steps: result.steps.iter().map(StepDto::from).collect(),
        busy: result.busy,
        extendable: result.extendable,
    })))
}

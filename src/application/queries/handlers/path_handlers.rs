//! Path Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionManagerPort;
use crate::application::queries::{GetDraftState, GetNextCandidates};
use crate::domain::chapter::{ChapterId, ChapterNode};
use crate::domain::path::PathStep;

// ============================================================================
// Response DTOs
// ============================================================================

/// 候选章节
#[derive(Debug, Clone)]
pub struct CandidateResponse {
    pub chapter_id: ChapterId,
    pub title: String,
    pub word_count: u32,
    pub is_leaf: bool,
}

impl From<&ChapterNode> for CandidateResponse {
    fn from(node: &ChapterNode) -> Self {
        Self {
            chapter_id: *node.id(),
            title: node.title().to_string(),
            word_count: node.word_count(),
            is_leaf: node.is_leaf(),
        }
    }
}

/// 候选集响应
#[derive(Debug, Clone)]
pub struct CandidatesResponse {
    pub session_id: String,
    pub candidates: Vec<CandidateResponse>,
}

/// 草稿状态响应
#[derive(Debug, Clone)]
pub struct DraftStateResponse {
    pub session_id: String,
    pub novel_id: Uuid,
    pub path_id: Option<Uuid>,
    pub steps: Vec<PathStep>,
    pub busy: bool,
    /// false 表示已到达叶子章节，路径无法继续延伸
    pub extendable: bool,
}

// ============================================================================
// GetNextCandidates Query
// ============================================================================

/// GetNextCandidates Handler
pub struct GetNextCandidatesHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetNextCandidatesHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        query: GetNextCandidates,
    ) -> Result<CandidatesResponse, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;

        let candidates = session
            .builder
            .next_candidates()
            .iter()
            .map(CandidateResponse::from)
            .collect();

        Ok(CandidatesResponse {
            session_id: query.session_id,
            candidates,
        })
    }
}

// ============================================================================
// GetDraftState Query
// ============================================================================

/// GetDraftState Handler
pub struct GetDraftStateHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetDraftStateHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        query: GetDraftState,
    ) -> Result<DraftStateResponse, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;
        let extendable = !session.builder.next_candidates().is_empty();

        Ok(DraftStateResponse {
            session_id: session.id,
            novel_id: session.novel_id,
            path_id: session.path_id,
            steps: session.builder.steps().to_vec(),
            busy: session.busy,
            extendable,
        })
    }
}

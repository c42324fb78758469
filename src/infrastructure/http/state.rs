//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloseEditSessionHandler, DiscardDraftHandler, OpenEditSessionHandler, RemoveLastStepHandler,
    SavePathHandler, SelectChapterHandler, UpdateStepRationaleHandler,
    // Query handlers
    GetDraftStateHandler, GetNextCandidatesHandler,
    // Ports
    ChapterProviderPort, PathGatewayPort, SessionManagerPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn SessionManagerPort>,
    pub chapter_provider: Arc<dyn ChapterProviderPort>,
    pub path_gateway: Arc<dyn PathGatewayPort>,

    // ========== Command Handlers ==========
    pub open_session_handler: OpenEditSessionHandler,
    pub close_session_handler: CloseEditSessionHandler,
    pub select_chapter_handler: SelectChapterHandler,
    pub remove_last_step_handler: RemoveLastStepHandler,
    pub update_rationale_handler: UpdateStepRationaleHandler,
    pub discard_draft_handler: DiscardDraftHandler,
    pub save_path_handler: SavePathHandler,

    // ========== Query Handlers ==========
    pub next_candidates_handler: GetNextCandidatesHandler,
    pub draft_state_handler: GetDraftStateHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        chapter_provider: Arc<dyn ChapterProviderPort>,
        path_gateway: Arc<dyn PathGatewayPort>,
    ) -> Self {
        Self {
            // Ports
            session_manager: session_manager.clone(),
            chapter_provider: chapter_provider.clone(),
            path_gateway: path_gateway.clone(),

            // Command handlers
            open_session_handler: OpenEditSessionHandler::new(
                chapter_provider.clone(),
                path_gateway.clone(),
                session_manager.clone(),
            ),
            close_session_handler: CloseEditSessionHandler::new(session_manager.clone()),
            select_chapter_handler: SelectChapterHandler::new(session_manager.clone()),
            remove_last_step_handler: RemoveLastStepHandler::new(session_manager.clone()),
            update_rationale_handler: UpdateStepRationaleHandler::new(session_manager.clone()),
            discard_draft_handler: DiscardDraftHandler::new(
                session_manager.clone(),
                path_gateway.clone(),
            ),
            save_path_handler: SavePathHandler::new(
                session_manager.clone(),
                path_gateway.clone(),
            ),

            // Query handlers
            next_candidates_handler: GetNextCandidatesHandler::new(session_manager.clone()),
            draft_state_handler: GetDraftStateHandler::new(session_manager.clone()),
        }
    }
}

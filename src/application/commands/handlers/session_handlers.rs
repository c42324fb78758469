//! Session Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    CloseEditSessionCommand, CloseEditSessionResponse, OpenEditSessionCommand,
    OpenEditSessionResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterProviderPort, EditSession, PathGatewayPort, SessionManagerPort,
};
use crate::domain::path::PathBuilder;

// ============================================================================
// OpenEditSession
// ============================================================================

/// OpenEditSession Handler
///
/// 拉取章节树，若已有作者推荐路径则将其步骤装载进草稿。
/// 每次打开创建新会话；同一小说的旧会话留待过期回收，
/// 对账语义为 last-write-wins。
pub struct OpenEditSessionHandler {
    chapter_provider: Arc<dyn ChapterProviderPort>,
    path_gateway: Arc<dyn PathGatewayPort>,
    session_manager: Arc<dyn SessionManagerPort>,
}

impl OpenEditSessionHandler {
    pub fn new(
        chapter_provider: Arc<dyn ChapterProviderPort>,
        path_gateway: Arc<dyn PathGatewayPort>,
        session_manager: Arc<dyn SessionManagerPort>,
    ) -> Self {
        Self {
            chapter_provider,
            path_gateway,
            session_manager,
        }
    }

    pub async fn handle(
        &self,
        command: OpenEditSessionCommand,
    ) -> Result<OpenEditSessionResponse, ApplicationError> {
        let novel_id = command.novel_id;

        let forest = self.chapter_provider.get_chapter_tree(novel_id).await?;
        if forest.is_empty() {
            return Err(ApplicationError::validation(format!(
                "Novel has no chapters: {}",
                novel_id
            )));
        }

        let persisted = self
            .path_gateway
            .get_author_recommended_path(novel_id)
            .await?;

        let mut builder = PathBuilder::new(forest);
        let (path_id, steps) = match persisted {
            Some(p) => {
                let steps = p.path.steps().to_vec();
                builder.reset(steps.clone());
                (Some(p.path_id), steps)
            }
            None => (None, Vec::new()),
        };

        let session = EditSession::new(novel_id, path_id, builder);
        let session_id = self.session_manager.create(session)?;

        tracing::info!(
            session_id = %session_id,
            novel_id = %novel_id,
            path_id = ?path_id,
            loaded_steps = steps.len(),
            "Edit session opened"
        );

        Ok(OpenEditSessionResponse {
            session_id,
            novel_id,
            path_id,
            steps,
        })
    }
}

// ============================================================================
// CloseEditSession
// ============================================================================

/// CloseEditSession Handler
pub struct CloseEditSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl CloseEditSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        command: CloseEditSessionCommand,
    ) -> Result<CloseEditSessionResponse, ApplicationError> {
        self.session_manager.close(&command.session_id)?;

        tracing::info!(session_id = %command.session_id, "Edit session closed");

        Ok(CloseEditSessionResponse {
            session_id: command.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::chapter::{ChapterForest, ChapterId, ChapterNode};
    use crate::infrastructure::adapters::FakeBackendClient;
    use crate::infrastructure::memory::InMemorySessionManager;

    fn handler(
        backend: Arc<FakeBackendClient>,
        sessions: Arc<InMemorySessionManager>,
    ) -> OpenEditSessionHandler {
        OpenEditSessionHandler::new(backend.clone(), backend, sessions)
    }

    #[tokio::test]
    async fn test_open_without_saved_path_starts_empty() {
        let backend = Arc::new(FakeBackendClient::new());
        let sessions = Arc::new(InMemorySessionManager::new());
        let novel_id = Uuid::new_v4();
        let root = ChapterNode::new(ChapterId::new(), "第一章", 2000, Uuid::new_v4()).unwrap();
        backend.set_tree(novel_id, ChapterForest::new(vec![root]));

        let opened = handler(backend, sessions.clone())
            .handle(OpenEditSessionCommand { novel_id })
            .await
            .unwrap();

        assert_eq!(opened.novel_id, novel_id);
        assert_eq!(opened.path_id, None);
        assert!(opened.steps.is_empty());
        assert!(sessions.get(&opened.session_id).is_ok());
    }

    #[tokio::test]
    async fn test_open_rejects_empty_chapter_tree() {
        let backend = Arc::new(FakeBackendClient::new());
        let sessions = Arc::new(InMemorySessionManager::new());
        let novel_id = Uuid::new_v4();
        backend.set_tree(novel_id, ChapterForest::new(Vec::new()));

        let err = handler(backend, sessions)
            .handle(OpenEditSessionCommand { novel_id })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_open_unknown_novel_maps_to_not_found() {
        let backend = Arc::new(FakeBackendClient::new());
        let sessions = Arc::new(InMemorySessionManager::new());

        let err = handler(backend, sessions)
            .handle(OpenEditSessionCommand {
                novel_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_close_removes_session() {
        let backend = Arc::new(FakeBackendClient::new());
        let sessions = Arc::new(InMemorySessionManager::new());
        let novel_id = Uuid::new_v4();
        let root = ChapterNode::new(ChapterId::new(), "第一章", 2000, Uuid::new_v4()).unwrap();
        backend.set_tree(novel_id, ChapterForest::new(vec![root]));

        let opened = handler(backend, sessions.clone())
            .handle(OpenEditSessionCommand { novel_id })
            .await
            .unwrap();

        let close = CloseEditSessionHandler::new(sessions.clone());
        close
            .handle(CloseEditSessionCommand {
                session_id: opened.session_id.clone(),
            })
            .await
            .unwrap();

        assert!(sessions.get(&opened.session_id).is_err());
    }
}

//! Path Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    DiscardDraftCommand, DiscardDraftResponse, RemoveLastStepCommand, RemoveLastStepResponse,
    SavePathCommand, SavePathResponse, SelectChapterCommand, SelectChapterResponse,
    UpdateStepRationaleCommand,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{PathGatewayPort, SessionManagerPort};
use crate::domain::path::PathStep;

// ============================================================================
// SelectChapter
// ============================================================================

/// SelectChapter Handler
pub struct SelectChapterHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SelectChapterHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        command: SelectChapterCommand,
    ) -> Result<SelectChapterResponse, ApplicationError> {
        let step = self.session_manager.select_chapter(
            &command.session_id,
            command.chapter_id,
            command.rationale,
        )?;
        let step_count = self.session_manager.get(&command.session_id)?.builder.len();

        tracing::info!(
            session_id = %command.session_id,
            chapter_id = %command.chapter_id,
            step_count = step_count,
            "Chapter appended to draft"
        );

        Ok(SelectChapterResponse {
            session_id: command.session_id,
            step,
            step_count,
        })
    }
}

// ============================================================================
// RemoveLastStep
// ============================================================================

/// RemoveLastStep Handler
pub struct RemoveLastStepHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl RemoveLastStepHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        command: RemoveLastStepCommand,
    ) -> Result<RemoveLastStepResponse, ApplicationError> {
        let removed = self.session_manager.remove_last_step(&command.session_id)?;
        let step_count = self.session_manager.get(&command.session_id)?.builder.len();

        tracing::debug!(
            session_id = %command.session_id,
            removed = removed.is_some(),
            step_count = step_count,
            "Draft truncated"
        );

        Ok(RemoveLastStepResponse {
            session_id: command.session_id,
            removed,
            step_count,
        })
    }
}

// ============================================================================
// UpdateStepRationale
// ============================================================================

/// UpdateStepRationale Handler
pub struct UpdateStepRationaleHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl UpdateStepRationaleHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        command: UpdateStepRationaleCommand,
    ) -> Result<(), ApplicationError> {
        self.session_manager.update_rationale(
            &command.session_id,
            command.chapter_id,
            command.rationale,
        )?;

        tracing::debug!(
            session_id = %command.session_id,
            chapter_id = %command.chapter_id,
            "Step rationale updated"
        );

        Ok(())
    }
}

// ============================================================================
// DiscardDraft
// ============================================================================

/// DiscardDraft Handler
///
/// 取消编辑：丢弃本地草稿，从持久化网关重新拉取已保存路径。
/// 从未保存过路径时草稿清空。
pub struct DiscardDraftHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    path_gateway: Arc<dyn PathGatewayPort>,
}

impl DiscardDraftHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        path_gateway: Arc<dyn PathGatewayPort>,
    ) -> Self {
        Self {
            session_manager,
            path_gateway,
        }
    }

    pub async fn handle(
        &self,
        command: DiscardDraftCommand,
    ) -> Result<DiscardDraftResponse, ApplicationError> {
        // 网关操作期间置 busy，屏蔽并发草稿修改；快照在同一步取得
        let session = self.session_manager.begin_io(&command.session_id)?;
        let reloaded: Result<Vec<PathStep>, ApplicationError> = match session.path_id {
            Some(path_id) => self
                .path_gateway
                .get_path_detail(session.novel_id, path_id)
                .await
                .map(|p| p.path.steps().to_vec())
                .map_err(Into::into),
            None => Ok(Vec::new()),
        };
        self.session_manager.end_io(&command.session_id);

        let steps = reloaded?;
        self.session_manager
            .reset_draft(&command.session_id, steps.clone())?;

        tracing::info!(
            session_id = %command.session_id,
            restored_steps = steps.len(),
            "Draft discarded and reloaded"
        );

        Ok(DiscardDraftResponse {
            session_id: command.session_id,
            steps,
        })
    }
}

// ============================================================================
// SavePath
// ============================================================================

/// SavePath Handler
///
/// 提交顺序：置忙并取快照，在快照上做空路径校验（不触达网关），
/// 再按会话是否已有路径 ID 决定创建或更新。空草稿与网关失败都会
/// 清除 busy，草稿保持原样以便重试。
pub struct SavePathHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    path_gateway: Arc<dyn PathGatewayPort>,
}

impl SavePathHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        path_gateway: Arc<dyn PathGatewayPort>,
    ) -> Self {
        Self {
            session_manager,
            path_gateway,
        }
    }

    pub async fn handle(
        &self,
        command: SavePathCommand,
    ) -> Result<SavePathResponse, ApplicationError> {
        if command.name.trim().is_empty() {
            return Err(ApplicationError::validation("Path name cannot be empty"));
        }

        // 先置 busy 再取快照，提交内容与置忙时刻的草稿严格一致
        let session = self.session_manager.begin_io(&command.session_id)?;

        // 空草稿在触达网关之前拒绝
        let path = match session
            .builder
            .to_reading_path(command.name, command.description)
        {
            Ok(path) => path,
            Err(e) => {
                self.session_manager.end_io(&command.session_id);
                return Err(e.into());
            }
        };
        let step_count = path.len();

        let result = match session.path_id {
            Some(path_id) => self
                .path_gateway
                .update_path(session.novel_id, path_id, &path)
                .await
                .map(|_| path_id),
            None => self.path_gateway.create_path(session.novel_id, &path).await,
        };
        self.session_manager.end_io(&command.session_id);

        let path_id = match result {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    session_id = %command.session_id,
                    error = %e,
                    "Path save failed, draft kept for retry"
                );
                return Err(e.into());
            }
        };

        let created = session.path_id.is_none();
        if created {
            self.session_manager
                .set_path_id(&command.session_id, path_id)?;
        }

        tracing::info!(
            session_id = %command.session_id,
            path_id = %path_id,
            created = created,
            step_count = step_count,
            "Reading path saved"
        );

        Ok(SavePathResponse {
            session_id: command.session_id,
            path_id,
            created,
            step_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use super::*;
    use crate::application::commands::handlers::OpenEditSessionHandler;
    use crate::application::commands::OpenEditSessionCommand;
    use crate::domain::chapter::{ChapterForest, ChapterId, ChapterNode};
    use crate::domain::path::{PathStep, ReadingPath};
    use crate::infrastructure::adapters::FakeBackendClient;
    use crate::infrastructure::memory::InMemorySessionManager;

    struct Fixture {
        backend: Arc<FakeBackendClient>,
        sessions: Arc<InMemorySessionManager>,
        novel_id: Uuid,
        root: ChapterId,
        child: ChapterId,
    }

    /// 根章节 -> [分支一 -> [结局], 分支二]
    fn fixture() -> Fixture {
        let ending = node("结局");
        let branch1 = node("分支一").with_children(vec![ending]);
        let branch2 = node("分支二");
        let root = node("根章节").with_children(vec![branch1.clone(), branch2]);
        let root_id = *root.id();
        let child_id = *branch1.id();

        let backend = Arc::new(FakeBackendClient::new());
        let novel_id = Uuid::new_v4();
        backend.set_tree(novel_id, ChapterForest::new(vec![root]));

        Fixture {
            backend,
            sessions: Arc::new(InMemorySessionManager::new()),
            novel_id,
            root: root_id,
            child: child_id,
        }
    }

    fn node(title: &str) -> ChapterNode {
        ChapterNode::new(ChapterId::new(), title, 1500, Uuid::new_v4()).unwrap()
    }

    async fn open_session(f: &Fixture) -> String {
        let handler = OpenEditSessionHandler::new(
            f.backend.clone(),
            f.backend.clone(),
            f.sessions.clone(),
        );
        handler
            .handle(OpenEditSessionCommand {
                novel_id: f.novel_id,
            })
            .await
            .unwrap()
            .session_id
    }

    #[tokio::test]
    async fn test_save_empty_draft_never_touches_gateway() {
        let f = fixture();
        let session_id = open_session(&f).await;

        let handler = SavePathHandler::new(f.sessions.clone(), f.backend.clone());
        let err = handler
            .handle(SavePathCommand {
                session_id: session_id.clone(),
                name: "主线".to_string(),
                description: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
        assert_eq!(f.backend.path_count(), 0, "空路径不得触达网关");

        // 提前返回路径同样要清除 busy
        assert!(!f.sessions.get(&session_id).unwrap().busy);
        assert!(f.sessions.select_chapter(&session_id, f.root, None).is_ok());
    }

    #[tokio::test]
    async fn test_save_rejected_while_session_busy() {
        let f = fixture();
        let session_id = open_session(&f).await;
        f.sessions.select_chapter(&session_id, f.root, None).unwrap();

        // 保存的第一步就是置忙；已忙的会话在任何序列化发生之前被拒绝
        f.sessions.begin_io(&session_id).unwrap();
        let handler = SavePathHandler::new(f.sessions.clone(), f.backend.clone());
        let err = handler
            .handle(SavePathCommand {
                session_id: session_id.clone(),
                name: "主线".to_string(),
                description: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Busy(_)));
        assert_eq!(f.backend.path_count(), 0);
        // 被拒绝的保存不得清除他人持有的 busy
        assert!(f.sessions.get(&session_id).unwrap().busy);
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let f = fixture();
        let session_id = open_session(&f).await;

        f.sessions.select_chapter(&session_id, f.root, None).unwrap();
        f.sessions.select_chapter(&session_id, f.child, None).unwrap();

        let handler = SavePathHandler::new(f.sessions.clone(), f.backend.clone());
        let first = handler
            .handle(SavePathCommand {
                session_id: session_id.clone(),
                name: "主线".to_string(),
                description: "推荐主线".to_string(),
            })
            .await
            .unwrap();
        assert!(first.created);
        assert_eq!(first.step_count, 2);
        assert_eq!(f.backend.path_count(), 1);

        // 再次保存走更新，不新建记录
        let second = handler
            .handle(SavePathCommand {
                session_id,
                name: "主线 v2".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.path_id, first.path_id);
        assert_eq!(f.backend.path_count(), 1);
    }

    #[tokio::test]
    async fn test_gateway_failure_keeps_draft_and_clears_busy() {
        let f = fixture();
        let session_id = open_session(&f).await;
        f.sessions.select_chapter(&session_id, f.root, None).unwrap();

        f.backend.set_fail(true);
        let handler = SavePathHandler::new(f.sessions.clone(), f.backend.clone());
        let err = handler
            .handle(SavePathCommand {
                session_id: session_id.clone(),
                name: "主线".to_string(),
                description: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::GatewayError(_)));

        // 草稿保留，busy 已清除，可直接重试
        let session = f.sessions.get(&session_id).unwrap();
        assert_eq!(session.builder.len(), 1);
        assert!(!session.busy);

        f.backend.set_fail(false);
        assert!(handler
            .handle(SavePathCommand {
                session_id,
                name: "主线".to_string(),
                description: String::new(),
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_open_loads_persisted_path() {
        let f = fixture();
        let saved = ReadingPath::new(
            "主线",
            "推荐主线",
            vec![
                PathStep::new(f.root, "根章节", "起始章节"),
                PathStep::new(f.child, "分支一", "保存过的理由"),
            ],
        );
        let path_id = f.backend.seed_path(f.novel_id, saved);

        let handler = OpenEditSessionHandler::new(
            f.backend.clone(),
            f.backend.clone(),
            f.sessions.clone(),
        );
        let opened = handler
            .handle(OpenEditSessionCommand {
                novel_id: f.novel_id,
            })
            .await
            .unwrap();

        assert_eq!(opened.path_id, Some(path_id));
        assert_eq!(opened.steps.len(), 2);
        assert_eq!(opened.steps[1].rationale(), "保存过的理由");
    }

    #[tokio::test]
    async fn test_discard_reloads_persisted_steps() {
        let f = fixture();
        let saved = ReadingPath::new(
            "主线",
            String::new(),
            vec![PathStep::new(f.root, "根章节", "起始章节")],
        );
        f.backend.seed_path(f.novel_id, saved);
        let session_id = open_session(&f).await;

        // 本地延伸草稿后放弃
        f.sessions.select_chapter(&session_id, f.child, None).unwrap();
        assert_eq!(f.sessions.get(&session_id).unwrap().builder.len(), 2);

        let handler = DiscardDraftHandler::new(f.sessions.clone(), f.backend.clone());
        let result = handler
            .handle(DiscardDraftCommand {
                session_id: session_id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(result.steps.len(), 1);
        assert_eq!(f.sessions.get(&session_id).unwrap().builder.len(), 1);
    }

    #[tokio::test]
    async fn test_discard_without_saved_path_empties_draft() {
        let f = fixture();
        let session_id = open_session(&f).await;
        f.sessions.select_chapter(&session_id, f.root, None).unwrap();

        let handler = DiscardDraftHandler::new(f.sessions.clone(), f.backend.clone());
        let result = handler
            .handle(DiscardDraftCommand {
                session_id: session_id.clone(),
            })
            .await
            .unwrap();

        assert!(result.steps.is_empty());
        assert!(f.sessions.get(&session_id).unwrap().builder.is_empty());
    }
}

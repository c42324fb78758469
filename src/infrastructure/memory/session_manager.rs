//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{EditSession, SessionError, SessionManagerPort};
use crate::domain::chapter::ChapterId;
use crate::domain::path::PathStep;

/// 内存编辑会话管理器
///
/// 草稿修改在 DashMap 条目锁内执行，busy 会话拒绝修改。
pub struct InMemorySessionManager {
    sessions: DashMap<String, EditSession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 获取可修改的会话条目，busy 时拒绝
    fn writable(
        &self,
        id: &str,
    ) -> Result<dashmap::mapref::one::RefMut<'_, String, EditSession>, SessionError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        if session.busy {
            return Err(SessionError::Busy(id.to_string()));
        }
        Ok(session)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: EditSession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Edit session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<EditSession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn select_chapter(
        &self,
        id: &str,
        chapter_id: ChapterId,
        rationale: Option<String>,
    ) -> Result<PathStep, SessionError> {
        let mut session = self.writable(id)?;
        let step = session.builder.select_chapter(chapter_id, rationale)?;
        session.last_activity = Utc::now();
        Ok(step)
    }

    fn remove_last_step(&self, id: &str) -> Result<Option<PathStep>, SessionError> {
        let mut session = self.writable(id)?;
        let removed = session.builder.remove_last_step();
        session.last_activity = Utc::now();
        Ok(removed)
    }

    fn update_rationale(
        &self,
        id: &str,
        chapter_id: ChapterId,
        rationale: String,
    ) -> Result<(), SessionError> {
        let mut session = self.writable(id)?;
        session.builder.update_step_rationale(&chapter_id, rationale);
        session.last_activity = Utc::now();
        Ok(())
    }

    fn reset_draft(&self, id: &str, steps: Vec<PathStep>) -> Result<(), SessionError> {
        let mut session = self.writable(id)?;
        session.builder.reset(steps);
        session.last_activity = Utc::now();
        Ok(())
    }

    fn set_path_id(&self, id: &str, path_id: Uuid) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.path_id = Some(path_id);
        session.last_activity = Utc::now();
        Ok(())
    }

    fn begin_io(&self, id: &str) -> Result<EditSession, SessionError> {
        let mut session = self.writable(id)?;
        session.busy = true;
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, "Session marked busy");
        Ok(session.clone())
    }

    fn end_io(&self, id: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.busy = false;
            session.last_activity = Utc::now();
            tracing::debug!(session_id = %id, "Session busy cleared");
        }
    }

    fn is_valid(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Edit session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn touch(&self, id: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.last_activity = Utc::now();
        }
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }
}

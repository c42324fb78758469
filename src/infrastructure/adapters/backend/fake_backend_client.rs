//! Fake Backend Client - 用于测试与本地开发
//!
//! 章节树与路径记录全部驻留内存，不实际调用平台后端。

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::application::ports::{
    ChapterProviderPort, GatewayError, PathGatewayPort, PersistedPath,
};
use crate::domain::chapter::ChapterForest;
use crate::domain::path::ReadingPath;

/// Fake Backend Client
///
/// `set_fail` 可以让后续保存/加载全部失败，用于网关错误路径的测试。
#[derive(Default)]
pub struct FakeBackendClient {
    trees: DashMap<Uuid, ChapterForest>,
    paths: DashMap<Uuid, PersistedPath>,
    /// novel_id -> 推荐路径的 path_id
    recommended: DashMap<Uuid, Uuid>,
    fail: AtomicBool,
}

impl FakeBackendClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一部小说的章节树
    pub fn set_tree(&self, novel_id: Uuid, forest: ChapterForest) {
        self.trees.insert(novel_id, forest);
    }

    /// 预置一条已保存的推荐路径
    pub fn seed_path(&self, novel_id: Uuid, path: ReadingPath) -> Uuid {
        let path_id = Uuid::new_v4();
        self.paths.insert(path_id, PersistedPath { path_id, path });
        self.recommended.insert(novel_id, path_id);
        path_id
    }

    /// 后续所有调用是否失败
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn check_fail(&self) -> Result<(), GatewayError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::ServiceError(
                "fake backend failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ChapterProviderPort for FakeBackendClient {
    async fn get_chapter_tree(&self, novel_id: Uuid) -> Result<ChapterForest, GatewayError> {
        self.check_fail()?;
        self.trees
            .get(&novel_id)
            .map(|f| f.clone())
            .ok_or_else(|| GatewayError::NotFound(format!("novel {}", novel_id)))
    }
}

#[async_trait]
impl PathGatewayPort for FakeBackendClient {
    async fn get_author_recommended_path(
        &self,
        novel_id: Uuid,
    ) -> Result<Option<PersistedPath>, GatewayError> {
        self.check_fail()?;
        let path_id = match self.recommended.get(&novel_id) {
            Some(entry) => *entry,
            None => return Ok(None),
        };
        Ok(self.paths.get(&path_id).map(|p| p.clone()))
    }

    async fn get_path_detail(
        &self,
        _novel_id: Uuid,
        path_id: Uuid,
    ) -> Result<PersistedPath, GatewayError> {
        self.check_fail()?;
        self.paths
            .get(&path_id)
            .map(|p| p.clone())
            .ok_or_else(|| GatewayError::NotFound(format!("path {}", path_id)))
    }

    async fn create_path(
        &self,
        novel_id: Uuid,
        path: &ReadingPath,
    ) -> Result<Uuid, GatewayError> {
        self.check_fail()?;
        let path_id = Uuid::new_v4();
        self.paths.insert(
            path_id,
            PersistedPath {
                path_id,
                path: path.clone(),
            },
        );
        self.recommended.insert(novel_id, path_id);
        tracing::debug!(novel_id = %novel_id, path_id = %path_id, "FakeBackendClient: path created");
        Ok(path_id)
    }

    async fn update_path(
        &self,
        _novel_id: Uuid,
        path_id: Uuid,
        path: &ReadingPath,
    ) -> Result<(), GatewayError> {
        self.check_fail()?;
        let mut entry = self
            .paths
            .get_mut(&path_id)
            .ok_or_else(|| GatewayError::NotFound(format!("path {}", path_id)))?;
        entry.path = path.clone();
        Ok(())
    }
}

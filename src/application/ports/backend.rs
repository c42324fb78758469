//! Backend Ports - 平台后端出站端口
//!
//! 章节树与阅读路径的持久化都由平台后端负责，
//! 本服务只通过这两个端口消费其 REST API。
//! 具体实现在 infrastructure/adapters/backend。

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::chapter::ChapterForest;
use crate::domain::path::ReadingPath;

/// 网关错误
///
/// 携带协作方返回的人类可读信息；对调用方而言全部可恢复，
/// 失败后本地草稿保持原样以便重试。
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Backend returned error: {0}")]
    ServiceError(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// 后端持有的阅读路径记录
#[derive(Debug, Clone)]
pub struct PersistedPath {
    pub path_id: Uuid,
    pub path: ReadingPath,
}

/// Chapter Provider Port - 章节树提供方
#[async_trait]
pub trait ChapterProviderPort: Send + Sync {
    /// 获取小说的完整章节树
    async fn get_chapter_tree(&self, novel_id: Uuid) -> Result<ChapterForest, GatewayError>;
}

/// Path Gateway Port - 阅读路径持久化网关
#[async_trait]
pub trait PathGatewayPort: Send + Sync {
    /// 获取作者推荐路径（尚未创建时为 None）
    async fn get_author_recommended_path(
        &self,
        novel_id: Uuid,
    ) -> Result<Option<PersistedPath>, GatewayError>;

    /// 获取路径详情（含已解析的章节标题与理由文本）
    async fn get_path_detail(
        &self,
        novel_id: Uuid,
        path_id: Uuid,
    ) -> Result<PersistedPath, GatewayError>;

    /// 创建阅读路径，返回后端分配的路径 ID
    async fn create_path(
        &self,
        novel_id: Uuid,
        path: &ReadingPath,
    ) -> Result<Uuid, GatewayError>;

    /// 更新已存在的阅读路径
    async fn update_path(
        &self,
        novel_id: Uuid,
        path_id: Uuid,
        path: &ReadingPath,
    ) -> Result<(), GatewayError>;
}

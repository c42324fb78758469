//! Session Manager Port - 编辑会话生命周期管理
//!
//! 一个编辑会话对应一位作者对一部小说的一次路径编辑，
//! 持有路径构建器草稿。所有状态存储在内存中，具体实现在
//! infrastructure/memory 层。
//!
//! busy 标记: 会话有网关操作在途时（加载/保存），所有草稿
//! 修改与再次提交都被拒绝，避免在途的加载结果与本地编辑竞争。

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::chapter::ChapterId;
use crate::domain::path::{PathBuilder, PathError, PathStep};

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),

    #[error("Session is busy: {0}")]
    Busy(String),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// 编辑会话状态（in-memory）
#[derive(Debug, Clone)]
pub struct EditSession {
    pub id: String,
    pub novel_id: Uuid,
    /// 已持久化路径的 ID；尚未保存过时为 None
    pub path_id: Option<Uuid>,
    pub builder: PathBuilder,
    pub busy: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl EditSession {
    pub fn new(novel_id: Uuid, path_id: Option<Uuid>, builder: PathBuilder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            novel_id,
            path_id,
            builder,
            busy: false,
            created_at: now,
            last_activity: now,
        }
    }
}

/// Session Manager Port
///
/// 草稿修改统一经由本端口，在会话条目内原子执行并检查 busy 标记。
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: EditSession) -> Result<String, SessionError>;

    /// 获取会话快照
    fn get(&self, id: &str) -> Result<EditSession, SessionError>;

    /// 向草稿追加章节
    fn select_chapter(
        &self,
        id: &str,
        chapter_id: ChapterId,
        rationale: Option<String>,
    ) -> Result<PathStep, SessionError>;

    /// 移除草稿最后一步
    fn remove_last_step(&self, id: &str) -> Result<Option<PathStep>, SessionError>;

    /// 更新步骤理由
    fn update_rationale(
        &self,
        id: &str,
        chapter_id: ChapterId,
        rationale: String,
    ) -> Result<(), SessionError>;

    /// 整体替换草稿（加载/取消时的对账）
    fn reset_draft(&self, id: &str, steps: Vec<PathStep>) -> Result<(), SessionError>;

    /// 记录已持久化的路径 ID（首次保存成功后）
    fn set_path_id(&self, id: &str, path_id: Uuid) -> Result<(), SessionError>;

    /// 标记网关操作开始并返回会话快照；会话已忙时失败
    ///
    /// 置忙与取快照在同一条目锁内完成，快照之后、置忙之前
    /// 不存在任何并发修改可以插入的窗口。
    fn begin_io(&self, id: &str) -> Result<EditSession, SessionError>;

    /// 标记网关操作结束
    fn end_io(&self, id: &str);

    /// 检查会话是否有效
    fn is_valid(&self, id: &str) -> bool;

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 更新最后活动时间
    fn touch(&self, id: &str);

    /// 获取所有过期会话的 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;
}

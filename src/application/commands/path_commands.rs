//! Path Commands - 路径草稿相关命令

use uuid::Uuid;

use crate::domain::chapter::ChapterId;
use crate::domain::path::PathStep;

/// 选择章节命令 - 把章节追加到草稿末尾
#[derive(Debug, Clone)]
pub struct SelectChapterCommand {
    pub session_id: String,
    pub chapter_id: ChapterId,
    pub rationale: Option<String>,
}

/// 选择章节响应
#[derive(Debug, Clone)]
pub struct SelectChapterResponse {
    pub session_id: String,
    pub step: PathStep,
    pub step_count: usize,
}

/// 移除最后一步命令
#[derive(Debug, Clone)]
pub struct RemoveLastStepCommand {
    pub session_id: String,
}

/// 移除最后一步响应
#[derive(Debug, Clone)]
pub struct RemoveLastStepResponse {
    pub session_id: String,
    /// 被移除的步骤；草稿本来就为空时为 None
    pub removed: Option<PathStep>,
    pub step_count: usize,
}

/// 更新步骤理由命令
#[derive(Debug, Clone)]
pub struct UpdateStepRationaleCommand {
    pub session_id: String,
    pub chapter_id: ChapterId,
    pub rationale: String,
}

/// 放弃草稿命令 - 重新拉取已保存路径并对账
#[derive(Debug, Clone)]
pub struct DiscardDraftCommand {
    pub session_id: String,
}

/// 放弃草稿响应
#[derive(Debug, Clone)]
pub struct DiscardDraftResponse {
    pub session_id: String,
    pub steps: Vec<PathStep>,
}

/// 保存路径命令 - 校验并提交到持久化网关
#[derive(Debug, Clone)]
pub struct SavePathCommand {
    pub session_id: String,
    pub name: String,
    pub description: String,
}

/// 保存路径响应
#[derive(Debug, Clone)]
pub struct SavePathResponse {
    pub session_id: String,
    pub path_id: Uuid,
    /// true 表示首次创建，false 表示覆盖更新
    pub created: bool,
    pub step_count: usize,
}

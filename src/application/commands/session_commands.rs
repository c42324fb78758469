//! Session Commands - 编辑会话相关命令

use uuid::Uuid;

use crate::domain::path::PathStep;

/// 打开编辑会话命令 - 拉取章节树并装载已保存的推荐路径
#[derive(Debug, Clone)]
pub struct OpenEditSessionCommand {
    pub novel_id: Uuid,
}

/// 打开编辑会话响应
#[derive(Debug, Clone)]
pub struct OpenEditSessionResponse {
    pub session_id: String,
    pub novel_id: Uuid,
    /// 已有推荐路径时为其 ID
    pub path_id: Option<Uuid>,
    /// 装载进草稿的步骤（无已保存路径时为空）
    pub steps: Vec<PathStep>,
}

/// 关闭编辑会话命令
#[derive(Debug, Clone)]
pub struct CloseEditSessionCommand {
    pub session_id: String,
}

/// 关闭编辑会话响应
#[derive(Debug, Clone)]
pub struct CloseEditSessionResponse {
    pub session_id: String,
}

//! Path Queries

/// 下一步候选章节查询
#[derive(Debug, Clone)]
pub struct GetNextCandidates {
    pub session_id: String,
}

/// 草稿状态查询
#[derive(Debug, Clone)]
pub struct GetDraftState {
    pub session_id: String,
}

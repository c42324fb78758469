//! Data Transfer Objects

use serde::Serialize;

use crate::domain::path::PathStep;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// 共享 DTOs
// ============================================================================

/// 路径步骤
#[derive(Debug, Serialize)]
pub struct StepDto {
    pub chapter_id: uuid::Uuid,
    pub chapter_title: String,
    pub rationale: String,
}

impl From<&PathStep> for StepDto {
    fn from(step: &PathStep) -> Self {
        Self {
            chapter_id: *step.chapter_id().as_uuid(),
            chapter_title: step.chapter_title().to_string(),
            rationale: step.rationale().to_string(),
        }
    }
}

impl From<PathStep> for StepDto {
    fn from(step: PathStep) -> Self {
        Self::from(&step)
    }
}

//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{GatewayError, SessionError};
use crate::domain::path::PathError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 业务规则违反（相邻性 / 根章节 / 空路径）
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// 会话忙（网关操作未结束）
    #[error("Session busy: {0}")]
    Busy(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 网关错误（平台后端）
    #[error("Gateway error: {0}")]
    GatewayError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建业务规则违反错误
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => Self::not_found("EditSession", id),
            SessionError::AlreadyExists(id) => {
                Self::InvalidState(format!("Session already exists: {}", id))
            }
            SessionError::Busy(id) => Self::Busy(id),
            SessionError::Path(e) => Self::BusinessRuleViolation(e.to_string()),
        }
    }
}

impl From<PathError> for ApplicationError {
    fn from(err: PathError) -> Self {
        Self::BusinessRuleViolation(err.to_string())
    }
}

impl From<GatewayError> for ApplicationError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(msg) => Self::not_found("BackendResource", msg),
            other => Self::GatewayError(other.to_string()),
        }
    }
}

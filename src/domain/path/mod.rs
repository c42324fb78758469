//! Path Context - 阅读路径限界上下文
//!
//! 职责:
//! - 路径步骤实体与阅读路径聚合
//! - 路径构建状态机（逐步追加、尾部截断、理由编辑）
//! - 相邻性不变量的增量校验

mod builder;
mod entities;
mod errors;

pub use builder::{PathBuilder, DEFAULT_ROOT_RATIONALE, DEFAULT_STEP_RATIONALE};
pub use entities::{PathStep, ReadingPath, PATH_TYPE_AUTHOR_RECOMMENDED};
pub use errors::PathError;

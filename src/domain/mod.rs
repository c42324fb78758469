//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Chapter Context: 分支章节树
//! - Path Context: 推荐阅读路径构建

pub mod chapter;
pub mod path;

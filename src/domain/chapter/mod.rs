//! Chapter Context - 章节限界上下文
//!
//! 职责:
//! - 分支章节树（森林）的只读模型
//! - 按 ID 的章节查找
//! - 根集合 / 直接子章节查询

mod tree;
mod value_objects;

pub use tree::{ChapterForest, ChapterNode, MAX_TREE_DEPTH};
pub use value_objects::ChapterId;

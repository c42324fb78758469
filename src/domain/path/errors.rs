//! Path Context - Errors

use thiserror::Error;

use crate::domain::chapter::ChapterId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("非法的章节选择: {chapter_id} 不是 {last_chapter_id} 的直接子章节")]
    InvalidAdjacency {
        chapter_id: ChapterId,
        last_chapter_id: ChapterId,
    },

    #[error("起始章节必须是根章节: {0}")]
    NotARoot(ChapterId),

    #[error("章节不在章节树中: {0}")]
    UnknownChapter(ChapterId),

    #[error("阅读路径不能为空")]
    EmptyPath,
}

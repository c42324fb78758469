//! Path Context - Entities

use serde::{Deserialize, Serialize};

use crate::domain::chapter::ChapterId;

/// 作者推荐路径的类型标记（提交时固定）
pub const PATH_TYPE_AUTHOR_RECOMMENDED: &str = "author_recommended";

/// 路径步骤 - 阅读路径中的一步
///
/// 章节标题为展示用的冗余字段，理由文本可以为空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    chapter_id: ChapterId,
    chapter_title: String,
    rationale: String,
}

impl PathStep {
    pub fn new(
        chapter_id: ChapterId,
        chapter_title: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            chapter_id,
            chapter_title: chapter_title.into(),
            rationale: rationale.into(),
        }
    }

    pub fn chapter_id(&self) -> &ChapterId {
        &self.chapter_id
    }

    pub fn chapter_title(&self) -> &str {
        &self.chapter_title
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn set_rationale(&mut self, rationale: impl Into<String>) {
        self.rationale = rationale.into();
    }
}

/// 阅读路径 - 提交/加载用的聚合形态
///
/// 不变量: steps 中每相邻两步满足父子关系，首步为根章节。
/// 该不变量由 PathBuilder 增量保证，ReadingPath 本身只是有序载体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPath {
    name: String,
    description: String,
    path_type: String,
    steps: Vec<PathStep>,
}

impl ReadingPath {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<PathStep>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            path_type: PATH_TYPE_AUTHOR_RECOMMENDED.to_string(),
            steps,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn path_type(&self) -> &str {
        &self.path_type
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

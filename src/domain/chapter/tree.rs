//! Chapter Context - 章节树
//!
//! 分支小说的章节组织为一片有序森林：每个章节可以有多个子章节，
//! 多个根章节代表不同的开篇。树由平台后端提供，本服务只读。
//!
//! 不变量:
//! - 无环，每个子章节只属于一个父章节
//! - 根章节的顺序与子章节的顺序均有意义（展示顺序）

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::ChapterId;

/// 树查找的最大递归深度
///
/// 章节树来自外部协作方，schema 不受本服务控制。
/// 深度上限与访问集合一起防御畸形输入（意外的环或超深分支）。
pub const MAX_TREE_DEPTH: usize = 512;

/// 章节树节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNode {
    id: ChapterId,
    title: String,
    word_count: u32,
    author_id: Uuid,
    children: Vec<ChapterNode>,
}

impl ChapterNode {
    pub fn new(
        id: ChapterId,
        title: impl Into<String>,
        word_count: u32,
        author_id: Uuid,
    ) -> Result<Self, &'static str> {
        let title = title.into();
        if title.is_empty() {
            return Err("章节标题不能为空");
        }
        Ok(Self {
            id,
            title,
            word_count,
            author_id,
            children: Vec::new(),
        })
    }

    /// 设置子章节（构建树时使用）
    pub fn with_children(mut self, children: Vec<ChapterNode>) -> Self {
        self.children = children;
        self
    }

    pub fn add_child(&mut self, child: ChapterNode) {
        self.children.push(child);
    }

    pub fn id(&self) -> &ChapterId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub fn author_id(&self) -> &Uuid {
        &self.author_id
    }

    pub fn children(&self) -> &[ChapterNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// 章节森林
///
/// 一部小说的全部章节树。可能有多个根（多个开篇分支）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterForest {
    roots: Vec<ChapterNode>,
}

impl ChapterForest {
    pub fn new(roots: Vec<ChapterNode>) -> Self {
        Self { roots }
    }

    /// 根章节集合（有序）
    pub fn roots(&self) -> &[ChapterNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// 森林中的章节总数（重复 ID 只计一次）
    pub fn len(&self) -> usize {
        fn count(node: &ChapterNode, visited: &mut HashSet<ChapterId>, depth: usize) -> usize {
            if depth > MAX_TREE_DEPTH || !visited.insert(node.id) {
                return 0;
            }
            1 + node
                .children
                .iter()
                .map(|child| count(child, visited, depth + 1))
                .sum::<usize>()
        }
        let mut visited = HashSet::new();
        self.roots.iter().map(|root| count(root, &mut visited, 0)).sum()
    }

    /// 按 ID 深度优先查找章节，返回首个匹配
    pub fn find(&self, id: &ChapterId) -> Option<&ChapterNode> {
        let mut visited = HashSet::new();
        self.roots
            .iter()
            .find_map(|root| Self::find_in(root, id, &mut visited, 0))
    }

    fn find_in<'a>(
        node: &'a ChapterNode,
        id: &ChapterId,
        visited: &mut HashSet<ChapterId>,
        depth: usize,
    ) -> Option<&'a ChapterNode> {
        // 重复 ID 或超深分支视为畸形输入，放弃该分支
        if depth > MAX_TREE_DEPTH || !visited.insert(node.id) {
            return None;
        }
        if node.id == *id {
            return Some(node);
        }
        node.children
            .iter()
            .find_map(|child| Self::find_in(child, id, visited, depth + 1))
    }

    /// 指定章节的直接子章节；章节不存在或为叶子时返回空
    pub fn children_of(&self, id: &ChapterId) -> &[ChapterNode] {
        self.find(id).map(|node| node.children()).unwrap_or(&[])
    }

    pub fn contains(&self, id: &ChapterId) -> bool {
        self.find(id).is_some()
    }

    /// 是否为根章节
    pub fn is_root(&self, id: &ChapterId) -> bool {
        self.roots.iter().any(|root| root.id == *id)
    }
}

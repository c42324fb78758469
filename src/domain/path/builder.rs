//! Path Context - 路径构建状态机
//!
//! 在一棵只读章节树上逐步构建一条从根出发的阅读路径。
//!
//! 不变量:
//! - 草稿中每相邻两步 (i, i+1)，第 i+1 步章节是第 i 步章节的直接子章节
//! - 首步章节必须是声明的根章节
//! - 任何失败的操作不产生部分修改
//!
//! 相邻性在每次追加时增量校验，而不是提交时整体校验；
//! 中间步骤的删除不被支持，只允许从尾部截断。

use crate::domain::chapter::{ChapterForest, ChapterId, ChapterNode};

use super::{PathError, PathStep, ReadingPath};

/// 首步的默认理由文本
pub const DEFAULT_ROOT_RATIONALE: &str = "起始章节";

/// 后续步骤的默认理由文本
pub const DEFAULT_STEP_RATIONALE: &str = "路径选择";

/// 路径构建器
///
/// 一个编辑会话持有一个构建器；章节树在会话期间只读。
#[derive(Debug, Clone)]
pub struct PathBuilder {
    forest: ChapterForest,
    steps: Vec<PathStep>,
}

impl PathBuilder {
    pub fn new(forest: ChapterForest) -> Self {
        Self {
            forest,
            steps: Vec::new(),
        }
    }

    /// 尝试把章节追加到草稿末尾
    ///
    /// - 草稿为空: 章节必须是根章节
    /// - 草稿非空: 章节必须是最后一步章节的直接子章节
    ///
    /// 成功时返回追加的步骤；失败时草稿不变。
    pub fn select_chapter(
        &mut self,
        chapter_id: ChapterId,
        rationale: Option<String>,
    ) -> Result<PathStep, PathError> {
        let node = self
            .forest
            .find(&chapter_id)
            .ok_or(PathError::UnknownChapter(chapter_id))?;

        let default_rationale = match self.steps.last() {
            None => {
                if !self.forest.is_root(&chapter_id) {
                    return Err(PathError::NotARoot(chapter_id));
                }
                DEFAULT_ROOT_RATIONALE
            }
            Some(last) => {
                let last_id = *last.chapter_id();
                let last_node = self
                    .forest
                    .find(&last_id)
                    .ok_or(PathError::UnknownChapter(last_id))?;
                if !last_node.children().iter().any(|c| *c.id() == chapter_id) {
                    return Err(PathError::InvalidAdjacency {
                        chapter_id,
                        last_chapter_id: last_id,
                    });
                }
                DEFAULT_STEP_RATIONALE
            }
        };

        let step = PathStep::new(
            chapter_id,
            node.title(),
            rationale.unwrap_or_else(|| default_rationale.to_string()),
        );
        self.steps.push(step.clone());
        Ok(step)
    }

    /// 移除最后一步；草稿为空时无操作
    pub fn remove_last_step(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// 更新指定章节步骤的理由文本；无匹配时静默无操作
    pub fn update_step_rationale(&mut self, chapter_id: &ChapterId, rationale: impl Into<String>) {
        if let Some(step) = self.steps.iter_mut().find(|s| s.chapter_id() == chapter_id) {
            step.set_rationale(rationale);
        }
    }

    /// 下一步候选章节（纯查询）
    ///
    /// 草稿为空时返回全部根章节；否则返回最后一步章节的直接子章节。
    /// 到达叶子或最后一步章节不在树中时返回空。
    pub fn next_candidates(&self) -> &[ChapterNode] {
        match self.steps.last() {
            None => self.forest.roots(),
            Some(last) => self.forest.children_of(last.chapter_id()),
        }
    }

    /// 整体替换草稿（加载已保存路径 / 取消编辑时使用）
    pub fn reset(&mut self, steps: Vec<PathStep>) {
        self.steps = steps;
    }

    /// 提交前校验并序列化为阅读路径
    ///
    /// 空草稿不可提交。
    pub fn to_reading_path(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ReadingPath, PathError> {
        if self.steps.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Ok(ReadingPath::new(name, description, self.steps.clone()))
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

    pub fn forest(&self) -> &ChapterForest {
        &self.forest
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use uuid::Uuid;

    use super::*;

    fn node(title: &str) -> ChapterNode {
        ChapterNode::new(ChapterId::new(), title, 2000, Uuid::new_v4()).unwrap()
    }

    /// A -> [B, C], B -> [D]
    fn sample() -> (PathBuilder, ChapterId, ChapterId, ChapterId, ChapterId) {
        let d = node("D");
        let b = node("B").with_children(vec![d.clone()]);
        let c = node("C");
        let a = node("A").with_children(vec![b.clone(), c.clone()]);
        let forest = ChapterForest::new(vec![a.clone()]);
        (PathBuilder::new(forest), *a.id(), *b.id(), *c.id(), *d.id())
    }

    #[test]
    fn test_select_walk_and_leaf() {
        let (mut builder, a, b, _c, d) = sample();

        assert!(builder.select_chapter(a, None).is_ok());
        assert_eq!(builder.len(), 1);

        // D 不是 A 的直接子章节
        let err = builder.select_chapter(d, None).unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidAdjacency {
                chapter_id: d,
                last_chapter_id: a
            }
        );
        assert_eq!(builder.len(), 1, "失败的选择不得修改草稿");

        assert!(builder.select_chapter(b, None).is_ok());
        assert!(builder.select_chapter(d, None).is_ok());
        assert_eq!(builder.len(), 3);

        // D 是叶子，无候选
        assert!(builder.next_candidates().is_empty());
    }

    #[test]
    fn test_first_step_must_be_root() {
        let (mut builder, _a, b, _c, _d) = sample();
        assert_eq!(
            builder.select_chapter(b, None).unwrap_err(),
            PathError::NotARoot(b)
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn test_unknown_chapter_rejected() {
        let (mut builder, _a, _b, _c, _d) = sample();
        let stranger = ChapterId::new();
        assert_eq!(
            builder.select_chapter(stranger, None).unwrap_err(),
            PathError::UnknownChapter(stranger)
        );
    }

    #[test]
    fn test_default_rationales() {
        let (mut builder, a, b, _c, _d) = sample();
        builder.select_chapter(a, None).unwrap();
        builder.select_chapter(b, Some("关键分支".to_string())).unwrap();

        assert_eq!(builder.steps()[0].rationale(), DEFAULT_ROOT_RATIONALE);
        assert_eq!(builder.steps()[1].rationale(), "关键分支");
    }

    #[test]
    fn test_remove_last_step_truncates_to_empty() {
        let (mut builder, a, b, _c, d) = sample();
        builder.select_chapter(a, None).unwrap();
        builder.select_chapter(b, None).unwrap();
        builder.select_chapter(d, None).unwrap();

        assert_eq!(*builder.remove_last_step().unwrap().chapter_id(), d);
        assert_eq!(*builder.remove_last_step().unwrap().chapter_id(), b);
        assert_eq!(*builder.remove_last_step().unwrap().chapter_id(), a);
        assert!(builder.remove_last_step().is_none());
        assert!(builder.remove_last_step().is_none(), "空草稿上截断是无操作");
    }

    #[test]
    fn test_candidates_on_empty_path_are_roots() {
        let (builder, a, _b, _c, _d) = sample();
        let roots: Vec<_> = builder.next_candidates().iter().map(|n| *n.id()).collect();
        assert_eq!(roots, vec![a]);
    }

    #[test]
    fn test_candidates_after_select() {
        let (mut builder, a, b, c, _d) = sample();
        builder.select_chapter(a, None).unwrap();
        let candidates: Vec<_> = builder.next_candidates().iter().map(|n| *n.id()).collect();
        assert_eq!(candidates, vec![b, c]);
    }

    #[test]
    fn test_update_step_rationale_touches_only_match() {
        let (mut builder, a, b, _c, d) = sample();
        builder.select_chapter(a, None).unwrap();
        builder.select_chapter(b, None).unwrap();
        builder.select_chapter(d, None).unwrap();

        builder.update_step_rationale(&b, "转折点");

        assert_eq!(builder.steps()[0].rationale(), DEFAULT_ROOT_RATIONALE);
        assert_eq!(builder.steps()[1].rationale(), "转折点");
        assert_eq!(builder.steps()[2].rationale(), DEFAULT_STEP_RATIONALE);

        // 无匹配时静默无操作
        builder.update_step_rationale(&ChapterId::new(), "无效");
        assert_eq!(builder.steps()[1].rationale(), "转折点");
    }

    #[test]
    fn test_empty_path_not_submittable() {
        let (builder, _a, _b, _c, _d) = sample();
        assert_eq!(
            builder.to_reading_path("主线", "推荐主线").unwrap_err(),
            PathError::EmptyPath
        );
    }

    #[test]
    fn test_submit_serializes_draft() {
        let (mut builder, a, b, _c, _d) = sample();
        builder.select_chapter(a, None).unwrap();
        builder.select_chapter(b, None).unwrap();

        let path = builder.to_reading_path("主线", "推荐主线").unwrap();
        assert_eq!(path.name(), "主线");
        assert_eq!(path.len(), 2);
        assert_eq!(*path.steps()[1].chapter_id(), b);
    }

    #[test]
    fn test_reset_replaces_draft() {
        let (mut builder, a, b, _c, _d) = sample();
        builder.select_chapter(a, None).unwrap();

        let loaded = vec![
            PathStep::new(a, "A", "起始章节"),
            PathStep::new(b, "B", "保存过的理由"),
        ];
        builder.reset(loaded);
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.steps()[1].rationale(), "保存过的理由");

        builder.reset(Vec::new());
        assert!(builder.is_empty());
    }

    // ------------------------------------------------------------------
    // 属性测试: 随机树上的随机合法游走始终满足相邻性不变量
    // ------------------------------------------------------------------

    /// 构建满树: 第 i 层每个节点有 shape[i] 个子节点
    fn full_tree(shape: &[usize], level: usize, counter: &mut u32) -> ChapterNode {
        *counter += 1;
        let mut n = node(&format!("ch-{counter}"));
        if let Some(&width) = shape.get(level) {
            for _ in 0..width {
                n.add_child(full_tree(shape, level + 1, counter));
            }
        }
        n
    }

    fn assert_invariant(builder: &PathBuilder) {
        let steps = builder.steps();
        if let Some(first) = steps.first() {
            assert!(builder.forest().is_root(first.chapter_id()));
        }
        for pair in steps.windows(2) {
            let children = builder.forest().children_of(pair[0].chapter_id());
            assert!(
                children.iter().any(|c| c.id() == pair[1].chapter_id()),
                "相邻两步必须满足父子关系"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_valid_walk_preserves_adjacency(
            shape in proptest::collection::vec(1usize..4, 0..4),
            choices in proptest::collection::vec(0usize..16, 0..10),
        ) {
            let mut counter = 0;
            let root = full_tree(&shape, 0, &mut counter);
            let forest = ChapterForest::new(vec![root]);
            let mut builder = PathBuilder::new(forest);

            for &choice in &choices {
                let candidates: Vec<ChapterId> =
                    builder.next_candidates().iter().map(|n| *n.id()).collect();
                if candidates.is_empty() {
                    break;
                }
                let picked = candidates[choice % candidates.len()];
                prop_assert!(builder.select_chapter(picked, None).is_ok());
                assert_invariant(&builder);
            }

            // 尾部截断是最近一次成功追加的逆操作
            while let Some(last) = builder.steps().last().cloned() {
                let before = builder.len();
                let popped = builder.remove_last_step().unwrap();
                prop_assert_eq!(popped.chapter_id(), last.chapter_id());
                prop_assert_eq!(builder.len(), before - 1);
                assert_invariant(&builder);
            }
        }

        #[test]
        fn prop_non_child_selection_fails(
            shape in proptest::collection::vec(2usize..4, 1..3),
        ) {
            let mut counter = 0;
            let root = full_tree(&shape, 0, &mut counter);
            let root_id = *root.id();
            // 第二个根，不与第一个根相连
            let orphan = node("孤立章节");
            let orphan_id = *orphan.id();
            let forest = ChapterForest::new(vec![root, orphan]);
            let mut builder = PathBuilder::new(forest);

            builder.select_chapter(root_id, None).unwrap();
            // 另一个根不是当前末步的子章节
            prop_assert!(builder.select_chapter(orphan_id, None).is_err());
            prop_assert_eq!(builder.len(), 1);
        }
    }
}

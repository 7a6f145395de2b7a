//! Ordered rich-content blocks
//!
//! Articles and the world description are edited as an ordered sequence of
//! text and image blocks. The same edit protocol applies everywhere: insert
//! after an index, update or delete by id, swap with a neighbor. An empty
//! sequence is a valid state (the editor shows a "start writing" affordance).

use serde::{Deserialize, Serialize};

use crate::ids::BlockId;

/// What a content block holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    /// Content is a self-contained image payload (data URI)
    Image,
}

/// A single orderable unit of article content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            kind: BlockKind::Text,
            content: content.into(),
        }
    }

    pub fn empty(kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            content: String::new(),
        }
    }
}

/// Direction for neighbor swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// An ordered, fully-owned block sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blocks(pub Vec<ContentBlock>);

impl Blocks {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single_text(content: impl Into<String>) -> Self {
        Self(vec![ContentBlock::text(content)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.0.iter()
    }

    /// Insert a fresh empty block of the given kind immediately after `after`,
    /// or at the front when `after` is `None`. Returns the new block's id.
    pub fn insert_after(&mut self, after: Option<usize>, kind: BlockKind) -> BlockId {
        let block = ContentBlock::empty(kind);
        let id = block.id;
        let at = match after {
            Some(i) => (i + 1).min(self.0.len()),
            None => 0,
        };
        self.0.insert(at, block);
        id
    }

    /// Append an already-built block (used when committing AI text or a
    /// rasterized image).
    pub fn push(&mut self, block: ContentBlock) {
        self.0.push(block);
    }

    /// Replace one block's content by id. No-op if the id is not present.
    pub fn update_content(&mut self, id: BlockId, content: impl Into<String>) {
        if let Some(block) = self.0.iter_mut().find(|b| b.id == id) {
            block.content = content.into();
        }
    }

    /// Remove one block by id. Returns whether anything was removed; removing
    /// the last block leaves a valid empty sequence.
    pub fn remove(&mut self, id: BlockId) -> bool {
        let before = self.0.len();
        self.0.retain(|b| b.id != id);
        self.0.len() != before
    }

    /// Swap the block at `index` with its neighbor. A no-op at either boundary.
    pub fn move_block(&mut self, index: usize, direction: MoveDirection) {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => {
                let next = index + 1;
                (next < self.0.len()).then_some(next)
            }
        };
        if let Some(target) = target {
            if index < self.0.len() {
                self.0.swap(index, target);
            }
        }
    }

    /// Migration-on-read view: when the structured sequence is empty but a
    /// legacy flat string exists, synthesize a single text block from it.
    pub fn effective(&self, legacy: &str) -> Blocks {
        if !self.0.is_empty() || legacy.is_empty() {
            self.clone()
        } else {
            Blocks::single_text(legacy)
        }
    }
}

impl From<Vec<ContentBlock>> for Blocks {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_texts() -> Blocks {
        Blocks(vec![
            ContentBlock::text("a"),
            ContentBlock::text("b"),
            ContentBlock::text("c"),
        ])
    }

    #[test]
    fn test_insert_after_index() {
        let mut blocks = three_texts();
        blocks.insert_after(Some(0), BlockKind::Image);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks.0[1].kind, BlockKind::Image);
        assert!(blocks.0[1].content.is_empty());
    }

    #[test]
    fn test_insert_at_front() {
        let mut blocks = three_texts();
        let id = blocks.insert_after(None, BlockKind::Text);
        assert_eq!(blocks.0[0].id, id);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut blocks = three_texts();
        let snapshot = blocks.clone();
        blocks.update_content(BlockId::new(), "changed");
        assert_eq!(blocks, snapshot);
    }

    #[test]
    fn test_delete_last_block_leaves_empty_sequence() {
        let mut blocks = Blocks::single_text("only");
        let id = blocks.0[0].id;
        assert!(blocks.remove(id));
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let mut blocks = three_texts();
        let snapshot = blocks.clone();
        blocks.move_block(0, MoveDirection::Up);
        assert_eq!(blocks, snapshot);
        blocks.move_block(2, MoveDirection::Down);
        assert_eq!(blocks, snapshot);
    }

    #[test]
    fn test_move_swaps_neighbors() {
        let mut blocks = three_texts();
        blocks.move_block(1, MoveDirection::Up);
        assert_eq!(blocks.0[0].content, "b");
        assert_eq!(blocks.0[1].content, "a");
        blocks.move_block(0, MoveDirection::Down);
        assert_eq!(blocks.0[0].content, "a");
    }

    #[test]
    fn test_effective_synthesizes_from_legacy() {
        let blocks = Blocks::new();
        let effective = blocks.effective("old flat text");
        assert_eq!(effective.len(), 1);
        assert_eq!(effective.0[0].content, "old flat text");
        assert_eq!(effective.0[0].kind, BlockKind::Text);
    }

    #[test]
    fn test_effective_prefers_structured_blocks() {
        let blocks = Blocks::single_text("structured");
        let effective = blocks.effective("legacy");
        assert_eq!(effective.0[0].content, "structured");
    }

    #[test]
    fn test_block_serde_shape() {
        let block = ContentBlock::text("hello");
        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "hello");
    }
}

//! Articles - titled, categorized lore and concept entries
//!
//! Concepts and lore entries are structurally identical; both are articles.
//! Categories are plain strings with no registry: articles sharing a category
//! string are "in the same group" purely by string equality, and the group
//! list is derived on read.

use serde::{Deserialize, Serialize};

use crate::entities::content_block::Blocks;
use crate::ids::ArticleId;
use crate::value_objects::ArticlePatch;

/// Which collection an article lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleKind {
    Concept,
    Lore,
}

impl ArticleKind {
    /// Bucket used when an article has no category.
    pub fn default_category(&self) -> &'static str {
        match self {
            ArticleKind::Concept => "General",
            ArticleKind::Lore => "Uncategorized",
        }
    }
}

/// A titled piece of world knowledge, edited as content blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub category: String,
    /// Legacy flat content, superseded by `blocks` once populated
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub blocks: Blocks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Article {
    /// A fresh placeholder article seeded with one empty text block, the way
    /// the editor opens straight into writing.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        let mut blocks = Blocks::new();
        blocks.insert_after(None, crate::entities::content_block::BlockKind::Text);
        Self {
            id: ArticleId::new(),
            title: title.into(),
            category: category.into(),
            content: String::new(),
            blocks,
            image: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = patch.cover_image {
            self.image = Some(image);
        }
    }

    /// Rendering surface: structured blocks, or the legacy string migrated on
    /// read when no blocks exist yet.
    pub fn effective_blocks(&self) -> Blocks {
        self.blocks.effective(&self.content)
    }

    /// Grouping key, defaulting empty categories into the kind's bucket.
    pub fn category_or_default(&self, kind: ArticleKind) -> &str {
        if self.category.is_empty() {
            kind.default_category()
        } else {
            &self.category
        }
    }
}

/// Distinct category strings across a set of articles, sorted for display.
pub fn derive_categories<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    kind: ArticleKind,
) -> Vec<String> {
    let mut categories: Vec<String> = articles
        .into_iter()
        .map(|a| a.category_or_default(kind).to_string())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

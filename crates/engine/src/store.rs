//! In-memory world document store
//!
//! Holds every loaded world plus the active selection. Every mutation routes
//! through one entry point that stamps the active world's `lastModified` from
//! the injected clock, so ordering over modification times is consistent no
//! matter which operation ran.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use worldloom_domain::{
    ArticleId, ArticleKind, ArticlePatch, BlockId, BlockKind, Blocks, CharacterId,
    CharacterPatch, ContentBlock, DomainError, EventId, EventPatch, MapId, MapPatch, MarkerId,
    MarkerPatch, MoveDirection, RelationId, TrackId, TrackPatch, World, WorldId, WorldPatch,
};

use crate::export;
use crate::ports::ClockPort;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("the last world cannot be deleted")]
    LastWorld,
    #[error("typed name does not match \"{expected}\"")]
    NameMismatch { expected: String },
    #[error("not a valid JSON file: {0}")]
    MalformedFile(String),
    #[error("not a valid world file")]
    InvalidDocument,
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Which block sequence an edit addresses: the world description or one
/// article's body. The same edit protocol applies to both.
#[derive(Debug, Clone, Copy)]
pub enum BlockTarget {
    WorldDescription,
    Article(ArticleKind, ArticleId),
}

/// A serialized world ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub json: String,
}

/// All loaded worlds plus the active selection. Never empty: construction
/// seeds a starter world and deletion refuses to remove the last one.
pub struct WorldStore {
    worlds: Vec<World>,
    active_id: WorldId,
    clock: Arc<dyn ClockPort>,
}

impl WorldStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        let starter = World::new_placeholder(clock.now());
        let active_id = starter.id;
        Self {
            worlds: vec![starter],
            active_id,
            clock,
        }
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn active_id(&self) -> WorldId {
        self.active_id
    }

    pub fn active(&self) -> &World {
        &self.worlds[self.active_index()]
    }

    pub fn set_active(&mut self, id: WorldId) -> Result<(), StoreError> {
        if !self.worlds.iter().any(|w| w.id == id) {
            return Err(DomainError::not_found("World", id.to_string()).into());
        }
        self.active_id = id;
        Ok(())
    }

    /// Append a fresh placeholder world and make it active.
    pub fn create_world(&mut self) -> WorldId {
        let world = World::new_placeholder(self.clock.now());
        let id = world.id;
        info!(world_id = %id, "created world");
        self.worlds.push(world);
        self.active_id = id;
        id
    }

    // The collection is seeded non-empty and delete refuses the last world,
    // so an active index always resolves.
    fn active_index(&self) -> usize {
        self.worlds
            .iter()
            .position(|w| w.id == self.active_id)
            .unwrap_or(0)
    }

    fn mutate_active<R>(&mut self, f: impl FnOnce(&mut World) -> R) -> R {
        let now = self.clock.now();
        let index = self.active_index();
        let world = &mut self.worlds[index];
        let out = f(world);
        world.touch(now);
        out
    }

    /// Fallible variant: the timestamp is only stamped when the operation
    /// succeeds, so a rejected edit leaves the document untouched.
    fn try_mutate_active<R>(
        &mut self,
        f: impl FnOnce(&mut World) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let now = self.clock.now();
        let index = self.active_index();
        let world = &mut self.worlds[index];
        let out = f(world)?;
        world.touch(now);
        Ok(out)
    }

    // =========================================================================
    // Top-level world edits
    // =========================================================================

    pub fn update_active(&mut self, patch: WorldPatch) {
        if patch.is_empty() {
            return;
        }
        self.mutate_active(|world| world.apply(patch));
    }

    // =========================================================================
    // Deletion (confirmation-gated)
    // =========================================================================

    /// Start the delete flow: returns the exact name the user must re-type.
    /// Errors immediately when this is the last world, before any prompt.
    pub fn request_delete_active(&self) -> Result<String, StoreError> {
        if self.worlds.len() <= 1 {
            return Err(StoreError::LastWorld);
        }
        Ok(self.active().name.clone())
    }

    /// Complete the delete flow. The typed name must match exactly.
    pub fn confirm_delete_active(&mut self, typed: &str) -> Result<(), StoreError> {
        if self.worlds.len() <= 1 {
            return Err(StoreError::LastWorld);
        }
        let expected = self.active().name.clone();
        if typed != expected {
            return Err(StoreError::NameMismatch { expected });
        }
        let index = self.active_index();
        let removed = self.worlds.remove(index);
        info!(world_id = %removed.id, name = %removed.name, "deleted world");
        self.active_id = self.worlds[0].id;
        Ok(())
    }

    // =========================================================================
    // Export / import
    // =========================================================================

    pub fn export_active(&self) -> Result<ExportFile, StoreError> {
        let world = self.active();
        let file = ExportFile {
            file_name: export::export_file_name(world),
            json: export::to_export_json(world)?,
        };
        debug!(world_id = %world.id, file = %file.file_name, "exported world");
        Ok(file)
    }

    /// Write the active world's export file into `dir`, returning its path.
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let file = self.export_active()?;
        let path = dir.join(&file.file_name);
        std::fs::write(&path, file.json)?;
        Ok(path)
    }

    /// Load an exported document, append it under a fresh id and activate it.
    /// Everything but the id is kept verbatim, `lastModified` included.
    pub fn import(&mut self, text: &str) -> Result<WorldId, StoreError> {
        let world = export::parse_import(text)?;
        let id = world.id;
        info!(world_id = %id, name = %world.name, "imported world");
        self.worlds.push(world);
        self.active_id = id;
        Ok(id)
    }

    // =========================================================================
    // Characters
    // =========================================================================

    pub fn add_character(&mut self) -> CharacterId {
        self.mutate_active(|world| world.add_character())
    }

    pub fn update_character(
        &mut self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let character = world
                .character_mut(id)
                .ok_or_else(|| DomainError::not_found("Character", id.to_string()))?;
            character.apply(patch);
            Ok(())
        })
    }

    /// Returns whether the id was present, so callers can reset a selection.
    pub fn remove_character(&mut self, id: CharacterId) -> bool {
        self.mutate_active(|world| world.remove_character(id))
    }

    /// Replace a character's description with generated text.
    pub fn set_character_description(
        &mut self,
        id: CharacterId,
        text: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.update_character(
            id,
            CharacterPatch {
                description: Some(text.into()),
                ..Default::default()
            },
        )
    }

    // =========================================================================
    // Articles (concepts and lore)
    // =========================================================================

    pub fn add_article(&mut self, kind: ArticleKind, category: Option<&str>) -> ArticleId {
        self.mutate_active(|world| world.add_article(kind, category))
    }

    pub fn update_article(
        &mut self,
        kind: ArticleKind,
        id: ArticleId,
        patch: ArticlePatch,
    ) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let article = world
                .article_mut(kind, id)
                .ok_or_else(|| DomainError::not_found("Article", id.to_string()))?;
            article.apply(patch);
            Ok(())
        })
    }

    pub fn remove_article(&mut self, kind: ArticleKind, id: ArticleId) -> bool {
        self.mutate_active(|world| world.remove_article(kind, id))
    }

    // =========================================================================
    // Block edits (world description and article bodies)
    // =========================================================================

    fn target_blocks(world: &mut World, target: BlockTarget) -> Result<&mut Blocks, StoreError> {
        match target {
            BlockTarget::WorldDescription => {
                world.description_blocks = world.effective_description_blocks();
                Ok(&mut world.description_blocks)
            }
            BlockTarget::Article(kind, id) => {
                let article = world
                    .article_mut(kind, id)
                    .ok_or_else(|| DomainError::not_found("Article", id.to_string()))?;
                article.blocks = article.effective_blocks();
                Ok(&mut article.blocks)
            }
        }
    }

    /// Insert an empty block after the given index (front when `None`).
    pub fn insert_block(
        &mut self,
        target: BlockTarget,
        after: Option<usize>,
        kind: BlockKind,
    ) -> Result<BlockId, StoreError> {
        self.try_mutate_active(|world| {
            Ok(Self::target_blocks(world, target)?.insert_after(after, kind))
        })
    }

    pub fn update_block(
        &mut self,
        target: BlockTarget,
        id: BlockId,
        content: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            Self::target_blocks(world, target)?.update_content(id, content);
            Ok(())
        })
    }

    pub fn remove_block(&mut self, target: BlockTarget, id: BlockId) -> Result<bool, StoreError> {
        self.try_mutate_active(|world| Ok(Self::target_blocks(world, target)?.remove(id)))
    }

    pub fn move_block(
        &mut self,
        target: BlockTarget,
        index: usize,
        direction: MoveDirection,
    ) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            Self::target_blocks(world, target)?.move_block(index, direction);
            Ok(())
        })
    }

    /// Append generated text as a new text block at the end of the sequence.
    pub fn append_text_block(
        &mut self,
        target: BlockTarget,
        text: impl Into<String>,
    ) -> Result<BlockId, StoreError> {
        self.try_mutate_active(|world| {
            let block = ContentBlock::text(text);
            let id = block.id;
            Self::target_blocks(world, target)?.push(block);
            Ok(id)
        })
    }

    // =========================================================================
    // Timeline
    // =========================================================================

    pub fn add_track(&mut self) -> TrackId {
        self.mutate_active(|world| world.add_track())
    }

    pub fn update_track(&mut self, id: TrackId, patch: TrackPatch) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let track = world
                .track_mut(id)
                .ok_or_else(|| DomainError::not_found("TimelineTrack", id.to_string()))?;
            track.apply(patch);
            Ok(())
        })
    }

    /// Delete a track; its events move to the first remaining track. The
    /// last track is protected.
    pub fn remove_track(&mut self, id: TrackId) -> Result<(), StoreError> {
        self.try_mutate_active(|world| Ok(world.remove_track(id)?))
    }

    pub fn add_event(&mut self) -> Result<EventId, StoreError> {
        self.try_mutate_active(|world| Ok(world.add_event()?))
    }

    pub fn update_event(&mut self, id: EventId, patch: EventPatch) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let event = world
                .event_mut(id)
                .ok_or_else(|| DomainError::not_found("TimelineEvent", id.to_string()))?;
            event.apply(patch);
            Ok(())
        })
    }

    pub fn remove_event(&mut self, id: EventId) -> bool {
        self.mutate_active(|world| world.remove_event(id))
    }

    // =========================================================================
    // Relations
    // =========================================================================

    pub fn add_relation(
        &mut self,
        source_id: CharacterId,
        target_id: CharacterId,
        label: impl Into<String>,
    ) -> Result<RelationId, StoreError> {
        self.try_mutate_active(|world| Ok(world.add_relation(source_id, target_id, label)?))
    }

    pub fn remove_relation(&mut self, id: RelationId) -> bool {
        self.mutate_active(|world| world.remove_relation(id))
    }

    // =========================================================================
    // Maps
    // =========================================================================

    pub fn add_map(&mut self) -> MapId {
        self.mutate_active(|world| world.add_map())
    }

    pub fn update_map(&mut self, id: MapId, patch: MapPatch) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let map = world
                .map_mut(id)
                .ok_or_else(|| DomainError::not_found("WorldMap", id.to_string()))?;
            map.apply(patch);
            Ok(())
        })
    }

    pub fn clear_map_background(&mut self, id: MapId) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let map = world
                .map_mut(id)
                .ok_or_else(|| DomainError::not_found("WorldMap", id.to_string()))?;
            map.clear_background();
            Ok(())
        })
    }

    pub fn remove_map(&mut self, id: MapId) -> bool {
        self.mutate_active(|world| world.remove_map(id))
    }

    pub fn add_marker(&mut self, map_id: MapId, x: f64, y: f64) -> Result<MarkerId, StoreError> {
        self.try_mutate_active(|world| {
            let map = world
                .map_mut(map_id)
                .ok_or_else(|| DomainError::not_found("WorldMap", map_id.to_string()))?;
            Ok(map.add_marker_at(x, y))
        })
    }

    pub fn update_marker(
        &mut self,
        map_id: MapId,
        marker_id: MarkerId,
        patch: MarkerPatch,
    ) -> Result<(), StoreError> {
        self.try_mutate_active(|world| {
            let map = world
                .map_mut(map_id)
                .ok_or_else(|| DomainError::not_found("WorldMap", map_id.to_string()))?;
            let marker = map
                .marker_mut(marker_id)
                .ok_or_else(|| DomainError::not_found("MapMarker", marker_id.to_string()))?;
            marker.apply(patch);
            Ok(())
        })
    }

    pub fn remove_marker(&mut self, map_id: MapId, marker_id: MarkerId) -> Result<bool, StoreError> {
        self.try_mutate_active(|world| {
            let map = world
                .map_mut(map_id)
                .ok_or_else(|| DomainError::not_found("WorldMap", map_id.to_string()))?;
            Ok(map.remove_marker(marker_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SteppingClock};
    use chrono::{TimeZone, Utc};

    fn fixed_store() -> WorldStore {
        let clock = FixedClock(Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts"));
        WorldStore::new(Arc::new(clock))
    }

    fn stepping_store() -> WorldStore {
        let start = Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts");
        WorldStore::new(Arc::new(SteppingClock::new(start)))
    }

    #[test]
    fn test_store_is_seeded_with_a_starter_world() {
        let store = fixed_store();
        assert_eq!(store.worlds().len(), 1);
        assert_eq!(store.active().timeline_tracks.len(), 1);
    }

    #[test]
    fn test_every_mutation_advances_last_modified() {
        let mut store = stepping_store();
        let before = store.active().last_modified;

        store.add_character();
        let after_character = store.active().last_modified;
        assert!(after_character > before);

        store.update_active(WorldPatch {
            genre: Some("Solarpunk".to_string()),
            ..Default::default()
        });
        assert!(store.active().last_modified > after_character);
    }

    #[test]
    fn test_empty_patch_does_not_touch_timestamp() {
        let mut store = stepping_store();
        let before = store.active().last_modified;
        store.update_active(WorldPatch::default());
        assert_eq!(store.active().last_modified, before);
    }

    #[test]
    fn test_failed_mutation_leaves_timestamp_alone() {
        let mut store = stepping_store();
        let before = store.active().last_modified;
        let missing = CharacterId::new();
        let result = store.update_character(missing, CharacterPatch::default());
        assert!(result.is_err());
        assert_eq!(store.active().last_modified, before);
    }

    #[test]
    fn test_create_world_activates_it() {
        let mut store = fixed_store();
        let first = store.active_id();
        let second = store.create_world();
        assert_ne!(first, second);
        assert_eq!(store.active_id(), second);
        assert_eq!(store.worlds().len(), 2);
    }

    mod deletion {
        use super::*;

        #[test]
        fn test_last_world_is_protected_before_prompt() {
            let store = fixed_store();
            assert!(matches!(
                store.request_delete_active(),
                Err(StoreError::LastWorld)
            ));
        }

        #[test]
        fn test_wrong_name_is_rejected() {
            let mut store = fixed_store();
            store.create_world();
            let err = store.confirm_delete_active("wrong name").expect_err("reject");
            assert!(matches!(err, StoreError::NameMismatch { .. }));
            assert_eq!(store.worlds().len(), 2);
        }

        #[test]
        fn test_exact_name_deletes_and_activates_first_remaining() {
            let mut store = fixed_store();
            let first = store.active_id();
            store.create_world();
            let name = store.request_delete_active().expect("name");
            store.confirm_delete_active(&name).expect("delete");
            assert_eq!(store.worlds().len(), 1);
            assert_eq!(store.active_id(), first);
        }
    }

    mod block_edits {
        use super::*;

        #[test]
        fn test_description_edit_migrates_legacy_text() {
            let mut store = fixed_store();
            let id = store
                .insert_block(BlockTarget::WorldDescription, Some(0), BlockKind::Text)
                .expect("insert");
            let blocks = &store.active().description_blocks;
            // Migrated legacy block first, inserted block after it.
            assert_eq!(blocks.len(), 2);
            assert_eq!(blocks.0[1].id, id);
        }

        #[test]
        fn test_article_block_roundtrip() {
            let mut store = fixed_store();
            let article = store.add_article(ArticleKind::Lore, Some("Magic"));
            let target = BlockTarget::Article(ArticleKind::Lore, article);
            let block = store
                .insert_block(target, Some(0), BlockKind::Text)
                .expect("insert");
            store.update_block(target, block, "ley lines").expect("update");
            let stored = store
                .active()
                .article(ArticleKind::Lore, article)
                .expect("article");
            assert_eq!(stored.blocks.0[1].content, "ley lines");
            assert!(store.remove_block(target, block).expect("remove"));
        }

        #[test]
        fn test_block_edit_on_missing_article_errors() {
            let mut store = fixed_store();
            let target = BlockTarget::Article(ArticleKind::Concept, ArticleId::new());
            let err = store
                .insert_block(target, None, BlockKind::Text)
                .expect_err("missing");
            assert!(matches!(err, StoreError::Domain(DomainError::NotFound { .. })));
        }
    }

    mod import_export {
        use super::*;

        #[test]
        fn test_roundtrip_preserves_content_under_fresh_id() {
            let mut store = fixed_store();
            let a = store.add_character();
            let b = store.add_character();
            store.add_relation(a, b, "rival").expect("relation");
            store.add_article(ArticleKind::Concept, Some("Physics"));

            let exported = store.export_active().expect("export");
            let original_id = store.active_id();
            let imported_id = store.import(&exported.json).expect("import");

            assert_ne!(imported_id, original_id);
            assert_eq!(store.active_id(), imported_id);
            let imported = store.active();
            assert_eq!(imported.characters.len(), 2);
            assert_eq!(imported.relations.len(), 1);
            assert_eq!(imported.concepts.len(), 1);
        }

        #[test]
        fn test_import_keeps_last_modified_verbatim() {
            let mut store = stepping_store();
            store.add_character();
            let exported = store.export_active().expect("export");
            let original = serde_json::to_value(store.active()).expect("to value");

            store.import(&exported.json).expect("import");
            let imported = serde_json::to_value(store.active()).expect("to value");

            assert_ne!(original["id"], imported["id"]);
            assert_eq!(original["lastModified"], imported["lastModified"]);
            let strip = |mut value: serde_json::Value| {
                if let Some(object) = value.as_object_mut() {
                    object.remove("id");
                }
                value
            };
            assert_eq!(strip(original), strip(imported));
        }

        #[test]
        fn test_export_file_name_tracks_world_name() {
            let mut store = fixed_store();
            store.update_active(WorldPatch {
                name: Some("Verdant Reach".to_string()),
                ..Default::default()
            });
            let exported = store.export_active().expect("export");
            assert_eq!(exported.file_name, "Verdant Reach_export.json");
        }

        #[test]
        fn test_malformed_import_leaves_store_unchanged() {
            let mut store = fixed_store();
            let before = store.worlds().len();
            assert!(store.import("{broken").is_err());
            assert!(store.import(r#"{"no": "identity"}"#).is_err());
            assert_eq!(store.worlds().len(), before);
        }
    }

    mod timeline_ops {
        use super::*;

        #[test]
        fn test_remove_track_protects_last_and_reassigns() {
            let mut store = fixed_store();
            let only = store.active().timeline_tracks[0].id;
            assert!(store.remove_track(only).is_err());

            let second = store.add_track();
            let event = store.add_event().expect("event");
            store
                .update_event(
                    event,
                    EventPatch {
                        track_id: Some(second),
                        ..Default::default()
                    },
                )
                .expect("update");
            store.remove_track(second).expect("remove");
            let world = store.active();
            assert_eq!(world.timeline[0].track_id, Some(only));
        }
    }
}

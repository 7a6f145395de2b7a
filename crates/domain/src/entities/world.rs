//! World - the top-level document aggregate
//!
//! A world owns every nested collection by value; an exported world JSON is
//! fully self-contained. All fields except the identity pair carry serde
//! defaults so a minimally-valid imported document (id + name) deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::article::{derive_categories, Article, ArticleKind};
use crate::entities::character::Character;
use crate::entities::content_block::Blocks;
use crate::entities::relation::Relation;
use crate::entities::timeline::{TimelineEvent, TimelineTrack};
use crate::entities::world_map::WorldMap;
use crate::error::DomainError;
use crate::ids::{
    ArticleId, CharacterId, EventId, MapId, RelationId, TrackId, WorldId,
};
use crate::value_objects::{ThemeColor, WorldPatch};

fn default_timestamp() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// One self-contained worldbuilding document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    pub id: WorldId,
    pub name: String,
    #[serde(default)]
    pub genre: String,
    /// Legacy flat description, superseded by `description_blocks`
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_blocks: Blocks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub theme: ThemeColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_color: Option<String>,
    /// Panel translucency in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_opacity: Option<f64>,
    /// Label appended to timeline years (e.g. "years", "AE")
    #[serde(default)]
    pub time_unit: String,
    #[serde(default)]
    pub concepts: Vec<Article>,
    #[serde(default)]
    pub lore: Vec<Article>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub timeline_tracks: Vec<TimelineTrack>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub maps: Vec<WorldMap>,
    #[serde(default = "default_timestamp")]
    pub last_modified: DateTime<Utc>,
}

impl World {
    /// A fresh placeholder world: one default track, empty collections, a
    /// seeded description block.
    pub fn new_placeholder(now: DateTime<Utc>) -> Self {
        let description = "Describe your new world here...".to_string();
        Self {
            id: WorldId::new(),
            name: "New World Project".to_string(),
            genre: "Undefined".to_string(),
            description_blocks: Blocks::single_text(&description),
            description,
            cover_image: None,
            theme: ThemeColor::Indigo,
            custom_background: Some("#0f172a".to_string()),
            custom_font_color: Some("#e2e8f0".to_string()),
            panel_color: Some("#1e293b".to_string()),
            panel_opacity: Some(0.7),
            time_unit: "years".to_string(),
            concepts: Vec::new(),
            lore: Vec::new(),
            characters: Vec::new(),
            timeline_tracks: vec![TimelineTrack::default_track()],
            timeline: Vec::new(),
            relations: Vec::new(),
            maps: Vec::new(),
            last_modified: now,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Refresh the modification stamp. Every store mutation ends here.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
    }

    /// Shallow-merge a partial set of top-level fields.
    pub fn apply(&mut self, patch: WorldPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(custom_background) = patch.custom_background {
            self.custom_background = Some(custom_background);
        }
        if let Some(custom_font_color) = patch.custom_font_color {
            self.custom_font_color = Some(custom_font_color);
        }
        if let Some(panel_color) = patch.panel_color {
            self.panel_color = Some(panel_color);
        }
        if let Some(panel_opacity) = patch.panel_opacity {
            self.panel_opacity = Some(panel_opacity.clamp(0.0, 1.0));
        }
        if let Some(time_unit) = patch.time_unit {
            self.time_unit = time_unit;
        }
    }

    /// Rendering surface for the description (migration-on-read).
    pub fn effective_description_blocks(&self) -> Blocks {
        self.description_blocks.effective(&self.description)
    }

    // =========================================================================
    // Articles (concepts and lore)
    // =========================================================================

    fn articles(&self, kind: ArticleKind) -> &Vec<Article> {
        match kind {
            ArticleKind::Concept => &self.concepts,
            ArticleKind::Lore => &self.lore,
        }
    }

    fn articles_mut(&mut self, kind: ArticleKind) -> &mut Vec<Article> {
        match kind {
            ArticleKind::Concept => &mut self.concepts,
            ArticleKind::Lore => &mut self.lore,
        }
    }

    /// Create a placeholder article in the given category (or the kind's
    /// default bucket), returning its id for selection.
    pub fn add_article(&mut self, kind: ArticleKind, category: Option<&str>) -> ArticleId {
        let category = category.unwrap_or(kind.default_category());
        let title = match kind {
            ArticleKind::Concept => "New Concept",
            ArticleKind::Lore => "New Entry",
        };
        let article = Article::new(title, category);
        let id = article.id;
        self.articles_mut(kind).push(article);
        id
    }

    pub fn article(&self, kind: ArticleKind, id: ArticleId) -> Option<&Article> {
        self.articles(kind).iter().find(|a| a.id == id)
    }

    pub fn article_mut(&mut self, kind: ArticleKind, id: ArticleId) -> Option<&mut Article> {
        self.articles_mut(kind).iter_mut().find(|a| a.id == id)
    }

    pub fn remove_article(&mut self, kind: ArticleKind, id: ArticleId) -> bool {
        let articles = self.articles_mut(kind);
        let before = articles.len();
        articles.retain(|a| a.id != id);
        articles.len() != before
    }

    /// Distinct category strings, derived on read (no registry).
    pub fn article_categories(&self, kind: ArticleKind) -> Vec<String> {
        derive_categories(self.articles(kind), kind)
    }

    // =========================================================================
    // Characters
    // =========================================================================

    pub fn add_character(&mut self) -> CharacterId {
        let character = Character::new_placeholder();
        let id = character.id;
        self.characters.push(character);
        id
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Remove a character. Relations referencing it are left intact; the
    /// display layer tolerates the dangling ids.
    pub fn remove_character(&mut self, id: CharacterId) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| c.id != id);
        self.characters.len() != before
    }

    // =========================================================================
    // Timeline
    // =========================================================================

    /// First track, used as the display fallback for untracked events. A
    /// world always has at least one track.
    pub fn first_track(&self) -> Option<&TimelineTrack> {
        self.timeline_tracks.first()
    }

    pub fn add_track(&mut self) -> TrackId {
        let track = TimelineTrack::new_placeholder();
        let id = track.id;
        self.timeline_tracks.push(track);
        id
    }

    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut TimelineTrack> {
        self.timeline_tracks.iter_mut().find(|t| t.id == id)
    }

    /// Delete a track, reassigning its events to the first remaining track.
    /// The last track can never be deleted.
    pub fn remove_track(&mut self, id: TrackId) -> Result<(), DomainError> {
        if self.timeline_tracks.len() <= 1 {
            return Err(DomainError::constraint(
                "a world must keep at least one timeline track",
            ));
        }
        let before = self.timeline_tracks.len();
        self.timeline_tracks.retain(|t| t.id != id);
        if self.timeline_tracks.len() == before {
            return Err(DomainError::not_found("TimelineTrack", id.to_string()));
        }
        // No orphaned references: rehome the deleted track's events.
        if let Some(first) = self.timeline_tracks.first() {
            let fallback = first.id;
            for event in &mut self.timeline {
                if event.track_id == Some(id) {
                    event.track_id = Some(fallback);
                }
            }
        }
        Ok(())
    }

    /// Create a placeholder event on the first track.
    pub fn add_event(&mut self) -> Result<EventId, DomainError> {
        let track_id = self
            .first_track()
            .ok_or_else(|| DomainError::constraint("world has no timeline tracks"))?
            .id;
        let event = TimelineEvent::new_placeholder(track_id);
        let id = event.id;
        self.timeline.push(event);
        Ok(id)
    }

    pub fn event_mut(&mut self, id: EventId) -> Option<&mut TimelineEvent> {
        self.timeline.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_event(&mut self, id: EventId) -> bool {
        let before = self.timeline.len();
        self.timeline.retain(|e| e.id != id);
        self.timeline.len() != before
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Create a directed, labeled relation. Both endpoints must exist and
    /// differ, and the label must be non-empty.
    pub fn add_relation(
        &mut self,
        source_id: CharacterId,
        target_id: CharacterId,
        label: impl Into<String>,
    ) -> Result<RelationId, DomainError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::validation("relation type cannot be empty"));
        }
        if source_id == target_id {
            return Err(DomainError::validation(
                "a relation cannot connect a character to itself",
            ));
        }
        if self.character(source_id).is_none() {
            return Err(DomainError::not_found("Character", source_id.to_string()));
        }
        if self.character(target_id).is_none() {
            return Err(DomainError::not_found("Character", target_id.to_string()));
        }
        let relation = Relation::new(source_id, target_id, label);
        let id = relation.id;
        self.relations.push(relation);
        Ok(id)
    }

    pub fn remove_relation(&mut self, id: RelationId) -> bool {
        let before = self.relations.len();
        self.relations.retain(|r| r.id != id);
        self.relations.len() != before
    }

    // =========================================================================
    // Maps
    // =========================================================================

    pub fn add_map(&mut self) -> MapId {
        let map = WorldMap::new_placeholder();
        let id = map.id;
        self.maps.push(map);
        id
    }

    pub fn map(&self, id: MapId) -> Option<&WorldMap> {
        self.maps.iter().find(|m| m.id == id)
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut WorldMap> {
        self.maps.iter_mut().find(|m| m.id == id)
    }

    pub fn remove_map(&mut self, id: MapId) -> bool {
        let before = self.maps.len();
        self.maps.retain(|m| m.id != id);
        self.maps.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp")
    }

    fn test_world() -> World {
        World::new_placeholder(fixed_time())
    }

    mod construction {
        use super::*;

        #[test]
        fn new_world_has_one_default_track() {
            let world = test_world();
            assert_eq!(world.timeline_tracks.len(), 1);
            assert_eq!(world.timeline_tracks[0].name, "Main Timeline");
            assert!(world.timeline.is_empty());
            assert!(world.characters.is_empty());
        }

        #[test]
        fn new_world_description_is_block_backed() {
            let world = test_world();
            assert_eq!(world.effective_description_blocks().len(), 1);
        }
    }

    mod patching {
        use super::*;

        #[test]
        fn apply_merges_only_set_fields() {
            let mut world = test_world();
            world.apply(WorldPatch {
                name: Some("Aetheria".to_string()),
                ..Default::default()
            });
            assert_eq!(world.name, "Aetheria");
            assert_eq!(world.genre, "Undefined");
        }

        #[test]
        fn panel_opacity_is_clamped() {
            let mut world = test_world();
            world.apply(WorldPatch {
                panel_opacity: Some(1.7),
                ..Default::default()
            });
            assert_eq!(world.panel_opacity, Some(1.0));
            world.apply(WorldPatch {
                panel_opacity: Some(-0.2),
                ..Default::default()
            });
            assert_eq!(world.panel_opacity, Some(0.0));
        }
    }

    mod tracks {
        use super::*;

        #[test]
        fn deleting_last_track_is_rejected() {
            let mut world = test_world();
            let only = world.timeline_tracks[0].id;
            let err = world.remove_track(only).expect_err("must refuse");
            assert!(matches!(err, DomainError::Constraint(_)));
            assert_eq!(world.timeline_tracks.len(), 1);
        }

        #[test]
        fn deleting_track_reassigns_events() {
            let mut world = test_world();
            let second = world.add_track();
            let event_id = world.add_event().expect("add event");
            world
                .event_mut(event_id)
                .expect("event exists")
                .track_id = Some(second);

            world.remove_track(second).expect("delete");

            let remaining: Vec<TrackId> = world.timeline_tracks.iter().map(|t| t.id).collect();
            for event in &world.timeline {
                let track = event.track_id.expect("reassigned");
                assert!(remaining.contains(&track));
            }
        }

        #[test]
        fn track_collection_never_empties_under_repeated_deletes() {
            let mut world = test_world();
            for _ in 0..3 {
                world.add_track();
            }
            loop {
                let id = world.timeline_tracks[0].id;
                if world.remove_track(id).is_err() {
                    break;
                }
            }
            assert_eq!(world.timeline_tracks.len(), 1);
        }
    }

    mod relations {
        use super::*;

        #[test]
        fn relation_requires_distinct_existing_endpoints() {
            let mut world = test_world();
            let a = world.add_character();
            let b = world.add_character();

            assert!(world.add_relation(a, a, "rival").is_err());
            assert!(world.add_relation(a, b, "  ").is_err());
            assert!(world
                .add_relation(a, CharacterId::new(), "ally")
                .is_err());
            assert!(world.add_relation(a, b, "ally").is_ok());
        }

        #[test]
        fn deleting_character_leaves_relation_intact() {
            let mut world = test_world();
            let a = world.add_character();
            let b = world.add_character();
            world.add_relation(a, b, "partner").expect("create");

            assert!(world.remove_character(b));
            assert_eq!(world.relations.len(), 1);
            assert_eq!(world.relations[0].target_id, b);
        }
    }

    mod categories {
        use super::*;

        #[test]
        fn categories_are_derived_from_articles() {
            let mut world = test_world();
            world.add_article(ArticleKind::Lore, Some("Magic"));
            world.add_article(ArticleKind::Lore, Some("Factions"));
            world.add_article(ArticleKind::Lore, Some("Magic"));
            assert_eq!(
                world.article_categories(ArticleKind::Lore),
                vec!["Factions", "Magic"]
            );
        }

        #[test]
        fn renaming_one_article_moves_only_that_article() {
            let mut world = test_world();
            let a = world.add_article(ArticleKind::Concept, Some("Physics"));
            world.add_article(ArticleKind::Concept, Some("Physics"));
            world
                .article_mut(ArticleKind::Concept, a)
                .expect("article exists")
                .category = "Natural Law".to_string();
            let categories = world.article_categories(ArticleKind::Concept);
            assert_eq!(categories, vec!["Natural Law", "Physics"]);
        }
    }

    mod serde_format {
        use super::*;

        #[test]
        fn serializes_camel_case() {
            let world = test_world();
            let json = serde_json::to_string(&world).expect("serialize");
            assert!(json.contains("descriptionBlocks"));
            assert!(json.contains("timelineTracks"));
            assert!(json.contains("timeUnit"));
            assert!(json.contains("lastModified"));
        }

        #[test]
        fn minimal_document_deserializes_with_defaults() {
            let json = format!(
                "{{\"id\":\"{}\",\"name\":\"Bare World\"}}",
                uuid::Uuid::new_v4()
            );
            let world: World = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(world.name, "Bare World");
            assert!(world.timeline_tracks.is_empty());
            assert!(world.concepts.is_empty());
        }

        #[test]
        fn roundtrip_preserves_nested_collections() {
            let mut world = test_world();
            let a = world.add_character();
            let b = world.add_character();
            world.add_relation(a, b, "mentor").expect("relation");
            world.add_article(ArticleKind::Lore, Some("Relics"));
            let map_id = world.add_map();
            world.map_mut(map_id).expect("map").add_marker_at(12.0, 34.0);

            let json = serde_json::to_string_pretty(&world).expect("serialize");
            let restored: World = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(restored, world);
        }
    }
}

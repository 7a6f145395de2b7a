extern crate self as worldloom_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    derive_categories, Article, ArticleKind, BlockKind, Blocks, Character, ContentBlock,
    MapMarker, MoveDirection, Relation, TimelineEvent, TimelineTrack, World, WorldMap,
    DEFAULT_MAP_COLOR, DEFAULT_TRACK_COLOR,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{
    ArticleId, BlockId, CharacterId, EventId, MapId, MarkerId, RelationId, TrackId, WorldId,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    hex_to_rgb, parse_year, tag_color, ArticlePatch, CharacterPatch, EventPatch, MapPatch,
    MarkerPatch, Rgb, ThemeColor, TrackPatch, WorldPatch,
};

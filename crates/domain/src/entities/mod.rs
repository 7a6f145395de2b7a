pub mod article;
pub mod character;
pub mod content_block;
pub mod relation;
pub mod timeline;
pub mod world;
pub mod world_map;

pub use article::{derive_categories, Article, ArticleKind};
pub use character::Character;
pub use content_block::{BlockKind, Blocks, ContentBlock, MoveDirection};
pub use relation::Relation;
pub use timeline::{TimelineEvent, TimelineTrack, DEFAULT_TRACK_COLOR};
pub use world::World;
pub use world_map::{MapMarker, WorldMap, DEFAULT_MAP_COLOR};

//! Typed partial updates, one per entity kind
//!
//! Views edit single fields at a time; each edit becomes a patch with exactly
//! the changed fields set. Applying a patch through the store refreshes the
//! world's `last_modified` stamp.

use crate::value_objects::ThemeColor;
use crate::TrackId;

/// Partial update for top-level world fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldPatch {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub theme: Option<ThemeColor>,
    pub cover_image: Option<String>,
    pub custom_background: Option<String>,
    pub custom_font_color: Option<String>,
    pub panel_color: Option<String>,
    /// Clamped to [0, 1] on apply.
    pub panel_opacity: Option<f64>,
    pub time_unit: Option<String>,
}

impl WorldPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update for a concept or lore article.
#[derive(Debug, Clone, Default)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
}

/// Partial update for a character.
#[derive(Debug, Clone, Default)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub race: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
}

/// Partial update for a timeline track.
#[derive(Debug, Clone, Default)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Partial update for a timeline event.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub year: Option<String>,
    /// `Some(None)` clears the end year, turning the event back into a point.
    pub end_year: Option<Option<String>>,
    pub track_id: Option<TrackId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Partial update for a map.
#[derive(Debug, Clone, Default)]
pub struct MapPatch {
    pub name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color: Option<String>,
    pub background_image: Option<String>,
}

/// Partial update for a map marker.
#[derive(Debug, Clone, Default)]
pub struct MarkerPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub custom_color: Option<String>,
}

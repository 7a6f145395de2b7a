//! Value objects shared across entities

mod color;
mod patch;
mod theme;
mod year;

pub use color::{hex_to_rgb, tag_color, Rgb};
pub use patch::{
    ArticlePatch, CharacterPatch, EventPatch, MapPatch, MarkerPatch, TrackPatch, WorldPatch,
};
pub use theme::ThemeColor;
pub use year::parse_year;

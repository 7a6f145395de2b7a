//! Annotated 2D maps
//!
//! Marker coordinates live in the map's own pixel space, independent of any
//! viewport pan/zoom. Marker colors come from an explicit override or are
//! derived from the free-text tag, so markers sharing a tag match without a
//! type registry.

use serde::{Deserialize, Serialize};

use crate::ids::{MapId, MarkerId};
use crate::value_objects::{tag_color, MapPatch, MarkerPatch};

/// Default map canvas background
pub const DEFAULT_MAP_COLOR: &str = "#1e293b";

/// A labeled point of interest in map pixel space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: MarkerId,
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Free-text tag; grouping and color derivation key
    #[serde(rename = "type", default)]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
}

impl MapMarker {
    /// Placeholder marker dropped at a converted cursor position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            id: MarkerId::new(),
            x,
            y,
            label: "New Location".to_string(),
            description: String::new(),
            tag: "Landmark".to_string(),
            custom_color: None,
        }
    }

    /// Display color: explicit override wins, else derived from the tag.
    pub fn display_color(&self) -> String {
        self.custom_color
            .clone()
            .unwrap_or_else(|| tag_color(&self.tag))
    }

    pub fn apply(&mut self, patch: MarkerPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tag) = patch.tag {
            self.tag = tag;
        }
        if let Some(custom_color) = patch.custom_color {
            self.custom_color = Some(custom_color);
        }
    }
}

/// A named map with a fixed pixel extent and its markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMap {
    pub id: MapId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub markers: Vec<MapMarker>,
}

impl WorldMap {
    pub fn new_placeholder() -> Self {
        Self {
            id: MapId::new(),
            name: "Untitled Map".to_string(),
            width: 800,
            height: 600,
            color: DEFAULT_MAP_COLOR.to_string(),
            background_image: None,
            markers: Vec::new(),
        }
    }

    /// Aspect ratio for background-image cropping; degenerate extents fall
    /// back to 4:3 like the editor does.
    pub fn aspect(&self) -> f64 {
        if self.width > 0 && self.height > 0 {
            f64::from(self.width) / f64::from(self.height)
        } else {
            4.0 / 3.0
        }
    }

    pub fn apply(&mut self, patch: MapPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(background_image) = patch.background_image {
            self.background_image = Some(background_image);
        }
    }

    pub fn clear_background(&mut self) {
        self.background_image = None;
    }

    /// Place a new placeholder marker, returning its id for selection.
    pub fn add_marker_at(&mut self, x: f64, y: f64) -> MarkerId {
        let marker = MapMarker::at(x, y);
        let id = marker.id;
        self.markers.push(marker);
        id
    }

    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut MapMarker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        self.markers.len() != before
    }
}

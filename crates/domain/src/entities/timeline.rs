//! Timeline tracks and events
//!
//! Tracks are named, colored lanes (distinct calendars or storylines). Events
//! reference a track by id; events without a track are displayed in the first
//! track's lane, a fallback that never rewrites the stored reference.

use serde::{Deserialize, Serialize};

use crate::ids::{EventId, TrackId};
use crate::value_objects::{parse_year, EventPatch, TrackPatch};

/// Default lane color (matches the indigo accent)
pub const DEFAULT_TRACK_COLOR: &str = "#6366f1";

/// A named lane grouping timeline events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTrack {
    pub id: TrackId,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl TimelineTrack {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The single track every new world starts with.
    pub fn default_track() -> Self {
        Self::new("Main Timeline", DEFAULT_TRACK_COLOR)
    }

    /// Placeholder for user-added tracks.
    pub fn new_placeholder() -> Self {
        Self::new("New Timeline", "#94a3b8")
    }

    pub fn apply(&mut self, patch: TrackPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// A dated occurrence on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    /// Free-text year label, parsed for layout (see [`parse_year`])
    pub year: String,
    /// Absent means a point event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<TrackId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TimelineEvent {
    /// Placeholder event assigned to the given track.
    pub fn new_placeholder(track_id: TrackId) -> Self {
        Self {
            id: EventId::new(),
            year: "100".to_string(),
            end_year: None,
            track_id: Some(track_id),
            title: "New Event".to_string(),
            description: String::new(),
            image: None,
        }
    }

    pub fn start(&self) -> i64 {
        parse_year(&self.year)
    }

    /// Parsed end year, falling back to the start for point events.
    pub fn end(&self) -> i64 {
        self.end_year
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(parse_year)
            .unwrap_or_else(|| self.start())
    }

    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(end_year) = patch.end_year {
            self.end_year = end_year.filter(|s| !s.is_empty());
        }
        if let Some(track_id) = patch.track_id {
            self.track_id = Some(track_id);
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}

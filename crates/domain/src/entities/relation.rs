//! Directed, labeled edges between characters
//!
//! The editor never enforces referential integrity proactively: a relation
//! whose endpoint character was deleted stays in the collection and the
//! display layer degrades (graph skips the edge, lists show "Unknown").

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, RelationId};

/// A directed, labeled relation between two characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: RelationId,
    pub source_id: CharacterId,
    pub target_id: CharacterId,
    /// Free-text label (single label, no weight)
    #[serde(rename = "type")]
    pub label: String,
}

impl Relation {
    pub fn new(source_id: CharacterId, target_id: CharacterId, label: impl Into<String>) -> Self {
        Self {
            id: RelationId::new(),
            source_id,
            target_id,
            label: label.into(),
        }
    }
}

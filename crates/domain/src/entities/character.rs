//! Character entity

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::value_objects::CharacterPatch;

/// A named inhabitant of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub description: String,
    /// Self-contained image payload (data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Character {
    /// Placeholder character the way the editor creates one.
    pub fn new_placeholder() -> Self {
        Self {
            id: CharacterId::new(),
            name: "Unnamed Character".to_string(),
            role: "Commoner".to_string(),
            race: "Human".to_string(),
            description: String::new(),
            avatar: None,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new_placeholder()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }

    pub fn apply(&mut self, patch: CharacterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(race) = patch.race {
            self.race = race;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
    }
}

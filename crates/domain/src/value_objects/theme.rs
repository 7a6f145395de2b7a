//! UI theme palette for a world document

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fixed accent palette a world can pick from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Indigo,
    Rose,
    Emerald,
    Amber,
    Violet,
    Cyan,
    Slate,
}

impl ThemeColor {
    pub fn all() -> &'static [ThemeColor] {
        &[
            ThemeColor::Indigo,
            ThemeColor::Rose,
            ThemeColor::Emerald,
            ThemeColor::Amber,
            ThemeColor::Violet,
            ThemeColor::Cyan,
            ThemeColor::Slate,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeColor::Indigo => "indigo",
            ThemeColor::Rose => "rose",
            ThemeColor::Emerald => "emerald",
            ThemeColor::Amber => "amber",
            ThemeColor::Violet => "violet",
            ThemeColor::Cyan => "cyan",
            ThemeColor::Slate => "slate",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ThemeColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indigo" => Ok(ThemeColor::Indigo),
            "rose" => Ok(ThemeColor::Rose),
            "emerald" => Ok(ThemeColor::Emerald),
            "amber" => Ok(ThemeColor::Amber),
            "violet" => Ok(ThemeColor::Violet),
            "cyan" => Ok(ThemeColor::Cyan),
            "slate" => Ok(ThemeColor::Slate),
            _ => Err(DomainError::parse(format!(
                "Invalid theme color '{}'. Valid colors: indigo, rose, emerald, amber, violet, cyan, slate",
                s
            ))),
        }
    }
}

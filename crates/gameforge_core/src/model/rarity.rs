//! Item rarity with a permissive fallback.
//!
//! # Invariants
//! - Unknown rarity strings are kept verbatim and survive a storage round trip.
//! - Display helpers never fail; unknown values use the neutral fallback.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const COLOR_COMMON: &str = "#6B7280";
const COLOR_RARE: &str = "#3B82F6";
const COLOR_EPIC: &str = "#8B5CF6";
const COLOR_LEGENDARY: &str = "#F59E0B";

/// Item rarity tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    /// Any other value found in catalog data or persisted snapshots.
    Other(String),
}

impl Rarity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Whether this value is one of the four known tiers.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Human-readable label. Unknown values are shown as stored.
    pub fn label(&self) -> &str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Badge colour as `#RRGGBB`; unknown values fall back to the common colour.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::Common | Self::Other(_) => COLOR_COMMON,
            Self::Rare => COLOR_RARE,
            Self::Epic => COLOR_EPIC,
            Self::Legendary => COLOR_LEGENDARY,
        }
    }
}

impl From<String> for Rarity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "common" => Self::Common,
            "rare" => Self::Rare,
            "epic" => Self::Epic,
            "legendary" => Self::Legendary,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Rarity {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> Self {
        match value {
            Rarity::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for Rarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Rarity;

    #[test]
    fn known_values_map_to_tiers() {
        assert_eq!(Rarity::from("legendary"), Rarity::Legendary);
        assert!(Rarity::from("rare").is_known());
    }

    #[test]
    fn unknown_value_is_preserved_and_uses_fallback_display() {
        let rarity = Rarity::from("uncommon");
        assert!(!rarity.is_known());
        assert_eq!(rarity.label(), "uncommon");
        assert_eq!(rarity.color_hex(), Rarity::Common.color_hex());

        let json = serde_json::to_string(&rarity).unwrap();
        assert_eq!(json, "\"uncommon\"");
        let back: Rarity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rarity);
    }
}

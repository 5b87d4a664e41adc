//! Project and item category tags.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed category set shared by projects, items and the catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Weapons,
    Armor,
    Mobs,
    Food,
    Blocks,
    Tools,
}

impl Category {
    /// All categories in library tab order.
    pub const ALL: [Category; 6] = [
        Category::Weapons,
        Category::Armor,
        Category::Mobs,
        Category::Food,
        Category::Blocks,
        Category::Tools,
    ];

    /// Stable lowercase tag used in storage and at the FFI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::Armor => "armor",
            Self::Mobs => "mobs",
            Self::Food => "food",
            Self::Blocks => "blocks",
            Self::Tools => "tools",
        }
    }

    /// Parses a tag, ignoring surrounding whitespace and ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weapons" => Some(Self::Weapons),
            "armor" => Some(Self::Armor),
            "mobs" => Some(Self::Mobs),
            "food" => Some(Self::Food),
            "blocks" => Some(Self::Blocks),
            "tools" => Some(Self::Tools),
            _ => None,
        }
    }

    /// Display glyph for category chips.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Weapons => "⚔️",
            Self::Armor => "🛡️",
            Self::Mobs => "👾",
            Self::Food => "🍖",
            Self::Blocks => "🧱",
            Self::Tools => "🔨",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn parse_accepts_every_tag_and_rejects_unknown() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse(" Weapons "), Some(Category::Weapons));
        assert_eq!(Category::parse("potions"), None);
    }

    #[test]
    fn serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&Category::Blocks).unwrap();
        assert_eq!(json, "\"blocks\"");
    }
}

//! Vanilla item base stats and editor slider ranges.
//!
//! # Responsibility
//! - Decode the embedded `vanilla_stats.json` dataset.
//! - Derive per-stat slider ranges for the item editor.
//!
//! # Invariants
//! - Keys starting with `_comment` are documentation, never items.
//! - A stat absent from an item never produces a range.

use super::CatalogError;
use crate::editor::snap_slider::SnapSlider;
use crate::model::category::Category;
use crate::model::rarity::Rarity;
use log::error;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

const BUILTIN_DATASET: &str = include_str!("vanilla_stats.json");
const TEXTURE_BASE_URL: &str = "https://raw.githubusercontent.com/ReichiMD/fabrik-library/main";
const COMMENT_KEY_PREFIX: &str = "_comment";

static BUILTIN: Lazy<VanillaCatalog> = Lazy::new(|| {
    VanillaCatalog::from_json(BUILTIN_DATASET).unwrap_or_else(|err| {
        error!(
            "event=catalog_load module=catalog status=error dataset=builtin error={}",
            err
        );
        VanillaCatalog::default()
    })
});

/// Base stats; which fields exist depends on the item category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemStats {
    pub damage: Option<f64>,
    pub attack_speed: Option<f64>,
    pub durability: Option<f64>,
    pub enchantable: Option<bool>,
    pub stackable: Option<bool>,
    pub armor: Option<f64>,
    pub armor_toughness: Option<f64>,
    pub knockback_resistance: Option<f64>,
    pub nutrition: Option<f64>,
    pub saturation: Option<f64>,
}

/// One dataset entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VanillaItem {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub category: Category,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub emoji: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub stats: ItemStats,
    pub texture: String,
}

impl VanillaItem {
    /// Full URL of the item texture in the public asset repository.
    pub fn texture_url(&self) -> String {
        format!("{TEXTURE_BASE_URL}/{}", self.texture)
    }

    /// Slider ranges for the editable stats of this item, in editor order.
    ///
    /// Only weapons, armor and food expose editable stats.
    pub fn stat_ranges(&self) -> Vec<StatRange> {
        let stats = &self.stats;
        let mut ranges = Vec::new();
        let mut push = |kind: StatKind, base: Option<f64>, bounds: fn(f64) -> (f64, f64)| {
            if let Some(base) = base {
                let (min, max) = bounds(base);
                ranges.push(StatRange {
                    kind,
                    min,
                    max,
                    default: base,
                });
            }
        };

        match self.category {
            Category::Weapons => {
                push(StatKind::Damage, stats.damage, |base| (0.0, base * 3.0));
                push(StatKind::AttackSpeed, stats.attack_speed, |_| (0.1, 4.0));
                push(StatKind::Durability, stats.durability, |base| {
                    (1.0, base * 2.0)
                });
            }
            Category::Armor => {
                push(StatKind::Armor, stats.armor, |base| (0.0, base * 2.0));
                push(StatKind::ArmorToughness, stats.armor_toughness, |base| {
                    (0.0, base * 2.0)
                });
                push(StatKind::Durability, stats.durability, |base| {
                    (1.0, base * 2.0)
                });
            }
            Category::Food => {
                push(StatKind::Nutrition, stats.nutrition, |_| (0.0, 20.0));
                push(StatKind::Saturation, stats.saturation, |_| (0.0, 20.0));
            }
            Category::Mobs | Category::Blocks | Category::Tools => {}
        }
        ranges
    }
}

/// Editable stat identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatKind {
    Damage,
    AttackSpeed,
    Durability,
    Armor,
    ArmorToughness,
    Nutrition,
    Saturation,
}

impl StatKind {
    /// Dataset field name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::AttackSpeed => "attack_speed",
            Self::Durability => "durability",
            Self::Armor => "armor",
            Self::ArmorToughness => "armor_toughness",
            Self::Nutrition => "nutrition",
            Self::Saturation => "saturation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Damage => "Damage",
            Self::AttackSpeed => "Speed",
            Self::Durability => "Durability",
            Self::Armor => "Armor",
            Self::ArmorToughness => "Toughness",
            Self::Nutrition => "Nutrition",
            Self::Saturation => "Saturation",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Damage => "💥",
            Self::AttackSpeed => "⚡",
            Self::Durability | Self::Armor => "🛡️",
            Self::ArmorToughness => "💪",
            Self::Nutrition => "🍖",
            Self::Saturation => "✨",
        }
    }

    /// Unit suffix shown after the slider value.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Damage => "❤️",
            Self::AttackSpeed => "x",
            Self::Armor => "🛡️",
            _ => "",
        }
    }

    /// Slider increment.
    pub fn step(self) -> f64 {
        match self {
            Self::AttackSpeed => 0.1,
            Self::Durability => 10.0,
            _ => 0.5,
        }
    }
}

/// Bounds and default for one editable stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatRange {
    pub kind: StatKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl StatRange {
    /// Builds a slider resting on the base value.
    pub fn slider(&self) -> SnapSlider {
        SnapSlider::new(self.default, self.min, self.max, self.kind.step())
    }
}

#[derive(Deserialize)]
struct Dataset {
    items: serde_json::Map<String, serde_json::Value>,
}

/// Decoded vanilla dataset keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct VanillaCatalog {
    items: BTreeMap<String, VanillaItem>,
}

impl VanillaCatalog {
    /// Catalog decoded from the dataset compiled into this crate.
    ///
    /// Decoding happens once; a broken dataset is logged and yields an empty
    /// catalog.
    pub fn builtin() -> &'static VanillaCatalog {
        &BUILTIN
    }

    /// Decodes a dataset shaped like `{ "items": { "<id>": { ... } } }`.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let dataset: Dataset = serde_json::from_str(raw).map_err(CatalogError::InvalidJson)?;
        let mut items = BTreeMap::new();
        for (key, value) in dataset.items {
            if key.starts_with(COMMENT_KEY_PREFIX) {
                continue;
            }
            let item: VanillaItem = serde_json::from_value(value).map_err(|source| {
                CatalogError::InvalidItem {
                    id: key.clone(),
                    source,
                }
            })?;
            items.insert(key, item);
        }
        Ok(Self { items })
    }

    pub fn get(&self, id: &str) -> Option<&VanillaItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Item ids in ascending order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.keys().map(String::as_str).collect()
    }

    /// Items of one category, ordered by id.
    pub fn items_by_category(&self, category: Category) -> Vec<&VanillaItem> {
        self.items
            .values()
            .filter(|item| item.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{StatKind, VanillaCatalog};
    use crate::catalog::CatalogError;
    use crate::model::category::Category;
    use crate::model::rarity::Rarity;

    #[test]
    fn builtin_dataset_decodes_and_skips_comments() {
        let catalog = VanillaCatalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog.ids().iter().all(|id| !id.starts_with("_comment")));
        assert!(catalog.contains("diamond_sword"));
    }

    #[test]
    fn weapon_ranges_follow_base_stats() {
        let sword = VanillaCatalog::builtin()
            .get("diamond_sword")
            .expect("diamond sword should exist");
        let ranges = sword.stat_ranges();
        let kinds: Vec<_> = ranges.iter().map(|range| range.kind).collect();
        assert_eq!(
            kinds,
            vec![StatKind::Damage, StatKind::AttackSpeed, StatKind::Durability]
        );
        assert_eq!((ranges[0].min, ranges[0].max, ranges[0].default), (0.0, 21.0, 7.0));
        assert_eq!((ranges[1].min, ranges[1].max), (0.1, 4.0));
        assert_eq!((ranges[2].min, ranges[2].max), (1.0, 3122.0));
    }

    #[test]
    fn missing_stats_produce_no_range() {
        let bow = VanillaCatalog::builtin().get("bow").expect("bow should exist");
        let kinds: Vec<_> = bow.stat_ranges().iter().map(|range| range.kind).collect();
        assert_eq!(kinds, vec![StatKind::Durability]);

        let tnt = VanillaCatalog::builtin().get("tnt").expect("tnt should exist");
        assert!(tnt.stat_ranges().is_empty());
    }

    #[test]
    fn food_ranges_are_fixed_to_twenty() {
        let apple = VanillaCatalog::builtin()
            .get("golden_apple")
            .expect("golden apple should exist");
        assert_eq!(apple.rarity, Rarity::Other("uncommon".to_string()));
        for range in apple.stat_ranges() {
            assert_eq!((range.min, range.max), (0.0, 20.0));
        }
    }

    #[test]
    fn texture_url_joins_base_and_path() {
        let sword = VanillaCatalog::builtin().get("iron_sword").unwrap();
        assert_eq!(
            sword.texture_url(),
            "https://raw.githubusercontent.com/ReichiMD/fabrik-library/main/textures/item/iron_sword.png"
        );
    }

    #[test]
    fn items_by_category_filters() {
        let food = VanillaCatalog::builtin().items_by_category(Category::Food);
        assert!(!food.is_empty());
        assert!(food.iter().all(|item| item.category == Category::Food));
    }

    #[test]
    fn invalid_entry_reports_its_key() {
        let err = VanillaCatalog::from_json(r#"{"items": {"broken": {"id": 1}}}"#)
            .expect_err("entry without required fields must fail");
        assert!(matches!(err, CatalogError::InvalidItem { ref id, .. } if id == "broken"));
    }
}

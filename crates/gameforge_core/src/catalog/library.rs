//! Preset library items.

use crate::model::category::Category;
use crate::model::project::NewProjectItem;
use crate::model::rarity::Rarity;

/// One preset entry from the library screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItem {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub category: Category,
    pub rarity: Rarity,
    pub stat: &'static str,
    /// Matching entry in the vanilla stats dataset, when one exists.
    pub vanilla_id: Option<&'static str>,
}

impl LibraryItem {
    /// Fields copied into a project when this item is added unchanged.
    pub fn to_new_item(&self) -> NewProjectItem {
        NewProjectItem {
            name: self.name.to_string(),
            emoji: self.emoji.to_string(),
            stat: self.stat.to_string(),
            rarity: self.rarity.clone(),
            category: self.category,
        }
    }
}

macro_rules! library_item {
    ($id:literal, $name:literal, $emoji:literal, $category:ident, $rarity:ident, $stat:literal) => {
        library_item!($id, $name, $emoji, $category, $rarity, $stat, None)
    };
    ($id:literal, $name:literal, $emoji:literal, $category:ident, $rarity:ident, $stat:literal, $vanilla:expr) => {
        LibraryItem {
            id: $id,
            name: $name,
            emoji: $emoji,
            category: Category::$category,
            rarity: Rarity::$rarity,
            stat: $stat,
            vanilla_id: $vanilla,
        }
    };
}

static LIBRARY_ITEMS: [LibraryItem; 25] = [
    library_item!("w1", "Dragon Sword", "⚔️", Weapons, Legendary, "50 DMG", Some("netherite_sword")),
    library_item!("w2", "Ice Blade", "🗡️", Weapons, Rare, "25 DMG", Some("iron_sword")),
    library_item!("w3", "Diamond Sword", "⚔️", Weapons, Epic, "35 DMG", Some("diamond_sword")),
    library_item!("w4", "Stone Sword", "🗡️", Weapons, Common, "10 DMG", Some("stone_sword")),
    library_item!("w5", "Bow", "🏹", Weapons, Rare, "20 DMG", Some("bow")),
    library_item!("w6", "Diamond Axe", "🪓", Weapons, Epic, "30 DMG", Some("diamond_axe")),
    library_item!("a1", "Diamond Shield", "🛡️", Armor, Epic, "+20 DEF", Some("diamond_chestplate")),
    library_item!("a2", "King's Helmet", "👑", Armor, Legendary, "+15 DEF", Some("golden_helmet")),
    library_item!("a3", "Iron Chestplate", "🦺", Armor, Rare, "+12 DEF", Some("iron_chestplate")),
    library_item!("a4", "Leather Pants", "👖", Armor, Common, "+5 DEF", Some("leather_leggings")),
    library_item!("m1", "Zombie", "🧟", Mobs, Common, "20 HP"),
    library_item!("m2", "Creeper", "💚", Mobs, Rare, "30 HP"),
    library_item!("m3", "Enderman", "🖤", Mobs, Epic, "40 HP"),
    library_item!("m4", "Dragon", "🐉", Mobs, Legendary, "200 HP"),
    library_item!("f1", "Golden Apple", "🍎", Food, Rare, "+5 HP", Some("golden_apple")),
    library_item!("f2", "Steak", "🥩", Food, Common, "+8 HP", Some("cooked_beef")),
    library_item!("f3", "Healing Potion", "🧪", Food, Rare, "+10 HP"),
    library_item!("f4", "Magic Potion", "⚗️", Food, Epic, "+20 HP"),
    library_item!("b1", "Glowstone", "✨", Blocks, Rare, "Light"),
    library_item!("b2", "Obsidian", "🟪", Blocks, Epic, "Very Hard"),
    library_item!("b3", "TNT", "🧨", Blocks, Rare, "Explosion"),
    library_item!("b4", "Diamond Block", "💎", Blocks, Legendary, "Decoration"),
    library_item!("t1", "Diamond Pickaxe", "⛏️", Tools, Epic, "8 SPD", Some("diamond_pickaxe")),
    library_item!("t2", "Golden Shovel", "🥄", Tools, Rare, "10 SPD", Some("golden_shovel")),
    library_item!("t3", "Netherite Hoe", "🪓", Tools, Legendary, "12 SPD", Some("netherite_hoe")),
];

/// All library items in display order.
pub fn library_items() -> &'static [LibraryItem] {
    &LIBRARY_ITEMS
}

/// Looks up a library item by its id.
pub fn library_item(id: &str) -> Option<&'static LibraryItem> {
    LIBRARY_ITEMS.iter().find(|item| item.id == id)
}

/// Filters by optional category and a case-insensitive name substring.
///
/// A blank query matches every name.
pub fn filter_library(category: Option<Category>, query: &str) -> Vec<&'static LibraryItem> {
    let needle = query.trim().to_lowercase();
    LIBRARY_ITEMS
        .iter()
        .filter(|item| category.map_or(true, |wanted| item.category == wanted))
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}

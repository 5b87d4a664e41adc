//! Project (item pack) domain model.
//!
//! # Responsibility
//! - Define the records stored under the projects snapshot key.
//! - Generate identifiers and creation timestamps.
//!
//! # Invariants
//! - Ids are random UUID v4 strings, so creations within the same clock tick
//!   never collide.
//! - `items` order is insertion order.
//! - Field names serialize in camelCase (`createdAt`) to keep the snapshot
//!   format readable by earlier app versions.

use super::category::Category;
use super::rarity::Rarity;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque project identifier.
pub type ProjectId = String;

/// Opaque item identifier, unique within its parent project.
pub type ItemId = String;

/// Generates a fresh opaque identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A user-created pack of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub category: Category,
    pub emoji: String,
    #[serde(default)]
    pub items: Vec<ProjectItem>,
    /// RFC 3339 timestamp in UTC with millisecond precision.
    pub created_at: String,
}

impl Project {
    /// Creates an empty project stamped with the current time.
    ///
    /// The name is not validated here; blank-name checks belong to callers.
    pub fn new(name: impl Into<String>, category: Category, emoji: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            category,
            emoji: emoji.into(),
            items: Vec::new(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parses `created_at`; `None` for timestamps written in another format.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|value| value.with_timezone(&Utc))
    }

    pub fn item(&self, item_id: &str) -> Option<&ProjectItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// An item inside a project, copied from a catalog entry when added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: ItemId,
    pub name: String,
    pub emoji: String,
    /// Free-text display stat such as `"7 dmg"`.
    pub stat: String,
    pub rarity: Rarity,
    pub category: Category,
}

impl ProjectItem {
    /// Materializes an input item with an id that is unused in `siblings`.
    pub(crate) fn from_new(item: NewProjectItem, siblings: &[ProjectItem]) -> Self {
        let mut id = new_id();
        while siblings.iter().any(|sibling| sibling.id == id) {
            id = new_id();
        }
        Self {
            id,
            name: item.name,
            emoji: item.emoji,
            stat: item.stat,
            rarity: item.rarity,
            category: item.category,
        }
    }
}

/// Field set supplied by callers when adding an item; the id is assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectItem {
    pub name: String,
    pub emoji: String,
    pub stat: String,
    pub rarity: Rarity,
    pub category: Category,
}

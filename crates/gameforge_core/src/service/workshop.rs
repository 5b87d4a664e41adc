//! Item editor ("workshop") draft and save flow.
//!
//! # Responsibility
//! - Hold editor state for one library item: name, emoji, colour, effects
//!   and one snap slider per editable vanilla stat.
//! - Save the draft into an existing project or a project created on save.
//!
//! # Invariants
//! - Saved items copy `stat`, `rarity` and `category` from the library item;
//!   only name and emoji come from the draft.
//! - A new project is created only when the save target asks for one.

use crate::catalog::library::{library_item, LibraryItem};
use crate::catalog::vanilla::{StatKind, StatRange, VanillaCatalog};
use crate::editor::snap_slider::SnapSlider;
use crate::model::category::Category;
use crate::model::project::{NewProjectItem, ProjectId, ProjectItem};
use crate::repo::kv_repo::{KeyValueStore, StorageResult};
use crate::service::project_store::ProjectStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tint options offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemColor {
    Red,
    Orange,
    Yellow,
    Green,
    #[default]
    Blue,
    Purple,
    Pink,
    White,
}

impl ItemColor {
    pub const ALL: [ItemColor; 8] = [
        ItemColor::Red,
        ItemColor::Orange,
        ItemColor::Yellow,
        ItemColor::Green,
        ItemColor::Blue,
        ItemColor::Purple,
        ItemColor::Pink,
        ItemColor::White,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#EF4444",
            Self::Orange => "#F97316",
            Self::Yellow => "#EAB308",
            Self::Green => "#22C55E",
            Self::Blue => "#3B82F6",
            Self::Purple => "#8B5CF6",
            Self::Pink => "#EC4899",
            Self::White => "#F9FAFB",
        }
    }
}

/// Visual effects that can be toggled on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Fire,
    Glow,
    Ice,
}

/// Effect switch states; fire starts enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectToggles {
    pub fire: bool,
    pub glow: bool,
    pub ice: bool,
}

impl Default for EffectToggles {
    fn default() -> Self {
        Self {
            fire: true,
            glow: false,
            ice: false,
        }
    }
}

impl EffectToggles {
    fn slot(&mut self, effect: Effect) -> &mut bool {
        match effect {
            Effect::Fire => &mut self.fire,
            Effect::Glow => &mut self.glow,
            Effect::Ice => &mut self.ice,
        }
    }
}

/// Slider bound to one stat range.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSlider {
    pub range: StatRange,
    pub slider: SnapSlider,
}

/// Where a draft is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Existing(ProjectId),
    NewProject {
        name: String,
        category: Category,
        emoji: String,
    },
}

/// Outcome of [`ItemDraft::save`].
#[derive(Debug)]
pub struct SavedItem {
    pub project_id: ProjectId,
    pub item: ProjectItem,
    /// First snapshot write failure of the save, if any.
    pub persisted: StorageResult<()>,
}

/// Errors from the save flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkshopError {
    ProjectNotFound(ProjectId),
}

impl Display for WorkshopError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
        }
    }
}

impl Error for WorkshopError {}

/// Editor state for one selected library item.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    source: LibraryItem,
    name: String,
    emoji: String,
    color: ItemColor,
    effects: EffectToggles,
    sliders: Vec<StatSlider>,
}

impl ItemDraft {
    /// Starts a draft; sliders come from the linked vanilla item, if any.
    pub fn new(source: &LibraryItem, catalog: &VanillaCatalog) -> Self {
        let sliders = source
            .vanilla_id
            .and_then(|id| catalog.get(id))
            .map(|vanilla| {
                vanilla
                    .stat_ranges()
                    .into_iter()
                    .map(|range| StatSlider {
                        slider: range.slider(),
                        range,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            source: source.clone(),
            name: source.name.to_string(),
            emoji: source.emoji.to_string(),
            color: ItemColor::default(),
            effects: EffectToggles::default(),
            sliders,
        }
    }

    /// Starts a draft from a library id using the builtin vanilla catalog.
    pub fn from_library_id(id: &str) -> Option<Self> {
        library_item(id).map(|item| Self::new(item, VanillaCatalog::builtin()))
    }

    pub fn source(&self) -> &LibraryItem {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn set_emoji(&mut self, emoji: impl Into<String>) {
        self.emoji = emoji.into();
    }

    pub fn color(&self) -> ItemColor {
        self.color
    }

    pub fn set_color(&mut self, color: ItemColor) {
        self.color = color;
    }

    pub fn effects(&self) -> EffectToggles {
        self.effects
    }

    /// Flips one effect and returns its new state.
    pub fn toggle_effect(&mut self, effect: Effect) -> bool {
        let slot = self.effects.slot(effect);
        *slot = !*slot;
        *slot
    }

    pub fn sliders(&self) -> &[StatSlider] {
        &self.sliders
    }

    /// Feeds raw slider input for one stat; `None` if the item lacks it.
    pub fn input_stat(&mut self, kind: StatKind, raw: f64) -> Option<f64> {
        self.sliders
            .iter_mut()
            .find(|entry| entry.range.kind == kind)
            .map(|entry| entry.slider.input(raw))
    }

    pub fn stat_value(&self, kind: StatKind) -> Option<f64> {
        self.sliders
            .iter()
            .find(|entry| entry.range.kind == kind)
            .map(|entry| entry.slider.value())
    }

    /// Stats whose value differs from the vanilla default.
    pub fn modified_stats(&self) -> Vec<(StatKind, f64)> {
        self.sliders
            .iter()
            .filter(|entry| entry.slider.is_modified())
            .map(|entry| (entry.range.kind, entry.slider.value()))
            .collect()
    }

    /// Item fields as they will be stored. A blank name falls back to the
    /// library name.
    pub fn to_new_item(&self) -> NewProjectItem {
        let mut item = self.source.to_new_item();
        let name = self.name.trim();
        if !name.is_empty() {
            item.name = name.to_string();
        }
        if !self.emoji.trim().is_empty() {
            item.emoji = self.emoji.clone();
        }
        item
    }

    /// Adds the draft to the target project, creating it first if asked.
    pub fn save<S: KeyValueStore>(
        &self,
        store: &mut ProjectStore<S>,
        target: SaveTarget,
    ) -> Result<SavedItem, WorkshopError> {
        let (project_id, created_persisted) = match target {
            SaveTarget::Existing(project_id) => {
                if store.get_project(&project_id).is_none() {
                    return Err(WorkshopError::ProjectNotFound(project_id));
                }
                (project_id, Ok(()))
            }
            SaveTarget::NewProject {
                name,
                category,
                emoji,
            } => {
                let created = store.create_project(name, category, emoji);
                (created.value.id, created.persisted)
            }
        };

        let added = store.add_item(&project_id, self.to_new_item());
        let item = added
            .value
            .ok_or_else(|| WorkshopError::ProjectNotFound(project_id.clone()))?;
        Ok(SavedItem {
            project_id,
            item,
            persisted: created_persisted.and(added.persisted),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Effect, ItemColor, ItemDraft};
    use crate::catalog::vanilla::StatKind;

    #[test]
    fn draft_builds_sliders_from_linked_vanilla_item() {
        let draft = ItemDraft::from_library_id("w3").expect("diamond sword draft");
        let kinds: Vec<_> = draft.sliders().iter().map(|entry| entry.range.kind).collect();
        assert_eq!(
            kinds,
            vec![StatKind::Damage, StatKind::AttackSpeed, StatKind::Durability]
        );
        assert_eq!(draft.stat_value(StatKind::Damage), Some(7.0));
    }

    #[test]
    fn unlinked_item_has_no_sliders() {
        let draft = ItemDraft::from_library_id("m1").expect("zombie draft");
        assert!(draft.sliders().is_empty());
    }

    #[test]
    fn stat_input_snaps_and_tracks_modifications() {
        let mut draft = ItemDraft::from_library_id("w3").unwrap();
        assert_eq!(draft.input_stat(StatKind::Damage, 7.3), Some(7.0));
        assert!(draft.modified_stats().is_empty());

        assert_eq!(draft.input_stat(StatKind::Damage, 12.0), Some(12.0));
        assert_eq!(draft.modified_stats(), vec![(StatKind::Damage, 12.0)]);
        assert_eq!(draft.input_stat(StatKind::Nutrition, 3.0), None);
    }

    #[test]
    fn toggles_and_colour_are_editable() {
        let mut draft = ItemDraft::from_library_id("w1").unwrap();
        assert!(draft.effects().fire);
        assert!(!draft.toggle_effect(Effect::Fire));
        assert!(draft.toggle_effect(Effect::Ice));
        assert_eq!(draft.color(), ItemColor::Blue);
        draft.set_color(ItemColor::Pink);
        assert_eq!(draft.color().hex(), "#EC4899");
    }

    #[test]
    fn blank_name_falls_back_to_library_name() {
        let mut draft = ItemDraft::from_library_id("f2").unwrap();
        draft.set_name("   ");
        assert_eq!(draft.to_new_item().name, "Steak");
        draft.set_name(" Super Steak ");
        assert_eq!(draft.to_new_item().name, "Super Steak");
    }
}

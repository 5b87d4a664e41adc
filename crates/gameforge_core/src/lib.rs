//! Core domain logic for GameForge Studio.
//! This crate is the single source of truth for project data and its
//! persistence; UI layers talk to it through `gameforge_ffi`.

pub mod catalog;
pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::library::{filter_library, library_item, library_items, LibraryItem};
pub use catalog::vanilla::{ItemStats, StatKind, StatRange, VanillaCatalog, VanillaItem};
pub use catalog::CatalogError;
pub use config::CoreConfig;
pub use editor::snap_slider::{snap, SliderHint, SnapSlider};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogLevel};
pub use model::category::Category;
pub use model::project::{ItemId, NewProjectItem, Project, ProjectId, ProjectItem};
pub use model::rarity::Rarity;
pub use model::session::AuthSession;
pub use repo::kv_repo::{
    KeyValueStore, StorageError, StorageResult, AUTH_STORAGE_KEY, PROJECTS_STORAGE_KEY,
};
pub use repo::memory_kv::MemoryKeyValueStore;
pub use repo::queued_kv::QueuedKeyValueStore;
pub use repo::sqlite_kv::SqliteKeyValueStore;
pub use service::project_store::{Mutation, ProjectStore};
pub use service::session_store::{SessionError, SessionStore};
pub use service::workshop::{
    Effect, EffectToggles, ItemColor, ItemDraft, SaveTarget, SavedItem, StatSlider, WorkshopError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

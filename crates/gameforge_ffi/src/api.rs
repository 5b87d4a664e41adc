//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose project, library, session and slider use cases to Dart via FRB.
//! - Own the process-wide store handle the UI talks to.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Snapshot writes are queued; reads always reflect the latest mutation.
//! - Mutations report write failures the queue has seen so far; their own
//!   write is confirmed by [`storage_flush`].
//! - Tokens never appear in responses or logs.

use gameforge_core::{
    core_version as core_version_inner, filter_library, init_logging as init_logging_inner,
    ping as ping_inner, Category, CoreConfig, ItemDraft, LibraryItem, Project, ProjectItem,
    ProjectStore, QueuedKeyValueStore, SaveTarget, SessionStore, SnapSlider,
    SqliteKeyValueStore, StorageError,
};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

type Gateway = Arc<QueuedKeyValueStore<SqliteKeyValueStore>>;

struct Runtime {
    projects: ProjectStore<Gateway>,
    sessions: SessionStore<Gateway>,
    gateway: Gateway,
}

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static RUNTIME: OnceLock<Mutex<Runtime>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Item row inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItemDto {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub stat: String,
    /// Stored rarity tag (`common|rare|epic|legendary` or a legacy value).
    pub rarity: String,
    pub rarity_label: String,
    /// Badge colour as `#RRGGBB`.
    pub rarity_color: String,
    pub category: String,
}

/// Project with its items in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub emoji: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub items: Vec<ProjectItemDto>,
}

/// Response envelope for the project list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListResponse {
    pub ok: bool,
    pub projects: Vec<ProjectDto>,
    pub message: String,
}

/// Response envelope for calls returning one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectResponse {
    pub ok: bool,
    pub project: Option<ProjectDto>,
    pub message: String,
}

impl ProjectResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            project: None,
            message: message.into(),
        }
    }
}

/// Response envelope for adding an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResponse {
    pub ok: bool,
    pub project_id: Option<String>,
    pub item: Option<ProjectItemDto>,
    pub message: String,
}

impl ItemResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            project_id: None,
            item: None,
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Preset item shown in the library grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItemDto {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub category: String,
    pub rarity: String,
    pub rarity_label: String,
    pub rarity_color: String,
    pub stat: String,
}

/// Library search result envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySearchResponse {
    pub ok: bool,
    pub items: Vec<LibraryItemDto>,
    pub message: String,
}

/// Session state visible to the UI. The token is never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub ok: bool,
    /// Logged-in username; `None` when logged out.
    pub username: Option<String>,
    pub message: String,
}

/// Result of one slider input step.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSnapResponse {
    /// Committed value, clamped to the range.
    pub value: f64,
    pub snapped: bool,
    pub modified: bool,
    /// Value formatted with the range's display precision.
    pub display: String,
}

/// Lists all projects in creation order.
///
/// # FFI contract
/// - Sync call, in-memory read after the first call opened the store.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn project_list() -> ProjectListResponse {
    match with_runtime(|runtime| {
        runtime
            .projects
            .projects()
            .iter()
            .map(to_project_dto)
            .collect::<Vec<_>>()
    }) {
        Ok(projects) => {
            let message = if projects.is_empty() {
                "No projects.".to_string()
            } else {
                format!("Found {} project(s).", projects.len())
            };
            ProjectListResponse {
                ok: true,
                projects,
                message,
            }
        }
        Err(err) => ProjectListResponse {
            ok: false,
            projects: Vec::new(),
            message: format!("project_list failed: {err}"),
        },
    }
}

/// Creates an empty project.
///
/// Input semantics:
/// - `name`: trimmed; blank names are rejected.
/// - `category`: one of `weapons|armor|mobs|food|blocks|tools`.
/// - `emoji`: trimmed; blank falls back to the category glyph.
#[flutter_rust_bridge::frb(sync)]
pub fn project_create(name: String, category: String, emoji: String) -> ProjectResponse {
    let name = name.trim().to_string();
    if name.is_empty() {
        return ProjectResponse::failure("project_create failed: name must not be blank");
    }
    let Some(category) = Category::parse(&category) else {
        return ProjectResponse::failure(format!(
            "project_create failed: unknown category `{}`",
            category.trim()
        ));
    };
    let emoji = non_blank(emoji).unwrap_or_else(|| category.emoji().to_string());

    match with_runtime(|runtime| {
        let created = runtime.projects.create_project(name, category, emoji);
        (created, runtime.gateway.take_last_error())
    }) {
        Ok((created, backlog)) => ProjectResponse {
            ok: true,
            project: Some(to_project_dto(&created.value)),
            message: persist_note("Project created.", created.persisted.err().or(backlog)),
        },
        Err(err) => ProjectResponse::failure(format!("project_create failed: {err}")),
    }
}

/// Loads one project by id.
#[flutter_rust_bridge::frb(sync)]
pub fn project_get(project_id: String) -> ProjectResponse {
    match with_runtime(|runtime| {
        runtime
            .projects
            .get_project(project_id.trim())
            .map(to_project_dto)
    }) {
        Ok(Some(project)) => ProjectResponse {
            ok: true,
            project: Some(project),
            message: "Project loaded.".to_string(),
        },
        Ok(None) => ProjectResponse::failure("project_get failed: project not found"),
        Err(err) => ProjectResponse::failure(format!("project_get failed: {err}")),
    }
}

/// Deletes a project. Unknown ids succeed with a "not found" message.
#[flutter_rust_bridge::frb(sync)]
pub fn project_delete(project_id: String) -> ActionResponse {
    match with_runtime(|runtime| {
        let deleted = runtime.projects.delete_project(project_id.trim());
        (deleted, runtime.gateway.take_last_error())
    }) {
        Ok((deleted, backlog)) if deleted.value => ActionResponse::success(persist_note(
            "Project deleted.",
            deleted.persisted.err().or(backlog),
        )),
        Ok(_) => ActionResponse::success("Project not found; nothing deleted."),
        Err(err) => ActionResponse::failure(format!("project_delete failed: {err}")),
    }
}

/// Adds a library item to an existing project.
///
/// Input semantics:
/// - `library_item_id`: preset id from [`library_search`].
/// - `name` / `emoji`: optional editor overrides; blank means unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn project_add_item(
    project_id: String,
    library_item_id: String,
    name: Option<String>,
    emoji: Option<String>,
) -> ItemResponse {
    let Some(mut draft) = ItemDraft::from_library_id(library_item_id.trim()) else {
        return ItemResponse::failure("project_add_item failed: unknown library item");
    };
    if let Some(name) = name.and_then(non_blank) {
        draft.set_name(name);
    }
    if let Some(emoji) = emoji.and_then(non_blank) {
        draft.set_emoji(emoji);
    }

    let target = SaveTarget::Existing(project_id.trim().to_string());
    match with_runtime(|runtime| {
        let saved = draft.save(&mut runtime.projects, target);
        (saved, runtime.gateway.take_last_error())
    }) {
        Ok((Ok(saved), backlog)) => ItemResponse {
            ok: true,
            message: persist_note("Item added.", saved.persisted.err().or(backlog)),
            project_id: Some(saved.project_id),
            item: Some(to_item_dto(&saved.item)),
        },
        Ok((Err(err), _)) => ItemResponse::failure(format!("project_add_item failed: {err}")),
        Err(err) => ItemResponse::failure(format!("project_add_item failed: {err}")),
    }
}

/// Removes an item from a project. Unknown ids succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn project_remove_item(project_id: String, item_id: String) -> ActionResponse {
    match with_runtime(|runtime| {
        let removed = runtime
            .projects
            .remove_item(project_id.trim(), item_id.trim());
        (removed, runtime.gateway.take_last_error())
    }) {
        Ok((removed, backlog)) if removed.value => ActionResponse::success(persist_note(
            "Item removed.",
            removed.persisted.err().or(backlog),
        )),
        Ok(_) => ActionResponse::success("Item not found; nothing removed."),
        Err(err) => ActionResponse::failure(format!("project_remove_item failed: {err}")),
    }
}

/// Blocks until queued snapshot writes reached the database.
///
/// Call when the app moves to the background. Returns empty string on
/// success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn storage_flush() -> String {
    let flushed = with_runtime(|runtime| {
        runtime.gateway.flush()?;
        match runtime.gateway.take_last_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    });
    match flushed {
        Ok(Ok(())) => String::new(),
        Ok(Err(err)) => {
            warn!("event=storage_flush module=ffi status=error error={}", err);
            format!("storage_flush failed: {err}")
        }
        Err(err) => format!("storage_flush failed: {err}"),
    }
}

/// Filters the preset library.
///
/// Input semantics:
/// - `category`: `None` or blank for all categories.
/// - `query`: case-insensitive name substring; blank matches all.
#[flutter_rust_bridge::frb(sync)]
pub fn library_search(category: Option<String>, query: String) -> LibrarySearchResponse {
    let category = match category.and_then(non_blank) {
        Some(raw) => match Category::parse(&raw) {
            Some(category) => Some(category),
            None => {
                return LibrarySearchResponse {
                    ok: false,
                    items: Vec::new(),
                    message: format!("library_search failed: unknown category `{raw}`"),
                }
            }
        },
        None => None,
    };

    let items = filter_library(category, &query)
        .into_iter()
        .map(to_library_dto)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} item(s).", items.len())
    };
    LibrarySearchResponse {
        ok: true,
        items,
        message,
    }
}

/// Stores login credentials.
#[flutter_rust_bridge::frb(sync)]
pub fn session_login(username: String, github_token: String) -> SessionResponse {
    match with_runtime(|runtime| runtime.sessions.login(&username, &github_token)) {
        Ok(Ok(session)) => SessionResponse {
            ok: true,
            username: Some(session.username),
            message: "Logged in.".to_string(),
        },
        Ok(Err(err)) => SessionResponse {
            ok: false,
            username: None,
            message: format!("session_login failed: {err}"),
        },
        Err(err) => SessionResponse {
            ok: false,
            username: None,
            message: format!("session_login failed: {err}"),
        },
    }
}

/// Returns the logged-in username, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn session_current() -> SessionResponse {
    match with_runtime(|runtime| runtime.sessions.load()) {
        Ok(Some(session)) => SessionResponse {
            ok: true,
            username: Some(session.username),
            message: "Logged in.".to_string(),
        },
        Ok(None) => SessionResponse {
            ok: true,
            username: None,
            message: "Logged out.".to_string(),
        },
        Err(err) => SessionResponse {
            ok: false,
            username: None,
            message: format!("session_current failed: {err}"),
        },
    }
}

/// Clears stored credentials.
#[flutter_rust_bridge::frb(sync)]
pub fn session_logout() -> ActionResponse {
    match with_runtime(|runtime| runtime.sessions.logout()) {
        Ok(Ok(())) => ActionResponse::success("Logged out."),
        Ok(Err(err)) => ActionResponse::failure(format!("session_logout failed: {err}")),
        Err(err) => ActionResponse::failure(format!("session_logout failed: {err}")),
    }
}

/// Applies one raw slider input for UI-held slider state.
///
/// # FFI contract
/// - Pure computation, no storage access.
/// - Non-finite input commits the default.
/// - Non-finite bounds collapse onto the default; a non-finite default
///   falls back to the first finite bound, then `0.0`.
#[flutter_rust_bridge::frb(sync)]
pub fn slider_snap(raw: f64, default_value: f64, min: f64, max: f64) -> SliderSnapResponse {
    if !(default_value.is_finite() && min.is_finite() && max.is_finite()) {
        warn!("event=slider_snap module=ffi status=warning detail=non_finite_bounds");
    }
    let mut slider = SnapSlider::new(default_value, min, max, 0.0);
    let raw = if raw.is_finite() {
        raw
    } else {
        slider.default_value()
    };
    slider.input(raw);
    SliderSnapResponse {
        value: slider.value(),
        snapped: slider.is_snapped(),
        modified: slider.is_modified(),
        display: slider.display(),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            let config = CoreConfig::from_env();
            for warning in &config.warnings {
                warn!("event=config_resolve module=ffi status=warning detail={}", warning);
            }
            config.db_path
        })
        .clone()
}

fn runtime() -> Result<&'static Mutex<Runtime>, String> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }

    let db_path = resolve_db_path();
    let sqlite = SqliteKeyValueStore::open(&db_path).map_err(|err| {
        error!("event=store_open module=ffi status=error error={}", err);
        format!("store open failed: {err}")
    })?;
    let gateway: Gateway = Arc::new(
        QueuedKeyValueStore::new(sqlite).map_err(|err| format!("store writer failed: {err}"))?,
    );
    let runtime = Runtime {
        projects: ProjectStore::open(Arc::clone(&gateway)),
        sessions: SessionStore::new(Arc::clone(&gateway)),
        gateway,
    };
    info!(
        "event=store_open module=ffi status=ok projects={}",
        runtime.projects.projects().len()
    );

    // A concurrent first call may have won the race; its runtime is kept.
    let _ = RUNTIME.set(Mutex::new(runtime));
    RUNTIME
        .get()
        .ok_or_else(|| "store init failed".to_string())
}

fn with_runtime<T>(f: impl FnOnce(&mut Runtime) -> T) -> Result<T, String> {
    let mut guard = runtime()?
        .lock()
        .map_err(|_| "store lock poisoned".to_string())?;
    Ok(f(&mut guard))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn persist_note(message: &str, failure: Option<StorageError>) -> String {
    match failure {
        None => message.to_string(),
        Some(err) => {
            warn!("event=snapshot_write module=ffi status=error error={}", err);
            format!("{message} Saving to disk failed; changes are kept for this session.")
        }
    }
}

fn to_project_dto(project: &Project) -> ProjectDto {
    ProjectDto {
        id: project.id.clone(),
        name: project.name.clone(),
        category: project.category.as_str().to_string(),
        emoji: project.emoji.clone(),
        created_at: project.created_at.clone(),
        items: project.items.iter().map(to_item_dto).collect(),
    }
}

fn to_item_dto(item: &ProjectItem) -> ProjectItemDto {
    ProjectItemDto {
        id: item.id.clone(),
        name: item.name.clone(),
        emoji: item.emoji.clone(),
        stat: item.stat.clone(),
        rarity: item.rarity.as_str().to_string(),
        rarity_label: item.rarity.label().to_string(),
        rarity_color: item.rarity.color_hex().to_string(),
        category: item.category.as_str().to_string(),
    }
}

fn to_library_dto(item: &LibraryItem) -> LibraryItemDto {
    LibraryItemDto {
        id: item.id.to_string(),
        name: item.name.to_string(),
        emoji: item.emoji.to_string(),
        category: item.category.as_str().to_string(),
        rarity: item.rarity.as_str().to_string(),
        rarity_label: item.rarity.label().to_string(),
        rarity_color: item.rarity.color_hex().to_string(),
        stat: item.stat.to_string(),
    }
}

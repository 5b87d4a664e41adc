//! Subcommand handlers.
//!
//! Every handler writes human-readable lines to `out`; project ids are
//! printed first on each project line so they can be piped into other
//! commands.

use crate::cli::Commands;
use gameforge_core::{
    filter_library, CoreConfig, ItemDraft, KeyValueStore, Project, ProjectStore, SaveTarget,
    SessionError, SessionStore, SqliteKeyValueStore, StorageError, VanillaCatalog,
    WorkshopError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

#[derive(Debug)]
pub enum CommandError {
    Storage(StorageError),
    Session(SessionError),
    Workshop(WorkshopError),
    ProjectNotFound(String),
    UnknownLibraryItem(String),
    UnknownVanillaItem(String),
    Output(std::io::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage failed: {err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Workshop(err) => write!(f, "{err}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::UnknownLibraryItem(id) => write!(f, "unknown library item: {id}"),
            Self::UnknownVanillaItem(id) => write!(f, "unknown vanilla item: {id}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Workshop(err) => Some(err),
            Self::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for CommandError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<SessionError> for CommandError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<WorkshopError> for CommandError {
    fn from(value: WorkshopError) -> Self {
        Self::Workshop(value)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Opens the configured database and runs one command against stdout.
pub fn run(command: Commands, config: &CoreConfig) -> CommandResult {
    let gateway = SqliteKeyValueStore::open(&config.db_path)?;
    let stdout = std::io::stdout();
    execute(command, &gateway, &mut stdout.lock())
}

/// Runs one command against an arbitrary gateway.
pub fn execute<S: KeyValueStore>(command: Commands, gateway: S, out: &mut dyn Write) -> CommandResult {
    match command {
        Commands::List => list(&ProjectStore::open(gateway), out),
        Commands::Create {
            name,
            category,
            emoji,
        } => {
            let mut store = ProjectStore::open(gateway);
            let emoji = emoji.unwrap_or_else(|| category.emoji().to_string());
            let created = store.create_project(name, category, emoji);
            created.persisted?;
            writeln!(out, "{}", project_line(&created.value))?;
            Ok(())
        }
        Commands::Show { project_id } => {
            let store = ProjectStore::open(gateway);
            let project = store
                .get_project(&project_id)
                .ok_or(CommandError::ProjectNotFound(project_id.clone()))?;
            show(project, out)
        }
        Commands::Delete { project_id } => {
            let mut store = ProjectStore::open(gateway);
            let deleted = store.delete_project(&project_id);
            if !deleted.value {
                return Err(CommandError::ProjectNotFound(project_id));
            }
            deleted.persisted?;
            writeln!(out, "deleted {project_id}")?;
            Ok(())
        }
        Commands::AddItem {
            project_id,
            library_item_id,
            name,
            emoji,
        } => {
            let mut draft = ItemDraft::from_library_id(&library_item_id)
                .ok_or(CommandError::UnknownLibraryItem(library_item_id))?;
            if let Some(name) = name {
                draft.set_name(name);
            }
            if let Some(emoji) = emoji {
                draft.set_emoji(emoji);
            }
            let mut store = ProjectStore::open(gateway);
            let saved = draft.save(&mut store, SaveTarget::Existing(project_id))?;
            saved.persisted?;
            writeln!(
                out,
                "{}\t{} {}\t{}\t{}",
                saved.item.id,
                saved.item.emoji,
                saved.item.name,
                saved.item.stat,
                saved.item.rarity.label()
            )?;
            Ok(())
        }
        Commands::RemoveItem {
            project_id,
            item_id,
        } => {
            let mut store = ProjectStore::open(gateway);
            if store.get_project(&project_id).is_none() {
                return Err(CommandError::ProjectNotFound(project_id));
            }
            let removed = store.remove_item(&project_id, &item_id);
            removed.persisted?;
            if removed.value {
                writeln!(out, "removed {item_id}")?;
            } else {
                writeln!(out, "no item {item_id} in {project_id}")?;
            }
            Ok(())
        }
        Commands::Catalog { query, category } => {
            for item in filter_library(category, &query) {
                writeln!(
                    out,
                    "{}\t{} {}\t{}\t{}\t{}",
                    item.id,
                    item.emoji,
                    item.name,
                    item.category,
                    item.rarity.label(),
                    item.stat
                )?;
            }
            Ok(())
        }
        Commands::Ranges { vanilla_id } => ranges(vanilla_id.as_deref(), out),
        Commands::Login { username, token } => {
            let session = SessionStore::new(gateway).login(&username, &token)?;
            writeln!(out, "logged in as {}", session.username)?;
            Ok(())
        }
        Commands::Logout => {
            SessionStore::new(gateway).logout()?;
            writeln!(out, "logged out")?;
            Ok(())
        }
        Commands::Whoami => {
            match SessionStore::new(gateway).load() {
                Some(session) => writeln!(out, "{}", session.username)?,
                None => writeln!(out, "not logged in")?,
            }
            Ok(())
        }
    }
}

fn list<S: KeyValueStore>(store: &ProjectStore<S>, out: &mut dyn Write) -> CommandResult {
    if store.projects().is_empty() {
        writeln!(out, "no projects")?;
    }
    for project in store.projects() {
        writeln!(out, "{}", project_line(project))?;
    }
    Ok(())
}

fn show(project: &Project, out: &mut dyn Write) -> CommandResult {
    writeln!(out, "{}", project_line(project))?;
    writeln!(out, "created {}", project.created_at)?;
    for item in &project.items {
        writeln!(
            out,
            "  {}\t{} {}\t{}\t{}",
            item.id,
            item.emoji,
            item.name,
            item.stat,
            item.rarity.label()
        )?;
    }
    Ok(())
}

fn ranges(vanilla_id: Option<&str>, out: &mut dyn Write) -> CommandResult {
    let catalog = VanillaCatalog::builtin();
    let Some(id) = vanilla_id else {
        for id in catalog.ids() {
            writeln!(out, "{id}")?;
        }
        return Ok(());
    };

    let item = catalog
        .get(id)
        .ok_or_else(|| CommandError::UnknownVanillaItem(id.to_string()))?;
    writeln!(out, "{} {} ({})", item.emoji, item.name_en, item.category)?;
    writeln!(out, "texture {}", item.texture_url())?;
    for range in item.stat_ranges() {
        let slider = range.slider();
        writeln!(
            out,
            "  {} {}\tdefault {}\trange {}..{}\tstep {}",
            range.kind.emoji(),
            range.kind.label(),
            slider.display_with_default(range.kind.unit()),
            slider.format_value(range.min),
            slider.format_value(range.max),
            range.kind.step()
        )?;
    }
    Ok(())
}

fn project_line(project: &Project) -> String {
    format!(
        "{}\t{} {}\t{}\t{} item(s)",
        project.id,
        project.emoji,
        project.name,
        project.category,
        project.item_count()
    )
}

#[cfg(test)]
mod tests {
    use super::{execute, CommandError};
    use crate::cli::Commands;
    use gameforge_core::{Category, MemoryKeyValueStore, ProjectStore};

    fn run(gateway: &MemoryKeyValueStore, command: Commands) -> Result<String, CommandError> {
        let mut out = Vec::new();
        execute(command, gateway, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn create_add_show_round_trip() {
        let gateway = MemoryKeyValueStore::new();
        let created = run(
            &gateway,
            Commands::Create {
                name: "Fire Swords".to_string(),
                category: Category::Weapons,
                emoji: None,
            },
        )
        .unwrap();
        let project_id = created.split('\t').next().unwrap().to_string();
        assert!(created.contains("⚔️ Fire Swords"));

        let added = run(
            &gateway,
            Commands::AddItem {
                project_id: project_id.clone(),
                library_item_id: "w3".to_string(),
                name: Some("Blaze Blade".to_string()),
                emoji: Some("🔥".to_string()),
            },
        )
        .unwrap();
        assert!(added.contains("🔥 Blaze Blade"));

        let shown = run(&gateway, Commands::Show { project_id }).unwrap();
        assert!(shown.contains("1 item(s)"));
        assert!(shown.contains("Blaze Blade\t35 DMG\tEpic"));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let gateway = MemoryKeyValueStore::new();
        assert!(matches!(
            run(&gateway, Commands::Delete { project_id: "nope".to_string() }),
            Err(CommandError::ProjectNotFound(_))
        ));
        assert!(matches!(
            run(
                &gateway,
                Commands::AddItem {
                    project_id: "nope".to_string(),
                    library_item_id: "zz".to_string(),
                    name: None,
                    emoji: None,
                }
            ),
            Err(CommandError::UnknownLibraryItem(_))
        ));
        assert!(matches!(
            run(&gateway, Commands::Ranges { vanilla_id: Some("nope".to_string()) }),
            Err(CommandError::UnknownVanillaItem(_))
        ));
    }

    #[test]
    fn remove_item_keeps_project() {
        let gateway = MemoryKeyValueStore::new();
        let project_id = {
            let mut store = ProjectStore::new(&gateway);
            let project = store
                .create_project("Snacks", Category::Food, "🍖")
                .into_value();
            let item = store
                .add_item(
                    &project.id,
                    gameforge_core::library_item("f2").unwrap().to_new_item(),
                )
                .into_value()
                .unwrap();
            let output = run(
                &gateway,
                Commands::RemoveItem {
                    project_id: project.id.clone(),
                    item_id: item.id,
                },
            )
            .unwrap();
            assert!(output.starts_with("removed"));
            project.id
        };

        let listed = run(&gateway, Commands::List).unwrap();
        assert!(listed.contains(&project_id));
        assert!(listed.contains("0 item(s)"));
    }

    #[test]
    fn catalog_and_ranges_print_reference_data() {
        let gateway = MemoryKeyValueStore::new();
        let swords = run(
            &gateway,
            Commands::Catalog {
                query: "sword".to_string(),
                category: Some(Category::Weapons),
            },
        )
        .unwrap();
        assert!(swords.lines().all(|line| line.to_lowercase().contains("sword")));
        assert!(swords.contains("Diamond Sword"));

        let ranges = run(
            &gateway,
            Commands::Ranges {
                vanilla_id: Some("diamond_sword".to_string()),
            },
        )
        .unwrap();
        assert!(ranges.contains("texture https://"));
        assert_eq!(ranges.lines().count(), 5);
    }

    #[test]
    fn session_commands_hide_token() {
        let gateway = MemoryKeyValueStore::new();
        let login = run(
            &gateway,
            Commands::Login {
                username: "steve".to_string(),
                token: "ghp_secret".to_string(),
            },
        )
        .unwrap();
        assert_eq!(login.trim(), "logged in as steve");
        assert_eq!(run(&gateway, Commands::Whoami).unwrap().trim(), "steve");

        run(&gateway, Commands::Logout).unwrap();
        assert_eq!(run(&gateway, Commands::Whoami).unwrap().trim(), "not logged in");
    }
}

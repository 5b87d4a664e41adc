//! Command-line arguments.

use clap::{Parser, Subcommand};
use gameforge_core::Category;
use std::path::PathBuf;

/// GameForge Studio core - manage item packs from the terminal
#[derive(Parser, Debug)]
#[command(name = "gameforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (defaults to GAMEFORGE_DB_PATH or the temp dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files (defaults to GAMEFORGE_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all projects
    #[command(name = "list")]
    List,

    /// Create an empty project
    #[command(name = "create")]
    Create {
        /// Project name
        name: String,

        /// weapons, armor, mobs, food, blocks or tools
        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        /// Project emoji (defaults to the category glyph)
        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Show one project with its items
    #[command(name = "show")]
    Show {
        /// Project id
        project_id: String,
    },

    /// Delete a project
    #[command(name = "delete")]
    Delete {
        /// Project id
        project_id: String,
    },

    /// Add a library item to a project
    #[command(name = "add-item")]
    AddItem {
        /// Project id
        project_id: String,

        /// Library item id (see `catalog`)
        library_item_id: String,

        /// Custom item name
        #[arg(short, long)]
        name: Option<String>,

        /// Custom item emoji
        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Remove an item from a project
    #[command(name = "remove-item")]
    RemoveItem {
        /// Project id
        project_id: String,

        /// Item id
        item_id: String,
    },

    /// Browse the preset item library
    #[command(name = "catalog")]
    Catalog {
        /// Case-insensitive name filter
        #[arg(default_value = "")]
        query: String,

        /// Only show one category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
    },

    /// Show editor slider ranges for a vanilla item
    #[command(name = "ranges")]
    Ranges {
        /// Vanilla item id such as `diamond_sword`; omit to list ids
        vanilla_id: Option<String>,
    },

    /// Store GitHub credentials
    #[command(name = "login")]
    Login {
        /// GitHub username
        username: String,

        /// GitHub personal access token
        #[arg(short, long)]
        token: String,
    },

    /// Forget stored credentials
    #[command(name = "logout")]
    Logout,

    /// Print the logged-in user
    #[command(name = "whoami")]
    Whoami,
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let known = Category::ALL
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown category `{value}` (expected one of: {known})")
    })
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};
    use gameforge_core::Category;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_parses_category_case_insensitively() {
        let cli = Cli::parse_from(["gameforge", "create", "Fire Swords", "-c", "Weapons"]);
        match cli.command {
            Commands::Create {
                name,
                category,
                emoji,
            } => {
                assert_eq!(name, "Fire Swords");
                assert_eq!(category, Category::Weapons);
                assert!(emoji.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["gameforge", "create", "x", "-c", "potions"]).is_err());
    }

    #[test]
    fn global_db_flag_follows_subcommand() {
        let cli = Cli::parse_from(["gameforge", "list", "--db", "/tmp/gf.sqlite3"]);
        assert_eq!(
            cli.db.as_deref(),
            Some(std::path::Path::new("/tmp/gf.sqlite3"))
        );
    }
}

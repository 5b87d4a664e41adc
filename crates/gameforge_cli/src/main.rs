//! GameForge command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and dispatch one subcommand.
//! - Exit non-zero with a message on stderr when a command fails.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use gameforge_core::{init_logging_with, CoreConfig, LogLevel};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(&cli);
    for warning in &config.warnings {
        eprintln!("warning: {warning}");
    }

    // The CLI stays usable without file logs.
    if let Err(err) = init_logging_with(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    match commands::run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = absolute(dir);
    }
    if let Some(level) = &cli.log_level {
        match LogLevel::parse(level) {
            Ok(level) => config.log_level = level,
            Err(err) => config.warnings.push(format!("--log-level: {err}")),
        }
    }
    config
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

//! Connection setup.

use super::migrations::migrate;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) a database file with a current schema.
///
/// Missing parent directories are created. File databases use WAL so the
/// write-behind worker does not block readers.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started = Instant::now();
    let result = ensure_parent_dir(path)
        .and_then(|()| Connection::open(path).map_err(DbError::from))
        .and_then(|mut conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            prepare(&mut conn)?;
            Ok(conn)
        });
    log_open("file", started, &result);
    result
}

/// Opens a private in-memory database with a current schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(|mut conn| {
            prepare(&mut conn)?;
            Ok(conn)
        });
    log_open("memory", started, &result);
    result
}

fn ensure_parent_dir(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|source| DbError::CreateDir {
                path: parent.to_path_buf(),
                source,
            }),
        _ => Ok(()),
    }
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    migrate(conn)?;
    Ok(())
}

fn log_open(target: &str, started: Instant, result: &DbResult<Connection>) {
    let elapsed_ms = started.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={} duration_ms={}",
            target, elapsed_ms
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={} error={}",
            target, elapsed_ms, err
        ),
    }
}

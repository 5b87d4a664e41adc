//! Key-value gateway contract and error type.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Storage key holding the JSON array of projects.
pub const PROJECTS_STORAGE_KEY: &str = "@gameforge_projects";
/// Storage key holding the JSON-encoded login session.
pub const AUTH_STORAGE_KEY: &str = "@gameforge_auth";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a key-value gateway.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite backend failure.
    Db(DbError),
    /// Value could not be encoded before writing.
    Encode(serde_json::Error),
    /// Backend cannot serve requests (poisoned lock, injected failure, ...).
    Unavailable(String),
    /// Write-behind worker is no longer running.
    WorkerStopped,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode value: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::WorkerStopped => write!(f, "storage writer stopped"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Unavailable(_) | Self::WorkerStopped => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Async-storage style gateway: opaque string values under fixed keys.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` when the key was never set.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Deletes `key`; deleting a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

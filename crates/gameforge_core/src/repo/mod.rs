//! Persistence gateway contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value contract the stores persist through.
//! - Provide in-memory, SQLite and write-behind queue implementations.
//!
//! # Invariants
//! - Values are opaque strings; stores own the encoding.
//! - A `set` fully replaces the previous value under the key.

pub mod kv_repo;
pub mod memory_kv;
pub mod queued_kv;
pub mod sqlite_kv;

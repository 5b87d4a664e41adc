//! Domain model for projects, their items and the user session.
//!
//! # Responsibility
//! - Define the canonical data structures persisted through the gateway.
//! - Keep the JSON snapshot shape stable for existing on-device data.
//!
//! # Invariants
//! - Every project and item carries an opaque id that is never reused.
//! - Items keep insertion order inside their project.

pub mod category;
pub mod project;
pub mod rarity;
pub mod session;

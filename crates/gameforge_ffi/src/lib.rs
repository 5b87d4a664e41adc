//! Flutter-facing bindings for the GameForge core.

pub mod api;

//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory state for projects and the login session.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod project_store;
pub mod session_store;
pub mod workshop;

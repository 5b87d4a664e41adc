//! Static item reference data.
//!
//! # Responsibility
//! - Expose the preset library shown on the library screen.
//! - Expose vanilla base stats and the slider ranges derived from them.
//!
//! # Invariants
//! - Catalog data is read-only; projects copy fields and keep no reference.

pub mod library;
pub mod vanilla;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors while decoding a catalog dataset.
#[derive(Debug)]
pub enum CatalogError {
    /// Dataset is not valid JSON or lacks the `items` object.
    InvalidJson(serde_json::Error),
    /// One entry does not match the item schema.
    InvalidItem {
        id: String,
        source: serde_json::Error,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid catalog dataset: {err}"),
            Self::InvalidItem { id, source } => {
                write!(f, "invalid catalog item `{id}`: {source}")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::InvalidItem { source, .. } => Some(source),
        }
    }
}

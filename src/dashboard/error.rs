//! Dashboard error types
//!
//! None of these escape a page render: fragment failures become unavailable
//! slots and freshness failures become an unknown timestamp.
//!
//! There is no "unresolvable location" error. Any non-empty key is accepted
//! and an unknown one simply yields unavailable fragments downstream.

use thiserror::Error;

/// A named fragment could not be loaded from the store
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("fragment '{name}' not found")]
    NotFound { name: String },

    /// Name would escape the store root or is not a plain file name
    #[error("fragment name '{name}' rejected: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("failed to read fragment '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// The data-source timestamp could not be read
#[derive(Debug, Error)]
pub enum FreshnessError {
    #[error("data source '{path}' unavailable: {reason}")]
    Unavailable { path: String, reason: String },
}

/// Invalid page template configuration, fatal at start-up only
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("page '{page}': unknown slot '{slot}'")]
    UnknownSlot { page: String, slot: String },

    #[error("page '{page}': no slots configured")]
    NoSlots { page: String },

    #[error("page '{page}': slot {slot} listed twice")]
    DuplicateSlot { page: String, slot: &'static str },

    #[error("page '{page}': suffix for {slot} is empty")]
    EmptySuffix { page: String, slot: &'static str },

    #[error("page '{page}': suffix '{shorter}' is a suffix of '{longer}', fragment names would collide")]
    AmbiguousSuffix {
        page: String,
        shorter: String,
        longer: String,
    },

    #[error("page '{page}': route path '{path}' must start with '/'")]
    InvalidPath { page: String, path: String },

    #[error("route path '{path}' is used by more than one page")]
    DuplicatePath { path: String },

    #[error("page '{page}': columns must be at least 1")]
    ZeroColumns { page: String },
}

//! Error types for the weft domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Store failures are never fatal to resolution: the resolver recovers
//! from `NotFound` and `Unavailable` by falling to the next rung of the
//! priority hierarchy, and analyzers degrade instead of surfacing
//! `Unreadable` content.

use thiserror::Error;
use uuid::Uuid;

/// The top-level error type for all weft operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Analysis errors ---
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures reported by store collaborators (uploaded-file store,
/// workspace store). Both variants trigger the documented fallback paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Not found: {id}")]
    NotFound { id: Uuid },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failures from content analysis. Raised only when raw content cannot be
/// read at all; malformed or empty content yields degraded artifacts
/// instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Content unreadable: {0}")]
    Unreadable(String),
}

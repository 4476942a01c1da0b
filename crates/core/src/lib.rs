//! # Weft Core
//!
//! Domain types, traits, and error definitions for the weft context
//! resolution engine. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The engine's external collaborators (uploaded-file store, workspace
//! store) are defined as traits here. Implementations live in their own
//! crates. This enables:
//! - Swapping store backends via configuration
//! - Easy testing with in-memory/failing implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod artifact;
pub mod context;
pub mod directive;
pub mod error;
pub mod request;
pub mod store;
pub mod upload;
pub mod workspace;

// Re-export key types at crate root for ergonomics
pub use artifact::{
    AnalysisArtifact, ArtifactKind, ArtifactPayload, ColumnSummary, ColumnType, NarrativeIndex,
    NumericProfile, SourceFile, TabularSummary, TextChunk,
};
pub use context::{Origin, PrimaryContext, Provenance, ResolvedContext};
pub use directive::{ResponseDirective, ResponseStyle};
pub use error::{AnalysisError, Error, Result, StoreError};
pub use request::{ChatRequest, ContextScope, SessionIdentity};
pub use store::{FileStore, WorkspaceStore};
pub use upload::{ContentKind, UploadedFile};
pub use workspace::{NodeKind, WorkspaceNode, WorkspaceTree};

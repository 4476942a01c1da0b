//! Store backends for the weft engine.
//!
//! Production deployments put real clients (object storage, database)
//! behind the `FileStore`/`WorkspaceStore` traits from `weft-core`. This
//! crate ships the backends the engine itself needs:
//!
//! - in-memory backends for tests and ephemeral sessions
//! - always-failing backends for exercising degradation paths

pub mod in_memory;
pub mod unavailable;

pub use in_memory::{InMemoryFileStore, InMemoryWorkspaceStore};
pub use unavailable::{UnavailableFileStore, UnavailableWorkspaceStore};

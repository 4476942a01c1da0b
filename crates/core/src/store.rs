//! Store traits — the abstractions over the engine's external
//! collaborators.
//!
//! The engine only ever reads through these traits. Timeouts and retries
//! are the backing client's concern; from the engine's side any failure is
//! one of the `StoreError` variants and triggers a documented fallback,
//! never a fatal error.

use crate::error::StoreError;
use crate::upload::UploadedFile;
use crate::workspace::{WorkspaceNode, WorkspaceTree};
use async_trait::async_trait;
use uuid::Uuid;

/// Fetch-by-id access to uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Fetch an uploaded file by id.
    async fn fetch(&self, id: Uuid) -> Result<UploadedFile, StoreError>;
}

/// Read-only access to workspace content.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Fetch a single node by id.
    async fn fetch_node(&self, id: Uuid) -> Result<WorkspaceNode, StoreError>;

    /// Fetch the tree rooted at `root`, descendants included, depth-first
    /// in stored child order.
    async fn fetch_tree(&self, root: Uuid) -> Result<WorkspaceTree, StoreError>;
}

//! Always-failing backends — every call reports `StoreError::Unavailable`.
//!
//! Used to exercise the engine's degradation paths: resolution must fall
//! back, never fail, when a collaborator is down.

use async_trait::async_trait;
use uuid::Uuid;
use weft_core::error::StoreError;
use weft_core::store::{FileStore, WorkspaceStore};
use weft_core::upload::UploadedFile;
use weft_core::workspace::{WorkspaceNode, WorkspaceTree};

/// A file store whose backing service is unreachable.
#[derive(Clone, Default)]
pub struct UnavailableFileStore;

#[async_trait]
impl FileStore for UnavailableFileStore {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn fetch(&self, _id: Uuid) -> Result<UploadedFile, StoreError> {
        Err(StoreError::Unavailable("file store is down".into()))
    }
}

/// A workspace store whose backing service is unreachable.
#[derive(Clone, Default)]
pub struct UnavailableWorkspaceStore;

#[async_trait]
impl WorkspaceStore for UnavailableWorkspaceStore {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn fetch_node(&self, _id: Uuid) -> Result<WorkspaceNode, StoreError> {
        Err(StoreError::Unavailable("workspace store is down".into()))
    }

    async fn fetch_tree(&self, _root: Uuid) -> Result<WorkspaceTree, StoreError> {
        Err(StoreError::Unavailable("workspace store is down".into()))
    }
}

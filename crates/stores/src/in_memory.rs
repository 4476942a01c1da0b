//! In-memory backends — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use weft_core::error::StoreError;
use weft_core::store::{FileStore, WorkspaceStore};
use weft_core::upload::UploadedFile;
use weft_core::workspace::{WorkspaceNode, WorkspaceTree};

/// An uploaded-file store backed by a HashMap.
#[derive(Clone, Default)]
pub struct InMemoryFileStore {
    files: Arc<RwLock<HashMap<Uuid, UploadedFile>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, returning its id.
    pub async fn insert(&self, file: UploadedFile) -> Uuid {
        let id = file.id;
        self.files.write().await.insert(id, file);
        id
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.files.write().await.remove(&id).is_some()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn fetch(&self, id: Uuid) -> Result<UploadedFile, StoreError> {
        self.files
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }
}

/// A workspace store backed by a HashMap of nodes. Trees are assembled on
/// demand by walking stored child links.
#[derive(Clone, Default)]
pub struct InMemoryWorkspaceStore {
    nodes: Arc<RwLock<HashMap<Uuid, WorkspaceNode>>>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning its id.
    pub async fn insert(&self, node: WorkspaceNode) -> Uuid {
        let id = node.id;
        self.nodes.write().await.insert(id, node);
        id
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.nodes.write().await.remove(&id).is_some()
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn fetch_node(&self, id: Uuid) -> Result<WorkspaceNode, StoreError> {
        self.nodes
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn fetch_tree(&self, root: Uuid) -> Result<WorkspaceTree, StoreError> {
        let nodes = self.nodes.read().await;
        let all: Vec<WorkspaceNode> = nodes.values().cloned().collect();
        WorkspaceTree::from_nodes(root, &all).ok_or(StoreError::NotFound { id: root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weft_core::workspace::NodeKind;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            file_name: name.into(),
            declared_type: None,
            content: b"hello".to_vec(),
            uploaded_at: Utc::now(),
        }
    }

    fn node(title: &str, children: Vec<Uuid>) -> WorkspaceNode {
        WorkspaceNode {
            id: Uuid::new_v4(),
            kind: NodeKind::Page,
            title: title.into(),
            content: format!("{title} body"),
            children,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn fetch_returns_inserted_file() {
        let store = InMemoryFileStore::new();
        let id = store.insert(file("data.csv")).await;

        let fetched = store.fetch(id).await.unwrap();
        assert_eq!(fetched.file_name, "data.csv");
    }

    #[tokio::test]
    async fn fetch_missing_file_is_not_found() {
        let store = InMemoryFileStore::new();
        let id = Uuid::new_v4();
        assert_eq!(
            store.fetch(id).await.unwrap_err(),
            StoreError::NotFound { id }
        );
    }

    #[tokio::test]
    async fn fetch_tree_walks_child_links() {
        let store = InMemoryWorkspaceStore::new();
        let leaf = node("Leaf", vec![]);
        let leaf_id = leaf.id;
        let root = node("Root", vec![leaf_id]);
        let root_id = root.id;
        store.insert(leaf).await;
        store.insert(root).await;

        let tree = store.fetch_tree(root_id).await.unwrap();
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.nodes[0].id, root_id);
        assert_eq!(tree.nodes[1].id, leaf_id);
    }

    #[tokio::test]
    async fn fetch_tree_missing_root_is_not_found() {
        let store = InMemoryWorkspaceStore::new();
        let id = Uuid::new_v4();
        assert_eq!(
            store.fetch_tree(id).await.unwrap_err(),
            StoreError::NotFound { id }
        );
    }

    #[tokio::test]
    async fn removed_node_disappears_from_tree() {
        let store = InMemoryWorkspaceStore::new();
        let leaf = node("Leaf", vec![]);
        let leaf_id = leaf.id;
        let root = node("Root", vec![leaf_id]);
        let root_id = root.id;
        store.insert(leaf).await;
        store.insert(root).await;

        assert!(store.remove(leaf_id).await);
        let tree = store.fetch_tree(root_id).await.unwrap();
        assert_eq!(tree.nodes.len(), 1);
    }
}

//! Enrichment composition — layering broader workspace material around a
//! narrow focus.
//!
//! Secondary material is every node of the focus's workspace except the
//! focus itself and its descendants (those are already primary). Order is
//! depth-first tree position, the stored sibling order — the one
//! deterministic ordering the read-only tree exposes. The result is capped
//! at a configured item count: first N in order, rest dropped, so the
//! payload stays inside downstream generation limits.
//!
//! Any workspace fetch failure degrades to empty enrichment; the focus
//! stands alone rather than failing the resolution.

use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;
use weft_core::store::WorkspaceStore;
use weft_core::workspace::{WorkspaceNode, WorkspaceTree};

/// Composes secondary material around a focused context.
#[derive(Debug, Clone)]
pub struct EnrichmentComposer {
    /// Deterministic bound on secondary items.
    max_items: usize,
}

impl EnrichmentComposer {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    /// Fetch the workspace tree and rank its nodes as enrichment for
    /// `focus`. Returns an empty sequence when the workspace cannot be
    /// fetched or holds nothing beyond the focus subtree.
    pub async fn compose(
        &self,
        focus: &WorkspaceNode,
        workspace_id: Uuid,
        store: &dyn WorkspaceStore,
    ) -> Vec<WorkspaceNode> {
        let tree = match store.fetch_tree(workspace_id).await {
            Ok(tree) => tree,
            Err(e) => {
                warn!(
                    workspace_id = %workspace_id,
                    store = store.name(),
                    error = %e,
                    "enrichment: workspace unavailable, composing without secondary material"
                );
                return Vec::new();
            }
        };
        self.rank(focus, &tree)
    }

    /// Pure ranking over an already-fetched tree.
    pub fn rank(&self, focus: &WorkspaceNode, tree: &WorkspaceTree) -> Vec<WorkspaceNode> {
        let mut excluded: HashSet<Uuid> = HashSet::from([focus.id]);
        // Walk the focus subtree through the tree's child links; covers a
        // focus that lives in the tree and one fetched independently.
        let mut stack: Vec<Uuid> = focus.children.clone();
        while let Some(id) = stack.pop() {
            if !excluded.insert(id) {
                continue;
            }
            if let Some(node) = tree.get(id) {
                stack.extend(node.children.iter().copied());
            }
        }

        let candidates: Vec<WorkspaceNode> = tree
            .nodes
            .iter()
            .filter(|n| !excluded.contains(&n.id))
            .cloned()
            .collect();

        let total = candidates.len();
        let mut ranked = candidates;
        ranked.truncate(self.max_items);
        if ranked.len() < total {
            debug!(
                included = ranked.len(),
                dropped = total - ranked.len(),
                "enrichment: item cap reached, rest dropped"
            );
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weft_core::workspace::NodeKind;
    use weft_stores::{InMemoryWorkspaceStore, UnavailableWorkspaceStore};

    fn node(kind: NodeKind, title: &str, children: Vec<Uuid>) -> WorkspaceNode {
        WorkspaceNode {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            content: format!("{title} body"),
            children,
            updated_at: Utc::now(),
        }
    }

    /// root → (focus → focus_child, sib1, sib2)
    async fn seeded_store() -> (InMemoryWorkspaceStore, Uuid, WorkspaceNode, Uuid, Uuid, Uuid) {
        let store = InMemoryWorkspaceStore::new();
        let focus_child = node(NodeKind::SubPage, "FocusChild", vec![]);
        let focus_child_id = focus_child.id;
        let focus = node(NodeKind::Page, "Focus", vec![focus_child_id]);
        let sib1 = node(NodeKind::Page, "Sib1", vec![]);
        let sib1_id = sib1.id;
        let sib2 = node(NodeKind::Page, "Sib2", vec![]);
        let sib2_id = sib2.id;
        let root = node(NodeKind::Page, "Root", vec![focus.id, sib1_id, sib2_id]);
        let root_id = root.id;

        store.insert(focus_child).await;
        store.insert(focus.clone()).await;
        store.insert(sib1).await;
        store.insert(sib2).await;
        store.insert(root).await;
        (store, root_id, focus, focus_child_id, sib1_id, sib2_id)
    }

    #[tokio::test]
    async fn excludes_focus_and_descendants() {
        let (store, root_id, focus, focus_child_id, _, _) = seeded_store().await;
        let composer = EnrichmentComposer::new(8);

        let secondary = composer.compose(&focus, root_id, &store).await;
        assert!(secondary.iter().all(|n| n.id != focus.id));
        assert!(secondary.iter().all(|n| n.id != focus_child_id));
        // Root plus the two siblings remain.
        assert_eq!(secondary.len(), 3);
    }

    #[tokio::test]
    async fn order_is_depth_first_tree_position() {
        let (store, root_id, focus, _, sib1_id, sib2_id) = seeded_store().await;
        let composer = EnrichmentComposer::new(8);

        let secondary = composer.compose(&focus, root_id, &store).await;
        let ids: Vec<Uuid> = secondary.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![root_id, sib1_id, sib2_id]);
    }

    #[tokio::test]
    async fn cap_keeps_first_n_in_order() {
        let (store, root_id, focus, _, _, _) = seeded_store().await;
        let composer = EnrichmentComposer::new(1);

        let secondary = composer.compose(&focus, root_id, &store).await;
        assert_eq!(secondary.len(), 1);
        assert_eq!(secondary[0].id, root_id);
    }

    #[tokio::test]
    async fn zero_sibling_focus_yields_empty_not_error() {
        let store = InMemoryWorkspaceStore::new();
        let template = node(NodeKind::Template, "Lonely", vec![]);
        store.insert(template.clone()).await;

        let composer = EnrichmentComposer::new(8);
        let secondary = composer.compose(&template, template.id, &store).await;
        assert!(secondary.is_empty());
    }

    #[tokio::test]
    async fn unavailable_workspace_degrades_to_empty() {
        let composer = EnrichmentComposer::new(8);
        let focus = node(NodeKind::Page, "Focus", vec![]);

        let secondary = composer
            .compose(&focus, Uuid::new_v4(), &UnavailableWorkspaceStore)
            .await;
        assert!(secondary.is_empty());
    }

    #[tokio::test]
    async fn missing_workspace_degrades_to_empty() {
        let store = InMemoryWorkspaceStore::new();
        let composer = EnrichmentComposer::new(8);
        let focus = node(NodeKind::Page, "Focus", vec![]);

        let secondary = composer.compose(&focus, Uuid::new_v4(), &store).await;
        assert!(secondary.is_empty());
    }
}

//! Workspace content: pages, sub-pages, and templates.
//!
//! Workspace material forms a tree. The engine reads it read-only — nodes
//! never carry back-references to their workspace, and the "enriches"
//! relation between a focus node and the rest of the tree is expressed as
//! an explicit parameter/result pairing in the engine, not as ownership
//! here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a workspace node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Page,
    SubPage,
    Template,
}

/// A single node of workspace content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceNode {
    /// Unique id in the workspace store.
    pub id: Uuid,

    /// Page, sub-page, or template.
    pub kind: NodeKind,

    /// Human-readable title.
    pub title: String,

    /// Textual content of the node.
    pub content: String,

    /// Ordered child node ids, as stored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Uuid>,

    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A workspace tree rooted at a single node.
///
/// `nodes` holds the root first, then every descendant in depth-first
/// order following stored child order. That traversal order is the one
/// deterministic ordering the read-only tree exposes, and downstream
/// composition relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceTree {
    /// Id of the root node.
    pub root: Uuid,

    /// Root plus descendants, depth-first.
    pub nodes: Vec<WorkspaceNode>,
}

impl WorkspaceTree {
    /// Build a tree from an arbitrary node collection by walking child
    /// links depth-first from `root`. Nodes unreachable from the root are
    /// left out.
    pub fn from_nodes(root: Uuid, available: &[WorkspaceNode]) -> Option<Self> {
        let mut ordered = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = available.iter().find(|n| n.id == id) else {
                continue;
            };
            // Guard against cycles in stored child links.
            if ordered.iter().any(|n: &WorkspaceNode| n.id == id) {
                continue;
            }
            // Push children reversed so they pop in stored order.
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
            ordered.push(node.clone());
        }
        if ordered.first().map(|n| n.id) == Some(root) {
            Some(Self {
                root,
                nodes: ordered,
            })
        } else {
            None
        }
    }

    /// The root node. Present for any tree built through `from_nodes`.
    pub fn root_node(&self) -> Option<&WorkspaceNode> {
        self.nodes.first().filter(|n| n.id == self.root)
    }

    /// Look a node up by id.
    pub fn get(&self, id: Uuid) -> Option<&WorkspaceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Every node below the root, in depth-first order.
    pub fn descendants(&self) -> &[WorkspaceNode] {
        if self.nodes.is_empty() {
            &[]
        } else {
            &self.nodes[1..]
        }
    }

    /// Transitive descendant ids of `id` within this tree (excluding `id`
    /// itself).
    pub fn descendant_ids_of(&self, id: Uuid) -> Vec<Uuid> {
        let mut out = Vec::new();
        let mut stack: Vec<Uuid> = match self.get(id) {
            Some(node) => node.children.clone(),
            None => return out,
        };
        while let Some(next) = stack.pop() {
            if out.contains(&next) {
                continue;
            }
            out.push(next);
            if let Some(node) = self.get(next) {
                stack.extend(node.children.iter().copied());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: Uuid, kind: NodeKind, title: &str, children: Vec<Uuid>) -> WorkspaceNode {
        WorkspaceNode {
            id,
            kind,
            title: title.into(),
            content: format!("{title} content"),
            children,
            updated_at: Utc::now(),
        }
    }

    /// root → (a → (a1), b)
    fn sample() -> (Uuid, Uuid, Uuid, Uuid, Vec<WorkspaceNode>) {
        let root = Uuid::new_v4();
        let a = Uuid::new_v4();
        let a1 = Uuid::new_v4();
        let b = Uuid::new_v4();
        let nodes = vec![
            node(b, NodeKind::Page, "B", vec![]),
            node(root, NodeKind::Page, "Root", vec![a, b]),
            node(a1, NodeKind::SubPage, "A1", vec![]),
            node(a, NodeKind::Page, "A", vec![a1]),
        ];
        (root, a, a1, b, nodes)
    }

    #[test]
    fn from_nodes_orders_depth_first() {
        let (root, a, a1, b, nodes) = sample();
        let tree = WorkspaceTree::from_nodes(root, &nodes).unwrap();
        let order: Vec<Uuid> = tree.nodes.iter().map(|n| n.id).collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn from_nodes_missing_root_is_none() {
        let (_, _, _, _, nodes) = sample();
        assert!(WorkspaceTree::from_nodes(Uuid::new_v4(), &nodes).is_none());
    }

    #[test]
    fn unreachable_nodes_excluded() {
        let (root, _, _, _, mut nodes) = sample();
        nodes.push(node(Uuid::new_v4(), NodeKind::Page, "Orphan", vec![]));
        let tree = WorkspaceTree::from_nodes(root, &nodes).unwrap();
        assert_eq!(tree.nodes.len(), 4);
        assert!(tree.nodes.iter().all(|n| n.title != "Orphan"));
    }

    #[test]
    fn cycle_in_child_links_terminates() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let nodes = vec![
            node(a, NodeKind::Page, "A", vec![b]),
            node(b, NodeKind::Page, "B", vec![a]),
        ];
        let tree = WorkspaceTree::from_nodes(a, &nodes).unwrap();
        assert_eq!(tree.nodes.len(), 2);
    }

    #[test]
    fn descendant_ids_are_transitive() {
        let (root, a, a1, b, nodes) = sample();
        let tree = WorkspaceTree::from_nodes(root, &nodes).unwrap();
        let mut ids = tree.descendant_ids_of(a);
        ids.sort();
        let mut expected = vec![a1];
        expected.sort();
        assert_eq!(ids, expected);

        let mut root_desc = tree.descendant_ids_of(root);
        root_desc.sort();
        let mut all = vec![a, a1, b];
        all.sort();
        assert_eq!(root_desc, all);
    }

    #[test]
    fn descendants_skip_root() {
        let (root, _, _, _, nodes) = sample();
        let tree = WorkspaceTree::from_nodes(root, &nodes).unwrap();
        assert_eq!(tree.descendants().len(), 3);
        assert!(tree.descendants().iter().all(|n| n.id != root));
    }
}

//! The resolved context bundle.
//!
//! A `ResolvedContext` is built once per request by the resolver, consumed
//! once by the directive builder, then discarded. Its invariants:
//!
//! - secondary material only rides along with a primary it subordinates to
//!   (template/page enrichment) or with a workspace primary, whose tree is
//!   primary material flattened into `secondary` for transport;
//! - upload and default primaries never carry secondary material;
//! - every included item carries a provenance tag.

use crate::artifact::AnalysisArtifact;
use crate::workspace::{NodeKind, WorkspaceNode, WorkspaceTree};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a piece of included material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    UploadedDocument,
    Template,
    Page,
    SubPage,
    Workspace,
    /// Subordinate workspace material layered around a template/page focus.
    Enrichment,
    /// No specific context.
    Default,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UploadedDocument => "uploaded document",
            Self::Template => "template",
            Self::Page => "page",
            Self::SubPage => "sub-page",
            Self::Workspace => "workspace",
            Self::Enrichment => "workspace enrichment",
            Self::Default => "default — no specific context",
        };
        f.write_str(s)
    }
}

impl From<NodeKind> for Origin {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Page => Self::Page,
            NodeKind::SubPage => Self::SubPage,
            NodeKind::Template => Self::Template,
        }
    }
}

/// A provenance tag recording which source an included item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub origin: Origin,

    /// Source entity id, when the item has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Human-readable label (title or filename).
    pub label: String,

    /// Explanation attached to fallback tags ("requested page not found").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Provenance {
    pub fn for_node(node: &WorkspaceNode, origin: Origin) -> Self {
        Self {
            origin,
            id: Some(node.id),
            label: node.title.clone(),
            note: None,
        }
    }
}

/// The single authoritative source for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimaryContext {
    /// An analyzed uploaded document.
    Upload(AnalysisArtifact),
    /// A template node, possibly enriched.
    Template(WorkspaceNode),
    /// A page (or sub-page) node, possibly enriched.
    Page(WorkspaceNode),
    /// The root of a whole workspace tree; descendants travel in
    /// `secondary` but count as primary material.
    Workspace(WorkspaceNode),
    /// No specific context.
    Default,
}

impl PrimaryContext {
    /// Whether `secondary` material under this primary is subordinate
    /// enrichment (true) rather than part of the primary itself.
    pub fn secondary_is_enrichment(&self) -> bool {
        matches!(self, Self::Template(_) | Self::Page(_))
    }
}

/// The resolved bundle of primary plus optional secondary material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedContext {
    pub primary: PrimaryContext,

    /// Ordered subordinate material (or the flattened workspace tree).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<WorkspaceNode>,

    /// One tag per included item, primary first.
    pub provenance: Vec<Provenance>,
}

impl ResolvedContext {
    /// Context for an analyzed upload. Never carries secondary material.
    pub fn upload(artifact: AnalysisArtifact) -> Self {
        let tag = Provenance {
            origin: Origin::UploadedDocument,
            id: Some(artifact.source.id),
            label: artifact.source.file_name.clone(),
            note: None,
        };
        Self {
            primary: PrimaryContext::Upload(artifact),
            secondary: Vec::new(),
            provenance: vec![tag],
        }
    }

    /// Context focused on a template or page node, with ordered enrichment
    /// material merged in as lower-priority secondary.
    pub fn focus(node: WorkspaceNode, secondary: Vec<WorkspaceNode>) -> Self {
        let mut provenance = vec![Provenance::for_node(&node, node.kind.into())];
        provenance.extend(
            secondary
                .iter()
                .map(|n| Provenance::for_node(n, Origin::Enrichment)),
        );
        let primary = match node.kind {
            NodeKind::Template => PrimaryContext::Template(node),
            NodeKind::Page | NodeKind::SubPage => PrimaryContext::Page(node),
        };
        Self {
            primary,
            secondary,
            provenance,
        }
    }

    /// Context for a whole workspace tree: primary is the root, secondary
    /// is the depth-first flattening of its descendants (already ordered by
    /// the tree), all tagged as workspace material.
    pub fn workspace(tree: WorkspaceTree) -> Option<Self> {
        let root = tree.root_node()?.clone();
        let descendants: Vec<WorkspaceNode> = tree.descendants().to_vec();
        let mut provenance = vec![Provenance::for_node(&root, Origin::Workspace)];
        provenance.extend(
            descendants
                .iter()
                .map(|n| Provenance::for_node(n, Origin::Workspace)),
        );
        Some(Self {
            primary: PrimaryContext::Workspace(root),
            secondary: descendants,
            provenance,
        })
    }

    /// The default sentinel, optionally explaining why resolution fell
    /// back ("requested page not found").
    pub fn fallback(note: Option<String>) -> Self {
        Self {
            primary: PrimaryContext::Default,
            secondary: Vec::new(),
            provenance: vec![Provenance {
                origin: Origin::Default,
                id: None,
                label: Origin::Default.to_string(),
                note,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn node(kind: NodeKind, title: &str) -> WorkspaceNode {
        WorkspaceNode {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            content: "text".into(),
            children: vec![],
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn focus_tags_primary_then_enrichment() {
        let page = node(NodeKind::Page, "P1");
        let sibling = node(NodeKind::Page, "P2");
        let ctx = ResolvedContext::focus(page.clone(), vec![sibling.clone()]);

        assert!(matches!(ctx.primary, PrimaryContext::Page(_)));
        assert_eq!(ctx.provenance.len(), 2);
        assert_eq!(ctx.provenance[0].origin, Origin::Page);
        assert_eq!(ctx.provenance[0].id, Some(page.id));
        assert_eq!(ctx.provenance[1].origin, Origin::Enrichment);
        assert_eq!(ctx.provenance[1].id, Some(sibling.id));
    }

    #[test]
    fn template_focus_is_template_primary() {
        let ctx = ResolvedContext::focus(node(NodeKind::Template, "T"), vec![]);
        assert!(matches!(ctx.primary, PrimaryContext::Template(_)));
        assert!(ctx.primary.secondary_is_enrichment());
    }

    #[test]
    fn workspace_secondary_is_not_enrichment() {
        let root = node(NodeKind::Page, "Root");
        let tree = WorkspaceTree {
            root: root.id,
            nodes: vec![root],
        };
        let ctx = ResolvedContext::workspace(tree).unwrap();
        assert!(!ctx.primary.secondary_is_enrichment());
        assert!(ctx.secondary.is_empty());
    }

    #[test]
    fn fallback_carries_note() {
        let ctx = ResolvedContext::fallback(Some("requested page not found".into()));
        assert!(matches!(ctx.primary, PrimaryContext::Default));
        assert!(ctx.secondary.is_empty());
        assert_eq!(
            ctx.provenance[0].note.as_deref(),
            Some("requested page not found")
        );
    }
}

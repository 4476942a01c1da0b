//! The inbound request shape.
//!
//! A single logical request carries the resolved session identity, the
//! user's query text, an optional uploaded-file reference, and an optional
//! knowledge-base scope. Transport mechanics (routes, headers, websockets)
//! belong to an external API layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity a request acts under. Resolved upstream;
/// the engine treats it as opaque routing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Stable user identifier.
    pub user_id: String,

    /// Tenant the user belongs to, when multi-tenancy is in play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Which knowledge base the request targets when no file is uploaded.
///
/// A closed set of variants: the priority hierarchy dispatches on this in
/// one place rather than through polymorphic handlers, so the decision
/// order stays auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ContextScope {
    /// No specific scope — the default knowledge base is implied.
    #[default]
    Default,
    /// A template node is the focus.
    Template(Uuid),
    /// A page node is the focus.
    Page(Uuid),
    /// An entire workspace tree is the context.
    Workspace(Uuid),
}

impl ContextScope {
    /// The focus node id, for scopes that have a narrower focus to enrich.
    pub fn focus_id(&self) -> Option<Uuid> {
        match self {
            Self::Template(id) | Self::Page(id) => Some(*id),
            Self::Default | Self::Workspace(_) => None,
        }
    }
}

/// A single conversational request, ready for context resolution.
///
/// Invariant: an uploaded-file reference always outranks `scope`; when both
/// are absent the default knowledge base is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Who is asking.
    pub session: SessionIdentity,

    /// The user's query text. Emptiness is rejected upstream; the engine
    /// assumes it is present.
    pub query: String,

    /// Workspace the conversation lives in. Required for enrichment around
    /// a template/page focus; without it the focus stands alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<Uuid>,

    /// Knowledge-base scope for non-upload requests.
    #[serde(default)]
    pub scope: ContextScope,

    /// Reference to an uploaded file. When present and resolvable, it
    /// strictly wins over `scope`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_file: Option<Uuid>,
}

impl ChatRequest {
    /// A minimal request with only a query — resolves to the default
    /// knowledge base.
    pub fn bare(session: SessionIdentity, query: impl Into<String>) -> Self {
        Self {
            session,
            query: query.into(),
            workspace_id: None,
            scope: ContextScope::Default,
            uploaded_file: None,
        }
    }
}

//! The context resolver — the decision procedure at the heart of the
//! engine.
//!
//! One request in, one resolved context out, always. The priority
//! hierarchy is walked top to bottom and the first rung that produces
//! material wins outright:
//!
//! 1. uploaded file (classified and analyzed)
//! 2. template focus (enriched)
//! 3. page focus (enriched)
//! 4. whole workspace tree
//! 5. default sentinel
//!
//! Store failures degrade to the next applicable rung. A failed upload
//! fetch leaves no trace in the result beyond a warning log: the outcome
//! is identical to the same request without the upload reference, so
//! retrying after a transient store failure converges on the same context.
//! A selector that names a missing node, in contrast, falls all the way to
//! the default sentinel and records why in its provenance note.

use crate::analyze::AnalyzerSet;
use crate::classify::DocumentClassifier;
use crate::enrich::EnrichmentComposer;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use weft_config::EngineConfig;
use weft_core::context::ResolvedContext;
use weft_core::error::StoreError;
use weft_core::request::{ChatRequest, ContextScope};
use weft_core::store::{FileStore, WorkspaceStore};
use weft_core::upload::UploadedFile;
use weft_core::workspace::WorkspaceNode;

/// Resolves the authoritative context for conversational requests.
pub struct ContextResolver {
    files: Arc<dyn FileStore>,
    workspace: Arc<dyn WorkspaceStore>,
    classifier: DocumentClassifier,
    analyzers: AnalyzerSet,
    composer: EnrichmentComposer,
    /// Bound on flattened workspace descendants, shared with enrichment.
    max_secondary: usize,
}

impl ContextResolver {
    pub fn new(
        files: Arc<dyn FileStore>,
        workspace: Arc<dyn WorkspaceStore>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            files,
            workspace,
            classifier: DocumentClassifier::new(config.analysis.sniff_lines),
            analyzers: AnalyzerSet::new(&config.analysis),
            composer: EnrichmentComposer::new(config.enrichment.max_items),
            max_secondary: config.enrichment.max_items,
        }
    }

    /// Resolve the context for `request`. Total: every request gets a
    /// context, the default sentinel being the floor.
    pub async fn resolve(&self, request: &ChatRequest) -> ResolvedContext {
        if let Some(file_id) = request.uploaded_file {
            // The focus node is prefetched alongside the file so a failed
            // upload falls through without a second round trip.
            let prefetched = match request.scope.focus_id() {
                Some(focus_id) => {
                    let (file, focus) = tokio::join!(
                        self.files.fetch(file_id),
                        self.workspace.fetch_node(focus_id)
                    );
                    match file {
                        Ok(file) => return self.analyzed(file),
                        Err(e) => {
                            warn!(
                                file_id = %file_id,
                                store = self.files.name(),
                                error = %e,
                                "upload fetch failed, falling through to scope"
                            );
                            Some(focus)
                        }
                    }
                }
                None => match self.files.fetch(file_id).await {
                    Ok(file) => return self.analyzed(file),
                    Err(e) => {
                        warn!(
                            file_id = %file_id,
                            store = self.files.name(),
                            error = %e,
                            "upload fetch failed, falling through to scope"
                        );
                        None
                    }
                },
            };
            return self.resolve_scope(request, prefetched).await;
        }
        self.resolve_scope(request, None).await
    }

    fn analyzed(&self, file: UploadedFile) -> ResolvedContext {
        let kind = self.classifier.classify(&file);
        info!(
            file_id = %file.id,
            file_name = %file.file_name,
            ?kind,
            "resolved to uploaded document"
        );
        ResolvedContext::upload(self.analyzers.analyze(&file, kind))
    }

    async fn resolve_scope(
        &self,
        request: &ChatRequest,
        prefetched: Option<Result<WorkspaceNode, StoreError>>,
    ) -> ResolvedContext {
        match request.scope {
            ContextScope::Template(id) | ContextScope::Page(id) => {
                let fetched = match prefetched {
                    Some(result) => result,
                    None => self.workspace.fetch_node(id).await,
                };
                match fetched {
                    Ok(node) => self.focused(node, request.workspace_id).await,
                    Err(e) => {
                        warn!(
                            node_id = %id,
                            store = self.workspace.name(),
                            error = %e,
                            "focus fetch failed, falling back to default"
                        );
                        ResolvedContext::fallback(Some(miss_note(&request.scope, &e)))
                    }
                }
            }
            ContextScope::Workspace(id) => self.whole_workspace(id).await,
            ContextScope::Default => ResolvedContext::fallback(None),
        }
    }

    async fn focused(&self, node: WorkspaceNode, workspace_id: Option<Uuid>) -> ResolvedContext {
        let secondary = match workspace_id {
            Some(ws) => {
                self.composer
                    .compose(&node, ws, self.workspace.as_ref())
                    .await
            }
            // No workspace to enrich from; the focus stands alone.
            None => Vec::new(),
        };
        info!(
            node_id = %node.id,
            kind = ?node.kind,
            secondary = secondary.len(),
            "resolved to focused node"
        );
        ResolvedContext::focus(node, secondary)
    }

    async fn whole_workspace(&self, id: Uuid) -> ResolvedContext {
        match self.workspace.fetch_tree(id).await {
            Ok(tree) => match ResolvedContext::workspace(tree) {
                Some(mut ctx) => {
                    // Same deterministic bound as enrichment: first N
                    // descendants in depth-first order.
                    ctx.secondary.truncate(self.max_secondary);
                    ctx.provenance.truncate(self.max_secondary + 1);
                    info!(
                        workspace_id = %id,
                        nodes = ctx.secondary.len() + 1,
                        "resolved to workspace tree"
                    );
                    ctx
                }
                None => ResolvedContext::fallback(Some("requested workspace not found".into())),
            },
            Err(e) => {
                warn!(
                    workspace_id = %id,
                    store = self.workspace.name(),
                    error = %e,
                    "workspace fetch failed, falling back to default"
                );
                ResolvedContext::fallback(Some(miss_note(&ContextScope::Workspace(id), &e)))
            }
        }
    }
}

/// The provenance note recorded when a selector cannot be honored.
fn miss_note(scope: &ContextScope, error: &StoreError) -> String {
    let target = match scope {
        ContextScope::Template(_) => "template",
        ContextScope::Page(_) => "page",
        ContextScope::Workspace(_) => "workspace",
        ContextScope::Default => "context",
    };
    match error {
        StoreError::NotFound { .. } => format!("requested {target} not found"),
        StoreError::Unavailable(_) => format!("{target} store unavailable"),
    }
}

//! Directive assembly — turning a resolved context into the instruction
//! payload for the downstream generation service.
//!
//! The instruction always leads with the primary material. Enrichment is
//! rendered under an explicit lower-priority banner so the generator never
//! mistakes it for the authoritative source; a flattened workspace tree is
//! rendered as primary material throughout. Sources carry `[n]` labels the
//! generator can cite, and multi-part material is joined with `---`
//! separators.

use weft_core::artifact::{AnalysisArtifact, ArtifactPayload, ColumnSummary, TabularSummary};
use weft_core::context::{PrimaryContext, ResolvedContext};
use weft_core::directive::{ResponseDirective, ResponseStyle};
use weft_core::workspace::WorkspaceNode;

const SECTION_SEPARATOR: &str = "\n---\n";

/// Builds response directives from resolved contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveBuilder;

impl DirectiveBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the directive for a resolved context. Pure and total: the
    /// same context and query always produce the same directive.
    pub fn build(&self, context: &ResolvedContext, query: &str) -> ResponseDirective {
        let (instruction, style) = match &context.primary {
            PrimaryContext::Upload(artifact) => self.render_upload(artifact, query),
            PrimaryContext::Template(node) => (
                self.render_focus(
                    "You are answering based on a structured template the user is working from.",
                    node,
                    &context.secondary,
                    query,
                ),
                ResponseStyle::Conversational,
            ),
            PrimaryContext::Page(node) => (
                self.render_focus(
                    "You are answering based on a specific page the user is focused on.",
                    node,
                    &context.secondary,
                    query,
                ),
                ResponseStyle::Conversational,
            ),
            PrimaryContext::Workspace(root) => (
                self.render_workspace(root, &context.secondary, query),
                ResponseStyle::Conversational,
            ),
            PrimaryContext::Default => (self.render_default(context, query), ResponseStyle::Conversational),
        };

        ResponseDirective {
            instruction,
            style,
            provenance_summary: provenance_lines(context),
        }
    }

    fn render_upload(&self, artifact: &AnalysisArtifact, query: &str) -> (String, ResponseStyle) {
        match &artifact.payload {
            ArtifactPayload::TabularSummary(summary) => {
                let mut out = String::new();
                out.push_str("Instructions:\n");
                out.push_str(
                    "Answer the question using the uploaded dataset described below. \
                     Prefer concrete figures from the dataset profile, and when the question \
                     calls for comparison or trends, describe a chart that would show it.\n\n",
                );
                out.push_str(&format!(
                    "Dataset [1]: {} ({} rows",
                    artifact.source.file_name, summary.row_count
                ));
                if summary.malformed_rows > 0 {
                    out.push_str(&format!(", {} malformed rows skipped", summary.malformed_rows));
                }
                out.push_str(")\n");
                out.push_str(&render_columns(summary));
                if !summary.sample_rows.is_empty() {
                    out.push_str("\nSample rows:\n");
                    for row in &summary.sample_rows {
                        out.push_str(&format!("  {}\n", row.join(" | ")));
                    }
                }
                out.push_str(&format!("\nQuestion: {query}"));
                (out, ResponseStyle::VisualInsight)
            }
            ArtifactPayload::NarrativeIndex(index) => {
                let mut out = String::new();
                out.push_str("Instructions:\n");
                out.push_str(
                    "Answer the question using only the uploaded document excerpts below. \
                     Cite sources by their [n] label. If the excerpts do not contain the \
                     answer, say so.\n\n",
                );
                if index.empty {
                    out.push_str(&format!(
                        "Document [1]: {} (no readable text content)\n",
                        artifact.source.file_name
                    ));
                } else {
                    out.push_str(&format!("Document [1]: {}\n", artifact.source.file_name));
                    let body: Vec<String> = index
                        .chunks
                        .iter()
                        .map(|c| format!("[1.{}] {}", c.index + 1, c.content))
                        .collect();
                    out.push_str(&body.join(SECTION_SEPARATOR));
                    out.push('\n');
                }
                out.push_str(&format!("\nQuestion: {query}"));
                (out, ResponseStyle::Conversational)
            }
        }
    }

    fn render_focus(
        &self,
        preamble: &str,
        node: &WorkspaceNode,
        secondary: &[WorkspaceNode],
        query: &str,
    ) -> String {
        let mut out = String::new();
        out.push_str("Instructions:\n");
        out.push_str(preamble);
        out.push_str(
            " Ground the answer in the primary source [1]; supplemental sources are \
             background only and must not override it.\n\n",
        );
        out.push_str(&format!("Primary source [1]: {}\n{}\n", node.title, node.content));
        if !secondary.is_empty() {
            out.push_str("\nSupplemental workspace context (lower priority):\n");
            let body: Vec<String> = secondary
                .iter()
                .enumerate()
                .map(|(i, n)| format!("[{}] {}\n{}", i + 2, n.title, n.content))
                .collect();
            out.push_str(&body.join(SECTION_SEPARATOR));
            out.push('\n');
        }
        out.push_str(&format!("\nQuestion: {query}"));
        out
    }

    fn render_workspace(
        &self,
        root: &WorkspaceNode,
        descendants: &[WorkspaceNode],
        query: &str,
    ) -> String {
        let mut out = String::new();
        out.push_str("Instructions:\n");
        out.push_str(
            "Answer the question using the workspace content below. All sources carry \
             equal weight; cite them by their [n] label.\n\n",
        );
        let body: Vec<String> = std::iter::once(root)
            .chain(descendants)
            .enumerate()
            .map(|(i, n)| format!("[{}] {}\n{}", i + 1, n.title, n.content))
            .collect();
        out.push_str(&body.join(SECTION_SEPARATOR));
        out.push_str(&format!("\n\nQuestion: {query}"));
        out
    }

    fn render_default(&self, context: &ResolvedContext, query: &str) -> String {
        let mut out = String::new();
        out.push_str("Instructions:\n");
        out.push_str(
            "No specific context applies to this conversation. Answer from general \
             knowledge, conversationally.\n",
        );
        if let Some(note) = context.provenance.first().and_then(|p| p.note.as_deref()) {
            out.push_str(&format!("Note: {note}.\n"));
        }
        out.push_str(&format!("\nQuestion: {query}"));
        out
    }
}

fn render_columns(summary: &TabularSummary) -> String {
    let mut out = String::from("Columns:\n");
    for column in &summary.columns {
        out.push_str(&format!("  {}\n", render_column(column)));
    }
    out
}

fn render_column(column: &ColumnSummary) -> String {
    let mut line = format!(
        "{} ({:?}, {} non-empty, {} distinct",
        column.name, column.column_type, column.non_empty, column.distinct
    );
    if let Some(numeric) = &column.numeric {
        line.push_str(&format!(
            ", min {} / max {} / mean {:.2}",
            numeric.min, numeric.max, numeric.mean
        ));
    }
    line.push(')');
    line
}

fn provenance_lines(context: &ResolvedContext) -> Vec<String> {
    context
        .provenance
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let mut line = format!("[{}] {}: {}", i + 1, tag.origin, tag.label);
            if let Some(note) = &tag.note {
                line.push_str(&format!(" ({note})"));
            }
            line
        })
        .collect()
}

//! Analysis artifacts — derived, per-request views of uploaded content.
//!
//! An artifact is built once while resolving a request and discarded with
//! the request. It is never persisted or cached; the uploaded file itself
//! stays authoritative in its store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference back to the uploaded file an artifact was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub id: Uuid,
    pub file_name: String,
}

/// The artifact kind, mirroring the two analyzer strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    TabularSummary,
    NarrativeIndex,
}

/// Inferred type of a tabular column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

/// Basic distribution descriptors for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericProfile {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Header name.
    pub name: String,

    /// Narrowest type that fits every non-empty value.
    pub column_type: ColumnType,

    /// Non-empty values observed.
    pub non_empty: usize,

    /// Distinct values observed.
    pub distinct: usize,

    /// Present only for Integer/Float columns with at least one value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericProfile>,
}

/// Structured summary of tabular content, sufficient for the downstream
/// generator to answer analytical questions and propose visualizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularSummary {
    /// Per-column summaries, header order.
    pub columns: Vec<ColumnSummary>,

    /// Well-formed data rows (header excluded).
    pub row_count: usize,

    /// Rows skipped for having the wrong field count.
    pub malformed_rows: usize,

    /// Leading well-formed rows, bounded, for the generator to quote.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_rows: Vec<Vec<String>>,
}

/// One chunk of a narrative index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Sequential position within the document.
    pub index: usize,
    pub content: String,
}

/// A queryable, chunked representation of narrative content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeIndex {
    /// Ordered chunks.
    pub chunks: Vec<TextChunk>,

    /// Set when the source held no extractable text; the artifact still
    /// exists so resolution never fails on empty uploads.
    pub empty: bool,
}

/// The typed payload of an analysis artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactPayload {
    TabularSummary(TabularSummary),
    NarrativeIndex(NarrativeIndex),
}

/// An ephemeral analysis of one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisArtifact {
    /// The uploaded file this was derived from.
    pub source: SourceFile,

    /// The analysis result.
    pub payload: ArtifactPayload,
}

impl AnalysisArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match &self.payload {
            ArtifactPayload::TabularSummary(_) => ArtifactKind::TabularSummary,
            ArtifactPayload::NarrativeIndex(_) => ArtifactKind::NarrativeIndex,
        }
    }
}

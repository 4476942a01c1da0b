//! Content analyzers — per-kind strategies for turning raw uploaded
//! content into an ephemeral analysis artifact.
//!
//! Both strategies are total: malformed tabular rows are skipped and
//! counted, empty narrative content is flagged rather than rejected. Only
//! a store-level read failure can stop analysis, and that is handled
//! upstream by the resolver's fallback.

pub mod narrative;
pub mod tabular;

pub use narrative::NarrativeAnalyzer;
pub use tabular::TabularAnalyzer;

use weft_config::AnalysisConfig;
use weft_core::artifact::AnalysisArtifact;
use weft_core::upload::{ContentKind, UploadedFile};

/// The common capability: produce an analysis artifact from raw content.
pub trait ContentAnalyzer: Send + Sync {
    /// The content kind this analyzer handles.
    fn kind(&self) -> ContentKind;

    /// Analyze an uploaded file. Total — degraded artifacts, never errors.
    fn analyze(&self, file: &UploadedFile) -> AnalysisArtifact;
}

/// Both analyzer strategies, dispatched by content kind.
pub struct AnalyzerSet {
    tabular: TabularAnalyzer,
    narrative: NarrativeAnalyzer,
}

impl AnalyzerSet {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            tabular: TabularAnalyzer::new(config.sample_rows),
            narrative: NarrativeAnalyzer::new(config.max_chunk_chars, config.max_chunks),
        }
    }

    /// The analyzer responsible for `kind`.
    pub fn analyzer_for(&self, kind: ContentKind) -> &dyn ContentAnalyzer {
        match kind {
            ContentKind::Tabular => &self.tabular,
            ContentKind::Document => &self.narrative,
        }
    }

    /// Analyze `file` as `kind`.
    pub fn analyze(&self, file: &UploadedFile, kind: ContentKind) -> AnalysisArtifact {
        self.analyzer_for(kind).analyze(file)
    }
}

impl Default for AnalyzerSet {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use weft_core::artifact::ArtifactKind;

    fn file(name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            file_name: name.into(),
            declared_type: None,
            content: content.as_bytes().to_vec(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn dispatch_matches_kind() {
        let set = AnalyzerSet::default();
        assert_eq!(
            set.analyzer_for(ContentKind::Tabular).kind(),
            ContentKind::Tabular
        );
        assert_eq!(
            set.analyzer_for(ContentKind::Document).kind(),
            ContentKind::Document
        );
    }

    #[test]
    fn analyze_produces_matching_artifact_kind() {
        let set = AnalyzerSet::default();
        let f = file("data.csv", "a,b\n1,2");

        let tab = set.analyze(&f, ContentKind::Tabular);
        assert_eq!(tab.kind(), ArtifactKind::TabularSummary);
        assert_eq!(tab.source.id, f.id);

        let doc = set.analyze(&f, ContentKind::Document);
        assert_eq!(doc.kind(), ArtifactKind::NarrativeIndex);
    }
}

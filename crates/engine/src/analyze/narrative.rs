//! Narrative analysis — a queryable, chunked text index.
//!
//! Chunks follow paragraph boundaries up to a configured target size;
//! oversized paragraphs are hard-split. Empty or whitespace-only content
//! produces an artifact flagged `empty` instead of an error.

use super::ContentAnalyzer;
use tracing::debug;
use weft_core::artifact::{
    AnalysisArtifact, ArtifactPayload, NarrativeIndex, SourceFile, TextChunk,
};
use weft_core::upload::{ContentKind, UploadedFile};

/// Analyzer for narrative/unstructured content.
pub struct NarrativeAnalyzer {
    /// Target chunk size, in characters.
    max_chunk_chars: usize,
    /// Hard cap on chunk count; trailing content is dropped.
    max_chunks: usize,
}

impl NarrativeAnalyzer {
    pub fn new(max_chunk_chars: usize, max_chunks: usize) -> Self {
        Self {
            max_chunk_chars,
            max_chunks,
        }
    }

    fn index(&self, text: &str) -> NarrativeIndex {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return NarrativeIndex {
                chunks: vec![],
                empty: true,
            };
        }

        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();

        for paragraph in trimmed.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            for piece in split_oversized(paragraph, self.max_chunk_chars) {
                if !current.is_empty() && current.len() + piece.len() + 2 > self.max_chunk_chars {
                    chunks.push(std::mem::take(&mut current));
                }
                if current.is_empty() {
                    current = piece;
                } else {
                    current.push_str("\n\n");
                    current.push_str(&piece);
                }
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        if chunks.len() > self.max_chunks {
            debug!(
                dropped = chunks.len() - self.max_chunks,
                "narrative: chunk cap reached, trailing content dropped"
            );
            chunks.truncate(self.max_chunks);
        }

        NarrativeIndex {
            chunks: chunks
                .into_iter()
                .enumerate()
                .map(|(index, content)| TextChunk { index, content })
                .collect(),
            empty: false,
        }
    }
}

impl ContentAnalyzer for NarrativeAnalyzer {
    fn kind(&self) -> ContentKind {
        ContentKind::Document
    }

    fn analyze(&self, file: &UploadedFile) -> AnalysisArtifact {
        AnalysisArtifact {
            source: SourceFile {
                id: file.id,
                file_name: file.file_name.clone(),
            },
            payload: ArtifactPayload::NarrativeIndex(self.index(&file.text())),
        }
    }
}

/// Split a paragraph that exceeds `max_chars` at char boundaries; shorter
/// paragraphs pass through whole.
fn split_oversized(paragraph: &str, max_chars: usize) -> Vec<String> {
    if paragraph.len() <= max_chars {
        return vec![paragraph.to_string()];
    }
    let mut out = Vec::new();
    let mut current = String::new();
    for c in paragraph.chars() {
        if current.len() + c.len_utf8() > max_chars {
            out.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

//! Document classification — tabular vs. narrative.
//!
//! Declared media type and file extension are consulted first; when they
//! are absent or unrecognized, the leading lines are sniffed for a
//! consistent row/column delimiter pattern. Classification never fails:
//! anything unsniffable is narrative.

use tracing::debug;
use weft_core::upload::{ContentKind, UploadedFile};

/// Delimiters the sniffer considers, most common first.
const DELIMITERS: [char; 3] = [',', '\t', ';'];

/// Declared types and extensions that are tabular outright.
const TABULAR_TYPES: [&str; 4] = ["csv", "tsv", "text/csv", "text/tab-separated-values"];

/// Declared types and extensions that are narrative outright.
const NARRATIVE_TYPES: [&str; 8] = [
    "pdf",
    "docx",
    "doc",
    "txt",
    "md",
    "text/plain",
    "text/markdown",
    "application/pdf",
];

/// Assigns a content kind to uploaded files.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    /// Leading lines inspected during sniffing.
    sniff_lines: usize,
}

impl DocumentClassifier {
    pub fn new(sniff_lines: usize) -> Self {
        Self { sniff_lines }
    }

    /// Classify an uploaded file. Total — unknown content is `Document`.
    pub fn classify(&self, file: &UploadedFile) -> ContentKind {
        if let Some(declared) = &file.declared_type {
            let declared = declared.to_ascii_lowercase();
            if TABULAR_TYPES.contains(&declared.as_str()) {
                return ContentKind::Tabular;
            }
            if NARRATIVE_TYPES.contains(&declared.as_str()) {
                return ContentKind::Document;
            }
        }

        if let Some(ext) = file.extension() {
            if TABULAR_TYPES.contains(&ext.as_str()) {
                return ContentKind::Tabular;
            }
            if NARRATIVE_TYPES.contains(&ext.as_str()) {
                return ContentKind::Document;
            }
        }

        let kind = self.sniff(&file.text());
        debug!(file_id = %file.id, ?kind, "classifier: sniffed content kind");
        kind
    }

    /// Look for a delimiter that appears a consistent, nonzero number of
    /// times across the leading non-empty lines. Requires at least two
    /// lines of evidence.
    fn sniff(&self, text: &str) -> ContentKind {
        let lines: Vec<&str> = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(self.sniff_lines)
            .collect();
        if lines.len() < 2 {
            return ContentKind::Document;
        }

        for delim in DELIMITERS {
            let first = lines[0].matches(delim).count();
            if first > 0 && lines.iter().all(|l| l.matches(delim).count() == first) {
                return ContentKind::Tabular;
            }
        }
        ContentKind::Document
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn file(name: &str, declared: Option<&str>, content: &str) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            file_name: name.into(),
            declared_type: declared.map(Into::into),
            content: content.as_bytes().to_vec(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn declared_csv_type_wins() {
        let c = DocumentClassifier::default();
        let f = file("export.data", Some("text/csv"), "whatever");
        assert_eq!(c.classify(&f), ContentKind::Tabular);
    }

    #[test]
    fn csv_extension_is_tabular() {
        let c = DocumentClassifier::default();
        let f = file("sales.csv", None, "");
        assert_eq!(c.classify(&f), ContentKind::Tabular);
    }

    #[test]
    fn pdf_extension_is_document() {
        let c = DocumentClassifier::default();
        let f = file("report.pdf", None, "a,b\n1,2");
        assert_eq!(c.classify(&f), ContentKind::Document);
    }

    #[test]
    fn consistent_commas_sniff_tabular() {
        let c = DocumentClassifier::default();
        let f = file("dump", None, "name,age,city\nalice,30,berlin\nbob,25,oslo");
        assert_eq!(c.classify(&f), ContentKind::Tabular);
    }

    #[test]
    fn inconsistent_commas_sniff_document() {
        let c = DocumentClassifier::default();
        let f = file(
            "dump",
            None,
            "One sentence, with a comma.\nAnother without any commas at all\nAnd, two, more",
        );
        assert_eq!(c.classify(&f), ContentKind::Document);
    }

    #[test]
    fn tab_delimited_sniff_tabular() {
        let c = DocumentClassifier::default();
        let f = file("dump", None, "a\tb\tc\n1\t2\t3");
        assert_eq!(c.classify(&f), ContentKind::Tabular);
    }

    #[test]
    fn single_line_defaults_to_document() {
        let c = DocumentClassifier::default();
        let f = file("dump", None, "a,b,c");
        assert_eq!(c.classify(&f), ContentKind::Document);
    }

    #[test]
    fn empty_content_defaults_to_document() {
        let c = DocumentClassifier::default();
        let f = file("dump", None, "");
        assert_eq!(c.classify(&f), ContentKind::Document);
    }
}

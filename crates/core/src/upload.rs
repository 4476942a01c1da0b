//! Uploaded file content and its classified kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two content kinds the engine distinguishes. Anything that is not
/// recognizably tabular is treated as narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Row/column data (CSV, TSV, …).
    Tabular,
    /// Narrative or otherwise unstructured text.
    Document,
}

/// A file a user uploaded into the conversation. Owned by the uploaded-file
/// store; the engine holds a reference and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Unique id in the uploaded-file store.
    pub id: Uuid,

    /// Original filename, extension included.
    pub file_name: String,

    /// Declared media type or file type ("text/csv", "pdf", …), when the
    /// uploader supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,

    /// Raw content bytes as handed back by the store.
    pub content: Vec<u8>,

    /// When the file entered the store.
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedFile {
    /// Lowercased extension of `file_name`, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_ascii_lowercase())
        }
    }

    /// Content decoded as text. Invalid UTF-8 is replaced rather than
    /// rejected — store-level reads are the only fatal failure.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &[u8]) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            file_name: name.into(),
            declared_type: None,
            content: content.to_vec(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file("Report.CSV", b"").extension().as_deref(), Some("csv"));
    }

    #[test]
    fn extension_absent_for_bare_names() {
        assert_eq!(file("README", b"").extension(), None);
        assert_eq!(file("trailing.", b"").extension(), None);
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let f = file("blob.txt", &[0x68, 0x69, 0xFF]);
        let text = f.text();
        assert!(text.starts_with("hi"));
        assert!(text.contains('\u{FFFD}'));
    }
}

//! The response directive — the sole payload handed to the downstream
//! generation service. The engine does not own or track its outcome.

use serde::{Deserialize, Serialize};

/// Preferred response style for the downstream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    /// Visualization/insight-oriented answers; set for tabular uploads.
    VisualInsight,
    /// Conversational / document-QA answers; everything else.
    Conversational,
}

/// Assembled instruction plus a provenance summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDirective {
    /// The full instruction text, primary material first, supplementary
    /// material explicitly labeled as lower priority.
    pub instruction: String,

    /// Preferred generation style.
    pub style: ResponseStyle,

    /// One line per included item, in inclusion order.
    pub provenance_summary: Vec<String>,
}

//! Tabular analysis — rows, columns, and basic distribution descriptors.
//!
//! The summary gives the downstream generator enough structure to answer
//! analytical questions and propose visualizations without carrying the
//! whole table. Malformed rows (wrong field count) are skipped and
//! counted, never fatal.

use super::ContentAnalyzer;
use std::collections::HashSet;
use tracing::debug;
use weft_core::artifact::{
    AnalysisArtifact, ArtifactPayload, ColumnSummary, ColumnType, NumericProfile, SourceFile,
    TabularSummary,
};
use weft_core::upload::{ContentKind, UploadedFile};

/// Analyzer for row/column data.
pub struct TabularAnalyzer {
    /// Leading well-formed rows carried into the summary.
    sample_rows: usize,
}

/// Per-column accumulator while scanning rows.
struct ColumnAccumulator {
    name: String,
    non_empty: usize,
    distinct: HashSet<String>,
    all_int: bool,
    all_float: bool,
    all_bool: bool,
    min: f64,
    max: f64,
    sum: f64,
    numeric_count: usize,
}

impl ColumnAccumulator {
    fn new(name: String) -> Self {
        Self {
            name,
            non_empty: 0,
            distinct: HashSet::new(),
            all_int: true,
            all_float: true,
            all_bool: true,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            numeric_count: 0,
        }
    }

    fn observe(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.non_empty += 1;
        self.distinct.insert(value.to_string());

        if value.parse::<i64>().is_err() {
            self.all_int = false;
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => {
                self.min = self.min.min(n);
                self.max = self.max.max(n);
                self.sum += n;
                self.numeric_count += 1;
            }
            _ => self.all_float = false,
        }
        if !matches!(value.to_ascii_lowercase().as_str(), "true" | "false") {
            self.all_bool = false;
        }
    }

    fn finish(self) -> ColumnSummary {
        let column_type = if self.non_empty == 0 {
            ColumnType::Text
        } else if self.all_int {
            ColumnType::Integer
        } else if self.all_float {
            ColumnType::Float
        } else if self.all_bool {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        };

        let numeric = match column_type {
            ColumnType::Integer | ColumnType::Float if self.numeric_count > 0 => {
                Some(NumericProfile {
                    min: self.min,
                    max: self.max,
                    mean: self.sum / self.numeric_count as f64,
                })
            }
            _ => None,
        };

        ColumnSummary {
            name: self.name,
            column_type,
            non_empty: self.non_empty,
            distinct: self.distinct.len(),
            numeric,
        }
    }
}

impl TabularAnalyzer {
    pub fn new(sample_rows: usize) -> Self {
        Self { sample_rows }
    }

    fn summarize(&self, text: &str) -> TabularSummary {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let Some(header) = lines.next() else {
            return TabularSummary {
                columns: vec![],
                row_count: 0,
                malformed_rows: 0,
                sample_rows: vec![],
            };
        };

        let delimiter = detect_delimiter(header);
        let mut accumulators: Vec<ColumnAccumulator> = split_fields(header, delimiter)
            .into_iter()
            .map(ColumnAccumulator::new)
            .collect();

        let mut row_count = 0;
        let mut malformed_rows = 0;
        let mut samples = Vec::new();

        for line in lines {
            let fields = split_fields(line, delimiter);
            if fields.len() != accumulators.len() {
                malformed_rows += 1;
                continue;
            }
            for (acc, value) in accumulators.iter_mut().zip(&fields) {
                acc.observe(value);
            }
            if samples.len() < self.sample_rows {
                samples.push(fields);
            }
            row_count += 1;
        }

        if malformed_rows > 0 {
            debug!(malformed_rows, row_count, "tabular: skipped malformed rows");
        }

        TabularSummary {
            columns: accumulators.into_iter().map(|a| a.finish()).collect(),
            row_count,
            malformed_rows,
            sample_rows: samples,
        }
    }
}

impl ContentAnalyzer for TabularAnalyzer {
    fn kind(&self) -> ContentKind {
        ContentKind::Tabular
    }

    fn analyze(&self, file: &UploadedFile) -> AnalysisArtifact {
        AnalysisArtifact {
            source: SourceFile {
                id: file.id,
                file_name: file.file_name.clone(),
            },
            payload: ArtifactPayload::TabularSummary(self.summarize(&file.text())),
        }
    }
}

/// The delimiter that occurs most often in the header row. Comma when
/// nothing stands out.
fn detect_delimiter(header: &str) -> char {
    [',', '\t', ';']
        .into_iter()
        .map(|d| (d, header.matches(d).count()))
        .max_by_key(|(_, count)| *count)
        .filter(|(_, count)| *count > 0)
        .map(|(d, _)| d)
        .unwrap_or(',')
}

/// Split a row on `delimiter`, honoring double-quoted fields with `""`
/// escapes.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current).trim().to_string());
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());
    fields
}

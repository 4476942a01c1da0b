//! Configuration loading and validation for the weft engine.
//!
//! Loads from a TOML file with environment variable overrides. Every bound
//! here is a correctness bound: enrichment and analysis output must stay
//! deterministic and finite for downstream generation limits, so zero
//! values are rejected at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enrichment composition bounds.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Content analysis bounds.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Bounds for workspace enrichment around a focused context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum secondary items merged around a focus. Truncation rule:
    /// first N in depth-first tree order, rest dropped.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// Bounds for the content analyzers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Target chunk size for the narrative index, in characters.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Maximum chunks per narrative index.
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,

    /// Leading well-formed rows carried in a tabular summary.
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,

    /// Leading lines inspected when sniffing for a delimiter pattern.
    #[serde(default = "default_sniff_lines")]
    pub sniff_lines: usize,
}

fn default_max_items() -> usize {
    8
}
fn default_max_chunk_chars() -> usize {
    1200
}
fn default_max_chunks() -> usize {
    64
}
fn default_sample_rows() -> usize {
    5
}
fn default_sniff_lines() -> usize {
    10
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            max_chunks: default_max_chunks(),
            sample_rows: default_sample_rows(),
            sniff_lines: default_sniff_lines(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enrichment: EnrichmentConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `path`, then apply environment overrides.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from a file without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Environment variable overrides (highest priority):
    /// - `WEFT_ENRICHMENT_MAX_ITEMS`
    /// - `WEFT_ANALYSIS_MAX_CHUNK_CHARS`
    /// - `WEFT_ANALYSIS_MAX_CHUNKS`
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_usize("WEFT_ENRICHMENT_MAX_ITEMS") {
            self.enrichment.max_items = v;
        }
        if let Some(v) = env_usize("WEFT_ANALYSIS_MAX_CHUNK_CHARS") {
            self.analysis.max_chunk_chars = v;
        }
        if let Some(v) = env_usize("WEFT_ANALYSIS_MAX_CHUNKS") {
            self.analysis.max_chunks = v;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enrichment.max_items == 0 {
            return Err(ConfigError::ValidationError(
                "enrichment.max_items must be at least 1".into(),
            ));
        }
        if self.analysis.max_chunk_chars == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.max_chunk_chars must be at least 1".into(),
            ));
        }
        if self.analysis.max_chunks == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.max_chunks must be at least 1".into(),
            ));
        }
        if self.analysis.sniff_lines < 2 {
            return Err(ConfigError::ValidationError(
                "analysis.sniff_lines must be at least 2 (sniffing compares lines)".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(%key, %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enrichment.max_items, 8);
        assert_eq!(config.analysis.max_chunk_chars, 1200);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[enrichment]\nmax_items = 3").unwrap();

        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.enrichment.max_items, 3);
        assert_eq!(config.analysis.max_chunks, 64);
    }

    #[test]
    fn zero_bound_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[enrichment]\nmax_items = 0").unwrap();

        let err = EngineConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("max_items"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "enrichment = not-a-table").unwrap();

        let err = EngineConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn default_toml_round_trips() {
        let text = EngineConfig::default_toml();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }
}

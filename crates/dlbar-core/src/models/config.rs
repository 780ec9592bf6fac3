//! Configuration structures for the dlbar tools.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DlbarError, Result};

/// Main configuration for dlbar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DlbarConfig {
    /// Output configuration.
    pub output: OutputConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// Date reconciliation configuration.
    pub reconcile: ReconcileConfig,
}

/// Output format for parsed records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output
    #[default]
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for written output.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions treated as barcode payloads.
    pub extensions: Vec<String>,

    /// File name of the CSV summary.
    pub summary_file: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string(), "dat".to_string()],
            summary_file: "summary.csv".to_string(),
        }
    }
}

impl BatchConfig {
    /// Whether `path` has one of the configured payload extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

/// Date reconciliation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Treat a barcode/reference mismatch as a failure.
    pub fail_on_mismatch: bool,
}

impl DlbarConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DlbarError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| DlbarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = DlbarConfig::default();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert!(!config.reconcile.fail_on_mismatch);
        assert_eq!(config.batch.summary_file, "summary.csv");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: DlbarConfig =
            serde_json::from_str(r#"{"reconcile": {"fail_on_mismatch": true}}"#).unwrap();
        assert!(config.reconcile.fail_on_mismatch);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DlbarConfig::default();
        config.output.format = OutputFormat::Csv;
        config.save(&path).unwrap();

        assert_eq!(DlbarConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = DlbarConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, DlbarError::Config(_)));
        assert!(!err.is_barcode_error());
    }

    #[test]
    fn test_batch_accepts_extensions() {
        let batch = BatchConfig::default();
        assert!(batch.accepts(&PathBuf::from("scan.TXT")));
        assert!(batch.accepts(&PathBuf::from("a/b/payload.dat")));
        assert!(!batch.accepts(&PathBuf::from("photo.png")));
        assert!(!batch.accepts(&PathBuf::from("noext")));
    }
}

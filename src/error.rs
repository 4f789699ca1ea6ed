//! Error types for configuration loading.
//!
//! Gauge evaluation itself never fails: missing data is a normal state and
//! degenerate configurations have defined fallbacks. Only reading and
//! validating registries can produce errors.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Format by file extension; files without a known extension are TOML.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Some(ConfigFormat::Toml),
            Some(ext) => match ext.to_ascii_lowercase().as_str() {
                "toml" => Some(ConfigFormat::Toml),
                "json" => Some(ConfigFormat::Json),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            },
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Toml => f.write_str("TOML"),
            ConfigFormat::Json => f.write_str("JSON"),
            ConfigFormat::Yaml => f.write_str("YAML"),
        }
    }
}

/// A single problem found while validating a gauge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Metric identifier the problem belongs to.
    pub metric: String,
    /// Offending field, e.g. `thresholds` or `scale`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(metric: impl Into<String>, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.metric, self.field, self.message)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid for the format
    #[error("failed to parse {format} configuration: {message}")]
    Parse { format: ConfigFormat, message: String },

    /// Unknown file extension
    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Parsed fine but failed validation; carries every issue found
    #[error("invalid configuration ({} problem(s)):\n{}", .0.len(), format_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(format: ConfigFormat, message: impl fmt::Display) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

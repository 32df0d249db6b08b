//! Output format abstraction.

use std::io::Write;
use thiserror::Error;

use crate::Report;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON object.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for report formatters.
pub trait ReportFormatter: Send + Sync {
    /// Writes the report to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_report<W: Write>(&self, report: &Report, writer: W) -> Result<(), FormatError>;

    /// Returns the file extension used when an output path has none.
    fn extension(&self) -> &str;

    /// Renders the report into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting fails.
    fn render(&self, report: &Report) -> Result<String, FormatError> {
        let mut buf = Vec::new();
        self.write_report(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

//! Error types for rbreport.
//!
//! Epistemic taxonomy:
//! - B_i falsified: Expected failures (missing file, malformed record)
//! - I^R unresolved: Parameters the caller never pinned down

use thiserror::Error;

use super::ConfigError;

/// Top-level error type for rbreport.
#[derive(Debug, Error)]
pub enum ReportError {
    // ═══════════════════════════════════════════════════════════════════
    // I^R UNRESOLVED — Parameters could not be resolved
    // ═══════════════════════════════════════════════════════════════════

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // ═══════════════════════════════════════════════════════════════════
    // B_i FALSIFIED — Belief proven wrong (expected failures)
    // ═══════════════════════════════════════════════════════════════════

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Index {index} out of range for result set of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for rbreport.
pub type Result<T> = std::result::Result<T, ReportError>;

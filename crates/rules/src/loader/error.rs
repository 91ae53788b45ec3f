//! Error type for schedule loading.

use std::path::PathBuf;

use datimus_core::ValidationError;

/// Errors that abort loading a schedule.
///
/// Loading is all-or-nothing: the first error stops the load and no partial
/// table is returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem I/O error.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// TOML parse/deserialization error.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A rule line that does not parse or violates a range invariant.
    #[error("metric '{metric}' in {}: invalid rule '{line}': {source}", .path.display())]
    Rule {
        metric: String,
        path: PathBuf,
        line: String,
        source: ValidationError,
    },

    /// The same metric name declared twice across the metric files.
    #[error("metric '{name}' in {} is already defined", .path.display())]
    DuplicateMetric { name: String, path: PathBuf },

    /// Configuration values that parse but make no sense (e.g. `sleep_time = 0`).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for schedule loading.
pub type Result<T> = std::result::Result<T, LoadError>;

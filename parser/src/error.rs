//! Error types for lease report parsing and querying.
//!
//! [`LineError`] describes why one data line could not become a lease record.
//! [`LeaseError`] covers everything a query can fail on: malformed lines
//! promoted by a fail-fast policy, the external command, I/O, and config.

use thiserror::Error;

/// Why a single data line failed extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line lacks the delimiter a positional field is anchored on.
    #[error("{field}: expected delimiter '{delimiter}' not found")]
    MissingDelimiter {
        field: &'static str,
        delimiter: char,
    },

    /// The line is too short to reach a fixed column offset.
    #[error("{field}: line has no column at offset {offset}")]
    OffsetOutOfRange { field: &'static str, offset: usize },

    /// A pattern-located field matched more than once.
    #[error("{field}: {count} candidate values found, expected one")]
    AmbiguousMatch { field: &'static str, count: usize },

    /// A pattern-located field did not match at all.
    #[error("{field}: no value found")]
    MissingField { field: &'static str },
}

/// Errors that can occur while fetching or parsing a lease report.
#[derive(Debug, Error)]
pub enum LeaseError {
    /// A data line failed extraction under a fail-fast policy.
    #[error("line {line_number}: {source}")]
    MalformedLine {
        line_number: usize,
        #[source]
        source: LineError,
    },

    /// The report command is not installed or not on `PATH`.
    #[error("report command '{0}' not found")]
    CommandNotFound(String),

    /// The report command could not be started.
    #[error("failed to run report command: {0}")]
    CommandSpawn(#[source] std::io::Error),

    /// The report command exited unsuccessfully.
    #[error("report command exited with {}: {detail}", exit_label(.code))]
    CommandFailed { code: Option<i32>, detail: String },

    /// The report command ran past its configured timeout and was killed.
    #[error("report command timed out after {timeout:?}")]
    Timeout { timeout: std::time::Duration },

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is structurally valid but unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}

/// Convenience alias for results with [`LeaseError`].
pub type Result<T> = std::result::Result<T, LeaseError>;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating inputs, building trees, or persisting models.
#[derive(Debug, Error)]
pub enum Id3Error {
    /// Attribute metadata lacks even the label column.
    #[error("Attribute metadata is empty; index 0 must describe the label")]
    EmptyAttributes,
    /// A row does not line up with the attribute metadata.
    #[error("Row {row} has {found} values but {expected} attributes are described")]
    RowLength {
        /// Position of the offending row.
        row: usize,
        /// Number of attributes in the metadata.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },
    /// The split budget is not parallel to the attribute metadata.
    #[error("Split budget has {found} entries but {expected} attributes are described")]
    BudgetLength {
        /// Number of attributes in the metadata.
        expected: usize,
        /// Number of budget entries.
        found: usize,
    },
    /// Threshold search needs a positive stride.
    #[error("Numeric threshold stride must be at least 1")]
    ZeroStride,
    /// Failed to read or write a file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to encode or decode JSON.
    #[error("Invalid JSON at {path}: {source}")]
    Json {
        /// File path.
        path: PathBuf,
        /// JSON error.
        source: serde_json::Error,
    },
    /// A model does not agree with its own attribute metadata.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

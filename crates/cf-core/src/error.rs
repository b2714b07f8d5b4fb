//! Error types for the cutflow toolkit

use thiserror::Error;

/// Cutflow error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Concatenating samples whose field-name sets differ
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A cut predicate references a field absent from the sample
    #[error("cut '{cut}' references unknown field '{field}'")]
    UnknownField {
        /// Name of the offending cut.
        cut: String,
        /// The missing field.
        field: String,
    },

    /// A field column's length differs from the weight column's length
    #[error("column length mismatch: {0}")]
    ColumnLength(String),

    /// A per-event sequence is too short for the requested entry
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

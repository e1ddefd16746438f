//! # Store Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (catalog-core)    io::Error / toml::de::Error         │
//! │       │                                  │                              │
//! │       ▼                                  ▼                              │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller logs / reports it. Nothing here is process-fatal.              │
//! │                                                                         │
//! │  DecodeError never reaches callers of the loader: the bad record is    │
//! │  skipped with a warning and the load continues.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::{ProductId, ValidationError};
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product carries the requested id.
    ///
    /// ## When This Occurs
    /// - `find`, `review` or a report for an unknown id
    /// - The store is left untouched
    #[error("Product with id {id} not found")]
    NotFound { id: ProductId },

    /// Product arguments failed validation; nothing was inserted.
    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// A persisted record could not be decoded.
    #[error("Malformed record: {0}")]
    Decode(#[from] DecodeError),

    /// Writing a report failed.
    ///
    /// ## When This Occurs
    /// - Reports folder missing and cannot be created
    /// - Permission denied / disk full
    #[error("Failed to write report: {0}")]
    Persistence(String),

    /// The data folder could not be listed.
    #[error("Failed to read data folder: {0}")]
    DataFolder(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Creates a NotFound error for the given id.
    pub fn not_found(id: ProductId) -> Self {
        StoreError::NotFound { id }
    }

    /// Returns true for the id-did-not-resolve case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

/// A single malformed persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Wrong number of comma-separated fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A numeric field did not parse.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// The date field is not an ISO `YYYY-MM-DD` date.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// The line is not valid UTF-8.
    #[error("record is not valid UTF-8")]
    NotUtf8,

    /// The product kind tag is neither `D` nor `F`.
    #[error("unknown product kind '{0}'")]
    UnknownKind(String),

    /// The fields parsed but the product they describe is invalid.
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Result type for catalog operations.
pub type StoreResult<T> = Result<T, StoreError>;

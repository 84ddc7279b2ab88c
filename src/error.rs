//! Error types for Mutar
//!
//! This module defines the error types used throughout the library.

use thiserror::Error;

/// Result type alias for Mutar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Mutar operations
#[derive(Error, Debug)]
pub enum Error {
    /// A record is missing a field or a field has the wrong shape.
    /// Raised once, at ingestion, and never silently coerced downstream.
    #[error("schema error: {0}")]
    Schema(String),

    /// The evaluator was handed zero records; naturalness is undefined
    /// on empty input and must not degrade to 0 or NaN.
    #[error("cannot evaluate an empty record collection")]
    EmptyInput,

    /// Invalid harness or strategy configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

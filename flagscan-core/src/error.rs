//! Error types for flag parsing.

use thiserror::Error;

use crate::validation::ValidationReport;

/// Main error type for parsing and schema loading.
#[derive(Error, Debug)]
pub enum FlagsError {
    /// Both `strict` and `passthrough` were requested
    #[error("Cannot use strict and passthrough options together")]
    ConflictingModes,

    /// The tokenized flags did not satisfy the schema
    #[error("Invalid CLI Flags: {0}")]
    InvalidFlags(ValidationReport),

    /// A schema document could be read but describes an invalid rule
    #[error("Schema error: {0}")]
    Schema(String),

    /// Reading a schema document failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON schema document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML schema document could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FlagsError {
    /// The validation report, if this error came from schema validation.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            FlagsError::InvalidFlags(report) => Some(report),
            _ => None,
        }
    }
}

/// Result type alias for flag parsing operations
pub type Result<T> = std::result::Result<T, FlagsError>;

//! Error types for the hyphenation engine

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// No language pack registered under this identifier
    #[error("Language pack not found: {0}")]
    UnknownLanguage(String),

    /// Malformed entry in a pattern table
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Embedded hyphenation dictionary could not be loaded
    #[error("Failed to load {language} dictionary: {reason}")]
    Dictionary { language: String, reason: String },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

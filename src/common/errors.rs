//! Error types for the application

use thiserror::Error;

/// Result type alias using our ScoutError
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// User input could not be parsed into a target
    #[error("Input error: {0}")]
    Input(String),

    /// All transport attempts (primary + fallbacks) failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Event lookup exhausted every attempt
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// GraphQL-level errors returned by the oracle subgraph
    #[error("Oracle GraphQL error: {0}")]
    GraphQl(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

//! Error types for loadbal
//!
//! Centralized error handling using thiserror. The scheduler and history
//! never fail; errors only surface at the input boundaries.

use thiserror::Error;

/// All error types that can occur in loadbal
#[derive(Debug, Error)]
pub enum LoadbalError {
    /// A task was submitted with a weight the engine cannot accept
    #[error("Invalid task: weight must be positive, got {weight}")]
    InvalidTask { weight: u32 },

    /// A batch request larger than the engine will queue at once
    #[error("Invalid batch: at most {max} tasks per batch, got {count}")]
    InvalidBatch { count: usize, max: usize },

    /// Configuration failed validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Console input that does not name a known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for loadbal operations
pub type Result<T> = std::result::Result<T, LoadbalError>;

//! Error types for Taskpulse

use thiserror::Error;

/// Errors that can occur during intake and model loading
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to parse record: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Dataset contains no records")]
    EmptyDataset,

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),
}

/// Error types for Tweet Sentiment
use thiserror::Error;

/// Why a classification attempt produced no verdict
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("No text provided")]
    EmptyText,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Service error: {0}")]
    Service(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),
}

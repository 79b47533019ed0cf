//! Error types shared by the host-portable modules.

use thiserror::Error;

/// A submission that never produced a usable server response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The body arrived but is not a JSON object of the expected shape.
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rejected frontend configuration override.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid frontend config: {0}")]
    Invalid(#[source] serde_json::Error),
}

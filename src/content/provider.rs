use std::fmt;

use async_trait::async_trait;

use crate::core::model::Session;

/// Everything that can go wrong while generating a session.
/// None of these reach the player; the controller swaps in the fallback session.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// No API key configured.
    MissingCredentials,
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The response carried no generated text.
    EmptyResponse,
    /// The generated text was not valid session JSON.
    Parse(String),
    /// Parsed, but breaks a hard content rule (no levels, forbidden symbol).
    Schema(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingCredentials => write!(f, "missing API key"),
            GenerationError::Network(msg) => write!(f, "network error: {msg}"),
            GenerationError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            GenerationError::EmptyResponse => write!(f, "empty response from generator"),
            GenerationError::Parse(msg) => write!(f, "parse error: {msg}"),
            GenerationError::Schema(msg) => write!(f, "schema violation: {msg}"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// A live source of game sessions. One attempt per call; no retries, no caching.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Generates a complete, validated session.
    async fn generate_session(&self) -> Result<Session, GenerationError>;
}

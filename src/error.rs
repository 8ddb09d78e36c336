//! Error types shared across the relay

use thiserror::Error;

/// Result type for relay operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors raised inside the relay.
///
/// None of these ever reach a client: the pipeline falls back to the
/// original text and the broadcaster swallows per-recipient failures.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tagging failed: {0}")]
    Tagging(String),

    #[error("lexicon error: {0}")]
    Lexicon(String),

    #[error("{operation} timed out after {millis}ms")]
    Timeout { operation: &'static str, millis: u64 },

    #[error("connection for {0} is closed")]
    ConnectionClosed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("pipeline error: {0}")]
    Pipeline(String),
}

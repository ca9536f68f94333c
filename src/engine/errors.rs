//! Error types for the coaching engine.

use thiserror::Error;

/// Coaching engine error type.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The inbound message was empty or whitespace-only.
    #[error("message must not be empty")]
    MissingMessage,
    /// No stored profile for the requested user.
    #[error("no profile found for user {0}")]
    MissingProfile(crate::engine::ids::UserId),
    /// Completion backend returned a non-success status.
    #[error("completion backend error (status {status}): {body}")]
    Upstream {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
    /// Completion backend returned a well-formed but empty reply.
    #[error("completion backend returned an empty reply")]
    EmptyCompletion,
    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// `SQLite` storage error (sync).
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// `SQLite` storage error (async).
    #[error("tokio-rusqlite error: {0}")]
    TokioSqlite(#[from] tokio_rusqlite::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Detector pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for coaching operations.
pub type CoachResult<T> = Result<T, CoachError>;

//! Error types for albumradar.
//!
//! Every failure coming back from the Spotify Web API is mapped onto one of the
//! variants below at the client boundary, so the pipeline can tell an expected
//! empty state (for example a playlist that disappeared) from a real failure
//! without looking at message text.

use thiserror::Error;

use crate::types::ApiErrorResponse;

/// Main error type for all albumradar operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is missing or empty.
    #[error("Missing configuration value: {0} must be set")]
    MissingConfig(&'static str),

    /// A configuration value is present but cannot be used.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },

    /// The authorization flow or a token request was rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The service refused the access token (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests. Carries the `Retry-After` value in seconds, if sent.
    #[error("Rate limited by Spotify{}", retry_hint(.0))]
    RateLimited(Option<u64>),

    /// The service rejected the request as malformed (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An add-items batch is larger than the service accepts.
    #[error("Batch of {size} items exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    /// Any other non-success response.
    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed.
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Maps a non-success HTTP response onto an error variant.
    ///
    /// `body` is the raw response body. When it holds the regular Spotify error
    /// object (`{"error": {"status": .., "message": ..}}`) its message is used,
    /// otherwise the body text itself.
    pub fn from_status(status: u16, retry_after: Option<u64>, body: &str) -> Self {
        let message = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(parsed) => parsed.error.message,
            Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
            Err(_) => body.trim().to_string(),
        };

        match status {
            400 => Error::BadRequest(message),
            401 | 403 => Error::Unauthorized(message),
            404 => Error::NotFound(message),
            429 => Error::RateLimited(retry_after),
            _ => Error::Api { status, message },
        }
    }
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!(", retry after {} seconds", seconds),
        None => String::new(),
    }
}

/// Result type alias for albumradar operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for revapp-core

use serde_json::json;

/// Result type alias for revapp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for revapp operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid configuration (token, pipeline, base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// GitHub event payload could not be turned into an invocation context
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Heroku answered with a non-success status
    #[error("Heroku API returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Heroku error identifier (e.g. `not_found`), when the body carried one
        id: Option<String>,
        /// Human readable message from the error body
        message: String,
    },

    /// Heroku API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(String),
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Event payload error
    EventParse,
    /// I/O operation error
    Io,
    /// HTTP transport error
    Http,
    /// Non-success API response
    Api,
    /// API rate limit exceeded
    RateLimited,
    /// JSON error
    Json,
}

impl ErrorKind {
    /// Stable snake_case name, used in serialized error logs
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::EventParse => "event_parse",
            ErrorKind::Io => "io",
            ErrorKind::Http => "http",
            ErrorKind::Api => "api",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Json => "json",
        }
    }
}

impl Error {
    /// Get the error kind, zero allocation.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::Io(_) => ErrorKind::Io,
            Error::Http(_) => ErrorKind::Http,
            Error::Api { .. } => ErrorKind::Api,
            Error::RateLimited(_) => ErrorKind::RateLimited,
            Error::Json(_) => ErrorKind::Json,
        }
    }

    /// Borrow the error message, zero allocation.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::EventParse(msg)
            | Error::Http(msg)
            | Error::RateLimited(msg)
            | Error::Json(msg) => msg,
            Error::Api { message, .. } => message,
            Error::Io(_) => "I/O error",
        }
    }

    /// Serialize the full error as a single-line JSON object for the job log.
    pub fn to_json(&self) -> String {
        let mut value = json!({
            "kind": self.kind().as_str(),
            "message": self.to_string(),
        });
        if let Error::Api { status, id, .. } = self {
            value["status"] = json!(status);
            value["id"] = json!(id);
        }
        value.to_string()
    }
}

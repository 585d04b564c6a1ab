//! Sign-out error types.

/// Errors that can occur during the sign-out flow.
#[derive(Debug, thiserror::Error)]
pub enum SignOutError {
    /// HTTP request failed (connection, timeout, malformed body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error (settings loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server rejected the sign-out request.
    #[error("sign-out rejected ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// A URL required for redirect resolution could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Broadcast channel error types.

/// Errors that can occur while publishing or subscribing.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// Reading or writing the shared key failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Message serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The filesystem watcher could not be created or attached.
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Sign-out request options and server response contract.

use serde::{Deserialize, Serialize};

/// Caller-supplied options for a sign-out call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutOptions {
    /// Advisory post-sign-out destination. The server has final authority
    /// and may override or reject it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Whether to navigate after the session is terminated. Defaults to
    /// `true`; with `false` the caller inspects the response and navigates
    /// itself if desired.
    #[serde(default = "default_redirect")]
    pub redirect: bool,
}

fn default_redirect() -> bool {
    true
}

impl Default for SignOutOptions {
    fn default() -> Self {
        Self {
            callback_url: None,
            redirect: true,
        }
    }
}

impl SignOutOptions {
    /// Options with the given callback URL and redirect enabled.
    #[must_use]
    pub fn with_callback_url(url: impl Into<String>) -> Self {
        Self {
            callback_url: Some(url.into()),
            redirect: true,
        }
    }

    /// Options that suppress navigation entirely.
    #[must_use]
    pub fn no_redirect() -> Self {
        Self {
            callback_url: None,
            redirect: false,
        }
    }
}

/// The server's response after terminating a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutResponse {
    /// Server-authoritative post-sign-out destination, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Additional server fields passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

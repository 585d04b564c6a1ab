//! Cross-context session message wire format.
//!
//! The envelope exchanged between browsing contexts over the shared
//! `nextauth.message` key:
//!
//! ```json
//! {
//!   "event": "session",
//!   "data": { "trigger": "signout" },
//!   "timestamp": 1724601600000,
//!   "clientId": "0191b2c4-..."
//! }
//! ```
//!
//! `timestamp` and `clientId` let receivers drop self-originated echoes and
//! duplicate change notifications. The shared key holds only the latest
//! message: it is a signal, not a log.

use serde::{Deserialize, Serialize};

use crate::ids::ClientId;

/// Current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Event kind of a cross-context message.
///
/// Session lifecycle notifications are the only kind carried on this channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageEvent {
    /// Session lifecycle notification.
    Session,
}

/// What caused a session notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SessionTrigger {
    /// The user signed out; every context must invalidate its session state.
    SignOut,
}

/// Payload of a session notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEventData {
    /// What caused the notification.
    pub trigger: SessionTrigger,
}

impl SessionEventData {
    /// Payload for a sign-out notification.
    #[must_use]
    pub fn signout() -> Self {
        Self {
            trigger: SessionTrigger::SignOut,
        }
    }
}

/// A single message on the cross-context channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMessage {
    /// Event kind (always `session` on this channel).
    pub event: MessageEvent,
    /// Event payload.
    pub data: SessionEventData,
    /// Publish time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Context that published the message.
    pub client_id: ClientId,
}

impl SessionMessage {
    /// Build a message stamped with the current time.
    #[must_use]
    pub fn new(data: SessionEventData, client_id: ClientId) -> Self {
        Self {
            event: MessageEvent::Session,
            data,
            timestamp: now_ms(),
            client_id,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

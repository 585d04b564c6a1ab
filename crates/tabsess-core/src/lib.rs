//! # tabsess-core
//!
//! Foundation types for the tabsess session client:
//!
//! - **Wire formats**: the cross-context [`SessionMessage`] envelope and the
//!   sign-out request/response contract, matching the server's JSON shapes
//!   exactly (camelCase field names)
//! - **Branded IDs**: [`ClientId`] identifies a browsing context so receivers
//!   can drop self-originated echoes
//! - **Constants**: the well-known broadcast topic and endpoint path

#![deny(unsafe_code)]

pub mod constants;
pub mod ids;
pub mod message;
pub mod signout;

pub use constants::{MESSAGE_TOPIC, SIGNOUT_PATH};
pub use ids::ClientId;
pub use message::{MessageEvent, SessionEventData, SessionMessage, SessionTrigger, now_ms};
pub use signout::{SignOutOptions, SignOutResponse};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _id = ClientId::new();
        let _data = SessionEventData::signout();
        let _opts = SignOutOptions::default();
    }
}

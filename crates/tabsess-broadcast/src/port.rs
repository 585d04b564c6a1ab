//! The message-passing port every transport implements.
//!
//! The contract (last write wins, no self-delivery, at most once per write)
//! must hold regardless of transport, so callers can swap the shared-file
//! transport for the in-process one without behavioral change.

use tabsess_core::{SessionEventData, SessionMessage};

use crate::errors::BroadcastError;

/// Callback invoked with messages published by *other* contexts.
pub type MessageHandler = Box<dyn Fn(SessionMessage) + Send + Sync + 'static>;

/// A cross-context session event channel bound to one browsing context.
pub trait MessagePort {
    /// Publish a session event to every *other* context.
    ///
    /// The transport stamps the message with the current time and this
    /// context's client ID, then overwrites the shared key. Fire-and-forget:
    /// no acknowledgement, no delivery confirmation, no retry.
    fn publish(&self, data: &SessionEventData) -> Result<(), BroadcastError>;

    /// Register for messages published by sibling contexts.
    ///
    /// The handler is never invoked for this context's own publishes.
    /// Dropping the returned [`Subscription`] unsubscribes.
    fn subscribe(&self, handler: MessageHandler) -> Result<Subscription, BroadcastError>;
}

/// Keeps a subscription alive; dropping it unsubscribes.
pub struct Subscription {
    _guard: Box<dyn std::any::Any + Send>,
}

impl Subscription {
    /// Wrap a transport-specific guard whose `Drop` tears the subscription
    /// down.
    pub(crate) fn new<G: Send + 'static>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

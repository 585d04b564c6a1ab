//! In-process transport: a registry of contexts with handler fan-out.
//!
//! A [`MemoryHub`] plays the role of the shared origin; each
//! [`MemoryChannel`] is one browsing context attached to it. Publishing
//! stores the latest message on the hub and invokes every *other* context's
//! handlers synchronously. Used by tests and single-process embedders.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;

use parking_lot::Mutex;
use tracing::debug;

use tabsess_core::{ClientId, SessionEventData, SessionMessage};

use crate::errors::BroadcastError;
use crate::port::{MessageHandler, MessagePort, Subscription};

/// Handler stored shared so publish can invoke it without holding the
/// registry lock.
type SharedHandler = Arc<dyn Fn(SessionMessage) + Send + Sync>;

struct SubscriberEntry {
    context: ClientId,
    handler: SharedHandler,
}

struct HubInner {
    /// Latest value of the shared key (last write wins).
    latest: Mutex<Option<SessionMessage>>,
    /// Registered handlers indexed by subscription ID.
    subscribers: Mutex<HashMap<u64, SubscriberEntry>>,
    next_id: AtomicU64,
}

/// Shared hub all in-process contexts attach to.
pub struct MemoryHub {
    inner: Arc<HubInner>,
}

impl MemoryHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                latest: Mutex::new(None),
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Attach a new context with a fresh client ID.
    #[must_use]
    pub fn channel(&self) -> MemoryChannel {
        MemoryChannel {
            client_id: ClientId::new(),
            inner: Arc::clone(&self.inner),
        }
    }

    /// Latest message on the shared key, if any write has happened.
    #[must_use]
    pub fn latest(&self) -> Option<SessionMessage> {
        self.inner.latest.lock().clone()
    }

    /// Number of live subscriptions across all contexts.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

impl Default for MemoryHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One browsing context attached to a [`MemoryHub`].
pub struct MemoryChannel {
    client_id: ClientId,
    inner: Arc<HubInner>,
}

impl MemoryChannel {
    /// This context's client ID.
    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}

impl MessagePort for MemoryChannel {
    fn publish(&self, data: &SessionEventData) -> Result<(), BroadcastError> {
        let message = SessionMessage::new(*data, self.client_id.clone());
        *self.inner.latest.lock() = Some(message.clone());

        // Snapshot the recipients and release the registry lock before any
        // handler runs: a handler may publish, subscribe, or drop its own
        // subscription reentrantly, and the lock is not reentrant.
        let recipients: Vec<SharedHandler> = {
            let subs = self.inner.subscribers.lock();
            subs.values()
                // Own handlers are skipped: the publishing context reacts
                // through its own call chain, never through the channel.
                .filter(|s| s.context != self.client_id)
                .map(|s| Arc::clone(&s.handler))
                .collect()
        };
        debug!(
            client_id = %self.client_id,
            recipients = recipients.len(),
            trigger = ?message.data.trigger,
            "publish session message"
        );
        for handler in recipients {
            handler(message.clone());
        }
        Ok(())
    }

    fn subscribe(&self, handler: MessageHandler) -> Result<Subscription, BroadcastError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let _ = self.inner.subscribers.lock().insert(
            id,
            SubscriberEntry {
                context: self.client_id.clone(),
                handler: Arc::from(handler),
            },
        );
        Ok(Subscription::new(MemoryGuard {
            inner: Arc::downgrade(&self.inner),
            id,
        }))
    }
}

struct MemoryGuard {
    inner: Weak<HubInner>,
    id: u64,
}

impl Drop for MemoryGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let _ = inner.subscribers.lock().remove(&self.id);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Navigation capability.
//!
//! Isolates the browsing context's navigation side effects behind a small
//! trait so the decision logic stays pure and tests can substitute a
//! recorder. Embedders bind this to their real location machinery.

use parking_lot::Mutex;

/// Navigation side effects of one browsing context.
pub trait Navigator: Send + Sync {
    /// The context's current URL, read before any navigation.
    fn current_url(&self) -> String;

    /// Navigate to `url` without adding a history entry.
    fn replace(&self, url: &str);

    /// Force a full reload of the current page.
    fn reload(&self);
}

/// A navigation call observed by [`RecordingNavigator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationCall {
    /// `replace(url)` was invoked.
    Replace(String),
    /// `reload()` was invoked.
    Reload,
}

/// Test navigator that records calls instead of navigating.
pub struct RecordingNavigator {
    current: String,
    calls: Mutex<Vec<NavigationCall>>,
}

impl RecordingNavigator {
    /// Recorder reporting `current_url` as the context's location.
    #[must_use]
    pub fn new(current_url: impl Into<String>) -> Self {
        Self {
            current: current_url.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_url(&self) -> String {
        self.current.clone()
    }

    fn replace(&self, url: &str) {
        self.calls
            .lock()
            .push(NavigationCall::Replace(url.to_string()));
    }

    fn reload(&self) {
        self.calls.lock().push(NavigationCall::Reload);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

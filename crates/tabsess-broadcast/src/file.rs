//! Shared-file transport: a JSON key file plus filesystem change events.
//!
//! The persisted signal key is a single file named after the topic. Publish
//! overwrites it with the latest message; subscribers watch the parent
//! directory via `notify` and re-read the key when it changes.
//!
//! The underlying watcher fires in every process, including the writer's,
//! so the no-self-delivery contract is restored by dropping messages whose
//! `clientId` matches our own. Duplicate change events for a single write
//! (create + modify + close on most platforms) are collapsed by comparing
//! `(timestamp, clientId)` against the last delivered message.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{debug, warn};

use tabsess_core::{ClientId, SessionEventData, SessionMessage};

use crate::errors::BroadcastError;
use crate::port::{MessageHandler, MessagePort, Subscription};

/// One browsing context bound to a shared key file.
pub struct FileChannel {
    path: PathBuf,
    client_id: ClientId,
}

impl FileChannel {
    /// Bind to the shared key file with a fresh client ID.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            client_id: ClientId::new(),
        }
    }

    /// Bind with an explicit client ID.
    #[must_use]
    pub fn with_client_id(path: impl Into<PathBuf>, client_id: ClientId) -> Self {
        Self {
            path: path.into(),
            client_id,
        }
    }

    /// This context's client ID.
    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Path of the shared key file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

impl MessagePort for FileChannel {
    fn publish(&self, data: &SessionEventData) -> Result<(), BroadcastError> {
        let message = SessionMessage::new(*data, self.client_id.clone());
        let json = serde_json::to_string(&message)?;

        std::fs::create_dir_all(self.parent_dir())?;
        std::fs::write(&self.path, json)?;
        debug!(
            path = %self.path.display(),
            client_id = %self.client_id,
            trigger = ?message.data.trigger,
            "published session message"
        );
        Ok(())
    }

    fn subscribe(&self, handler: MessageHandler) -> Result<Subscription, BroadcastError> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir)?;

        let path = self.path.clone();
        let key_name: Option<OsString> = path.file_name().map(OsString::from);
        let own_id = self.client_id.clone();
        let mut last_seen: Option<(i64, ClientId)> = None;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "session message watch error");
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            if !event
                .paths
                .iter()
                .any(|p| p.file_name() == key_name.as_deref())
            {
                return;
            }

            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
                Err(e) => {
                    debug!(error = %e, "failed to read session message key");
                    return;
                }
            };
            // A write in progress can surface as partial JSON; skip and wait
            // for the next change event.
            let message: SessionMessage = match serde_json::from_str(&text) {
                Ok(m) => m,
                Err(e) => {
                    debug!(error = %e, "skipping unparseable session message");
                    return;
                }
            };
            if message.client_id == own_id {
                return;
            }
            let key = (message.timestamp, message.client_id.clone());
            if last_seen.as_ref() == Some(&key) {
                return;
            }
            last_seen = Some(key);
            handler(message);
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(Subscription::new(watcher))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

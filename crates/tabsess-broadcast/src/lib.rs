//! # tabsess-broadcast
//!
//! Cross-context session event channel: lets every open browsing context of
//! the same origin learn that a session ended, without any of them talking
//! to each other directly.
//!
//! The channel is a **message-passing port** over a single well-known key
//! (`nextauth.message`):
//!
//! - **Last write wins**: the key holds only the latest message; racing
//!   publishes overwrite each other, which is acceptable because the
//!   payloads are idempotent
//! - **No self-delivery**: the publishing context never observes its own
//!   message; it reacts through its own call chain instead
//! - **At most once per write**: fire-and-forget, no acknowledgement, no
//!   retry
//!
//! Two transports implement the port:
//!
//! - [`FileChannel`]: a shared JSON file plus filesystem change
//!   notifications, for contexts in separate processes
//! - [`MemoryHub`]/[`MemoryChannel`]: an in-process registry, for tests and
//!   single-process embedders

#![deny(unsafe_code)]

pub mod errors;
pub mod file;
pub mod memory;
pub mod port;

pub use errors::BroadcastError;
pub use file::FileChannel;
pub use memory::{MemoryChannel, MemoryHub};
pub use port::{MessageHandler, MessagePort, Subscription};

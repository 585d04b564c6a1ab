//! # tabsess-client
//!
//! Client-side sign-out flow for session authentication:
//!
//! - [`SignOutRequester`]: one authenticated POST to the sign-out endpoint,
//!   parsed into the server's JSON contract
//! - [`resolve_redirect`]: pure decision table for where (and how) to
//!   navigate afterward
//! - [`Navigator`]: capability trait isolating navigation side effects
//!   (`replace`/`reload`) from the decision logic
//! - [`SignOutFlow`]: composes the above with a cross-context
//!   [`tabsess_broadcast::MessagePort`] so every sibling context invalidates
//!   its session state
//!
//! Ordering is deliberate: the broadcast is published before any navigation,
//! since navigation may unload the context before a later publish could
//! complete.

#![deny(unsafe_code)]

pub mod errors;
pub mod navigator;
pub mod redirect;
pub mod requester;
pub mod settings;
pub mod signout;

pub use errors::SignOutError;
pub use navigator::{NavigationCall, Navigator, RecordingNavigator};
pub use redirect::{RedirectAction, resolve_redirect};
pub use requester::SignOutRequester;
pub use settings::{ClientSettings, load_settings, load_settings_from_path};
pub use signout::SignOutFlow;

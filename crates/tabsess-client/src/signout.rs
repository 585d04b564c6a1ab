//! The sign-out flow orchestrator.
//!
//! Composes the requester, the cross-context message port, the redirect
//! resolver, and the navigator:
//!
//! 1. POST the sign-out request; a failure stops everything (no broadcast,
//!    no navigation)
//! 2. Publish the `signout` session event, unconditionally and before any
//!    navigation (best-effort)
//! 3. Resolve the redirect action against the pre-navigation current URL
//! 4. Execute the navigation, if any
//! 5. Return the response so callers with `redirect = false` can inspect it

use tracing::warn;

use tabsess_broadcast::MessagePort;
use tabsess_core::{SessionEventData, SignOutOptions, SignOutResponse};

use crate::errors::SignOutError;
use crate::navigator::Navigator;
use crate::redirect::{RedirectAction, resolve_redirect};
use crate::requester::SignOutRequester;

/// Terminates the session and coordinates the aftermath.
pub struct SignOutFlow<P, N> {
    requester: SignOutRequester,
    port: P,
    navigator: N,
}

impl<P: MessagePort, N: Navigator> SignOutFlow<P, N> {
    /// Compose a flow from its collaborators.
    pub fn new(requester: SignOutRequester, port: P, navigator: N) -> Self {
        Self {
            requester,
            port,
            navigator,
        }
    }

    /// The navigator bound to this flow's browsing context.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Sign the user out.
    ///
    /// On success every sibling context is notified via the message port,
    /// regardless of the `redirect` option; this context then navigates per
    /// the resolved [`RedirectAction`]. The broadcast is best-effort: the
    /// session is already terminated server-side, so a publish failure is
    /// logged and swallowed rather than failing the flow.
    #[tracing::instrument(skip_all, fields(redirect = options.redirect))]
    pub async fn sign_out(
        &self,
        csrf_token: &str,
        options: &SignOutOptions,
    ) -> Result<SignOutResponse, SignOutError> {
        let response = self.requester.sign_out(csrf_token, options).await?;

        // Publish before navigating: a replace may unload this context.
        if let Err(e) = self.port.publish(&SessionEventData::signout()) {
            warn!(error = %e, "failed to broadcast sign-out to sibling contexts");
        }

        let current = self.navigator.current_url();
        match resolve_redirect(&response, options, &current)? {
            RedirectAction::None => {}
            RedirectAction::ReplaceOnly { target } => self.navigator.replace(&target),
            RedirectAction::ReplaceAndReload { target } => {
                self.navigator.replace(&target);
                self.navigator.reload();
            }
        }

        Ok(response)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

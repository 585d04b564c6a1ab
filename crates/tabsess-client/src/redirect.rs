//! Redirect decision logic.
//!
//! A pure decision table over `{redirect_requested, url_provided,
//! has_fragment}`, with no I/O and no navigation. Execution of the chosen action is
//! the [`crate::navigator::Navigator`]'s job.

use tracing::warn;
use url::Url;

use tabsess_core::{SignOutOptions, SignOutResponse};

use crate::errors::SignOutError;

/// Navigation to perform after a successful sign-out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectAction {
    /// Do not navigate; the caller inspects the response itself.
    None,
    /// Replace the current history entry with `target`.
    ReplaceOnly {
        /// Destination URL.
        target: String,
    },
    /// Replace with `target`, then force a full reload.
    ///
    /// Needed when the target carries a fragment: fragment-only navigations
    /// do not reload the page, and session-dependent state must be
    /// refreshed.
    ReplaceAndReload {
        /// Destination URL.
        target: String,
    },
}

/// Decide where (and how) to navigate after sign-out.
///
/// The server's `response.url` wins when present and parseable; otherwise
/// the current page URL is reloaded. A malformed server URL falls back to
/// the current URL rather than navigating to an invalid target; a malformed
/// `current_url` has no fallback left and is an error.
pub fn resolve_redirect(
    response: &SignOutResponse,
    options: &SignOutOptions,
    current_url: &str,
) -> Result<RedirectAction, SignOutError> {
    if !options.redirect {
        return Ok(RedirectAction::None);
    }

    let current = Url::parse(current_url)
        .map_err(|e| SignOutError::InvalidUrl(format!("{current_url}: {e}")))?;

    // Parsing is validation and fragment detection only; the navigation
    // target stays the exact string the server (or caller) supplied, since
    // `Url` re-serialization normalizes hosts, ports, and paths.
    let (target, has_fragment) = response
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .and_then(|u| match Url::parse(u) {
            Ok(parsed) => Some((u.to_string(), parsed.fragment().is_some())),
            Err(e) => {
                warn!(url = u, error = %e, "unusable sign-out destination, reloading current page");
                None
            }
        })
        .unwrap_or_else(|| (current_url.to_string(), current.fragment().is_some()));

    if has_fragment {
        Ok(RedirectAction::ReplaceAndReload { target })
    } else {
        Ok(RedirectAction::ReplaceOnly { target })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const CURRENT: &str = "https://app.example.com/dashboard";

    fn response_with(url: Option<&str>) -> SignOutResponse {
        SignOutResponse {
            url: url.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn redirect_false_short_circuits() {
        let action = resolve_redirect(
            &response_with(Some("https://redirects/to")),
            &SignOutOptions::no_redirect(),
            CURRENT,
        )
        .unwrap();
        assert_eq!(action, RedirectAction::None);
    }

    #[test]
    fn redirect_false_short_circuits_even_without_url() {
        let action =
            resolve_redirect(&response_with(None), &SignOutOptions::no_redirect(), CURRENT)
                .unwrap();
        assert_eq!(action, RedirectAction::None);
    }

    #[test]
    fn missing_url_falls_back_to_current_page() {
        let action =
            resolve_redirect(&response_with(None), &SignOutOptions::default(), CURRENT).unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceOnly {
                target: CURRENT.to_string()
            }
        );
    }

    #[test]
    fn empty_url_falls_back_to_current_page() {
        let action =
            resolve_redirect(&response_with(Some("")), &SignOutOptions::default(), CURRENT)
                .unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceOnly {
                target: CURRENT.to_string()
            }
        );
    }

    #[test]
    fn server_url_wins() {
        let action = resolve_redirect(
            &response_with(Some("https://redirects/to")),
            &SignOutOptions::default(),
            CURRENT,
        )
        .unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceOnly {
                target: "https://redirects/to".to_string()
            }
        );
    }

    #[test]
    fn server_url_is_passed_through_verbatim() {
        // `Url` would rewrite this to "https://example.com/landing":
        // lowercased host, default port stripped, dot-segment resolved.
        // The navigator must get the exact string the server sent.
        let raw = "https://Example.COM:443/a/../landing";
        let action = resolve_redirect(
            &response_with(Some(raw)),
            &SignOutOptions::default(),
            CURRENT,
        )
        .unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceOnly {
                target: raw.to_string()
            }
        );
    }

    #[test]
    fn current_url_fallback_is_passed_through_verbatim() {
        let current = "https://APP.example.com/dashboard?q=1&q=2";
        let action =
            resolve_redirect(&response_with(None), &SignOutOptions::default(), current).unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceOnly {
                target: current.to_string()
            }
        );
    }

    #[test]
    fn fragment_target_requires_reload() {
        let action = resolve_redirect(
            &response_with(Some("https://path/to/email/url#foo-bar-baz")),
            &SignOutOptions::default(),
            CURRENT,
        )
        .unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceAndReload {
                target: "https://path/to/email/url#foo-bar-baz".to_string()
            }
        );
    }

    #[test]
    fn empty_fragment_still_requires_reload() {
        let action = resolve_redirect(
            &response_with(Some("https://path/to/url#")),
            &SignOutOptions::default(),
            CURRENT,
        )
        .unwrap();
        assert_matches!(action, RedirectAction::ReplaceAndReload { .. });
    }

    #[test]
    fn fragment_on_current_page_fallback_requires_reload() {
        let action = resolve_redirect(
            &response_with(None),
            &SignOutOptions::default(),
            "https://app.example.com/inbox#message-42",
        )
        .unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceAndReload {
                target: "https://app.example.com/inbox#message-42".to_string()
            }
        );
    }

    #[test]
    fn malformed_server_url_falls_back_soft() {
        let action = resolve_redirect(
            &response_with(Some("/relative/only")),
            &SignOutOptions::default(),
            CURRENT,
        )
        .unwrap();
        assert_eq!(
            action,
            RedirectAction::ReplaceOnly {
                target: CURRENT.to_string()
            }
        );
    }

    #[test]
    fn malformed_current_url_is_an_error() {
        let result = resolve_redirect(
            &response_with(None),
            &SignOutOptions::default(),
            "not a url at all",
        );
        assert_matches!(result, Err(SignOutError::InvalidUrl(_)));
    }

    #[test]
    fn redirect_false_never_validates_urls() {
        // With redirect off the function short-circuits before touching any URL.
        let action = resolve_redirect(
            &response_with(Some("also not a url")),
            &SignOutOptions::no_redirect(),
            "not a url either",
        )
        .unwrap();
        assert_eq!(action, RedirectAction::None);
    }
}

//! The sign-out network request.
//!
//! One authenticated POST to the sign-out endpoint, parsed into the server's
//! JSON contract. No navigation, no broadcast, no retries: sign-out is
//! user-triggered and retry policy belongs to the caller.

use std::time::Duration;

use tracing::debug;

use tabsess_core::{SignOutOptions, SignOutResponse};

use crate::errors::SignOutError;
use crate::settings::ClientSettings;

/// Issues the sign-out request and parses the response contract.
pub struct SignOutRequester {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl SignOutRequester {
    /// Build a requester with its own HTTP client honoring the configured
    /// timeout.
    pub fn new(settings: ClientSettings) -> Result<Self, SignOutError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self { settings, client })
    }

    /// Build a requester around an existing HTTP client.
    #[must_use]
    pub fn with_client(settings: ClientSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    /// Terminate the session server-side.
    ///
    /// Posts `csrfToken`, the advisory `callbackUrl` (if any), and
    /// `json=true` as a form body. Any non-2xx status fails closed with
    /// [`SignOutError::Server`].
    #[tracing::instrument(skip_all)]
    pub async fn sign_out(
        &self,
        csrf_token: &str,
        options: &SignOutOptions,
    ) -> Result<SignOutResponse, SignOutError> {
        let endpoint = format!("{}{}", self.settings.base_url, self.settings.signout_path);

        let mut form: Vec<(&str, &str)> = vec![("csrfToken", csrf_token), ("json", "true")];
        if let Some(cb) = options.callback_url.as_deref() {
            form.push(("callbackUrl", cb));
        }

        let resp = self.client.post(&endpoint).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SignOutError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let response: SignOutResponse = resp.json().await?;
        debug!(url = ?response.url, "sign-out accepted");
        Ok(response)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings(server: &MockServer) -> ClientSettings {
        ClientSettings {
            base_url: server.uri(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn parses_server_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://redirects/to"
            })))
            .mount(&server)
            .await;

        let requester = SignOutRequester::new(test_settings(&server)).unwrap();
        let response = requester
            .sign_out("csrf-123", &SignOutOptions::default())
            .await
            .unwrap();

        assert_eq!(response.url.as_deref(), Some("https://redirects/to"));
    }

    #[tokio::test]
    async fn tolerates_missing_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signout"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "ok": true })),
            )
            .mount(&server)
            .await;

        let requester = SignOutRequester::new(test_settings(&server)).unwrap();
        let response = requester
            .sign_out("csrf-123", &SignOutOptions::default())
            .await
            .unwrap();

        assert!(response.url.is_none());
        assert_eq!(response.extra["ok"], true);
    }

    #[tokio::test]
    async fn sends_csrf_token_and_json_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signout"))
            .and(body_string_contains("csrfToken=csrf-123"))
            .and(body_string_contains("json=true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let requester = SignOutRequester::new(test_settings(&server)).unwrap();
        let _ = requester
            .sign_out("csrf-123", &SignOutOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn sends_callback_url_when_provided() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signout"))
            .and(body_string_contains("callbackUrl="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let requester = SignOutRequester::new(test_settings(&server)).unwrap();
        let _ = requester
            .sign_out(
                "csrf-123",
                &SignOutOptions::with_callback_url("https://redirects/to"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_status_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signout"))
            .respond_with(ResponseTemplate::new(401).set_body_string("csrf token mismatch"))
            .mount(&server)
            .await;

        let requester = SignOutRequester::new(test_settings(&server)).unwrap();
        let err = requester
            .sign_out("stale-token", &SignOutOptions::default())
            .await
            .unwrap_err();

        assert_matches!(
            err,
            SignOutError::Server { status: 401, ref message } if message.contains("mismatch")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signout"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let requester = SignOutRequester::new(test_settings(&server)).unwrap();
        let result = requester
            .sign_out("csrf-123", &SignOutOptions::default())
            .await;

        assert!(result.is_err());
    }
}

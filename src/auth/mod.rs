//! Credential refresh
//!
//! The gateway rejects a stale session inside the response stream. Recovery
//! exchanges an external credential token for a new session cookie at
//! `/api/auth/<provider>`; the cookie lands in the shared [`Session`] jar.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::LlmError;
use crate::session::Session;

/// Refreshes the credentials held by a [`Session`].
#[async_trait]
pub trait CredentialRefresher: Send + Sync {
    /// Returns `true` only if the session now holds fresh credentials.
    /// Failures are reported through the return value, never as an error.
    async fn refresh(&self, session: &Session, token: &SecretString) -> bool;
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    token: &'a str,
}

/// Token exchange against the gateway's auth endpoint.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    path: String,
    timeout: Duration,
}

impl AuthFlow {
    pub fn new(path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl CredentialRefresher for AuthFlow {
    async fn refresh(&self, session: &Session, token: &SecretString) -> bool {
        let body = AuthRequest {
            token: token.expose_secret(),
        };
        tracing::debug!(target: "note_gpt::auth", url = %session.url_for(&self.path), "refreshing session");

        let request = session.post_json(&self.path, &body).timeout(self.timeout);
        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(target: "note_gpt::auth", status = response.status().as_u16(), "session refreshed");
                true
            }
            Ok(response) => {
                tracing::warn!(target: "note_gpt::auth", status = response.status().as_u16(), "auth endpoint rejected token");
                false
            }
            Err(e) => {
                let err = LlmError::from(e);
                tracing::warn!(target: "note_gpt::auth", err = %err, "auth request failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_for(uri: &str) -> Session {
        Session::new(uri, Duration::from_secs(2), "").unwrap()
    }

    #[tokio::test]
    async fn successful_refresh_stores_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/github"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"token": "ext-token"})))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "session=fresh; Path=/"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let session = session_for(&server.uri());
        let flow = AuthFlow::new("/api/auth/github", Duration::from_secs(2));
        let ok = flow
            .refresh(&session, &SecretString::from("ext-token".to_string()))
            .await;

        assert!(ok);
        assert_eq!(session.cookie_header().as_deref(), Some("session=fresh"));
    }

    #[tokio::test]
    async fn non_success_status_returns_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/github"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad token"))
            .expect(1)
            .mount(&server)
            .await;

        let session = session_for(&server.uri());
        let flow = AuthFlow::new("/api/auth/github", Duration::from_secs(2));
        let ok = flow
            .refresh(&session, &SecretString::from("nope".to_string()))
            .await;

        assert!(!ok);
        assert!(session.cookie_header().is_none());
    }

    #[tokio::test]
    async fn transport_failure_returns_false() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let session = session_for(&uri);
        let flow = AuthFlow::new("/api/auth/github", Duration::from_secs(2));
        let ok = flow
            .refresh(&session, &SecretString::from("t".to_string()))
            .await;
        assert!(!ok);
    }
}

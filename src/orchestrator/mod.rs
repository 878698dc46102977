//! Request/consume/re-authenticate loop
//!
//! One call moves through `Sending -> Consuming` and ends in either a
//! completed text or an error. When the first frame of a stream reports a
//! stale credential, the session is refreshed and the whole request is sent
//! again, at most `max_retries` times. The loop carries the attempt counter as
//! plain state, so stack depth does not grow with retries.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use secrecy::SecretString;
use tracing::Instrument;

use crate::auth::CredentialRefresher;
use crate::error::{LlmError, classify_http_error};
use crate::session::Session;
use crate::streaming::{ConsumeResult, StreamConsumer, response_lines};
use crate::types::ChatRequest;

/// Options controlling one orchestrated call.
#[derive(Clone)]
pub struct OrchestratorOptions {
    pub chat_path: String,
    pub chat_timeout: Duration,
    pub max_retries: u32,
    /// External credential handed to the refresher; without it a rejected
    /// credential is terminal.
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for OrchestratorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestratorOptions")
            .field("chat_path", &self.chat_path)
            .field("chat_timeout", &self.chat_timeout)
            .field("max_retries", &self.max_retries)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

enum State {
    Sending,
    Consuming(reqwest::Response),
    AuthPending,
}

/// Drives a chat call to a terminal result.
#[derive(Clone)]
pub struct RetryOrchestrator {
    options: OrchestratorOptions,
    refresher: Arc<dyn CredentialRefresher>,
    consumer: StreamConsumer,
}

impl std::fmt::Debug for RetryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryOrchestrator")
            .field("options", &self.options)
            .finish()
    }
}

impl RetryOrchestrator {
    pub fn new(options: OrchestratorOptions, refresher: Arc<dyn CredentialRefresher>) -> Self {
        let consumer = StreamConsumer::new().with_read_timeout(options.chat_timeout);
        Self {
            options,
            refresher,
            consumer,
        }
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    /// Run the call. `build_request` is invoked once per attempt so every
    /// attempt sends a freshly built request.
    ///
    /// Returns the completion text with surrounding whitespace trimmed. Text
    /// from an abandoned or failed attempt is never returned.
    pub async fn run<B>(&self, session: &Session, build_request: B) -> Result<String, LlmError>
    where
        B: Fn() -> Result<ChatRequest, LlmError> + Send + Sync,
    {
        let span = tracing::info_span!("chat_call", request_id = %uuid::Uuid::new_v4());
        self.run_inner(session, build_request).instrument(span).await
    }

    async fn run_inner<B>(&self, session: &Session, build_request: B) -> Result<String, LlmError>
    where
        B: Fn() -> Result<ChatRequest, LlmError> + Send + Sync,
    {
        let mut attempt: u32 = 0;
        let mut state = State::Sending;

        loop {
            state = match state {
                State::Sending => {
                    let request = build_request()?;
                    State::Consuming(self.send(session, &request, attempt).await?)
                }
                State::Consuming(response) => {
                    // The line stream owns the response and is dropped inside `consume`.
                    match self.consumer.consume(response_lines(response)).await {
                        ConsumeResult::Completed(text) => {
                            tracing::debug!(target: "note_gpt::http", attempt, chars = text.len(), "completion received");
                            return Ok(text.trim().to_string());
                        }
                        ConsumeResult::Fatal(e) => return Err(e),
                        ConsumeResult::AuthRequired => State::AuthPending,
                    }
                }
                State::AuthPending => {
                    if attempt >= self.options.max_retries {
                        tracing::warn!(target: "note_gpt::auth", attempt, "credential still rejected, retries exhausted");
                        return Err(LlmError::AuthenticationError(format!(
                            "credential rejected after {attempt} re-authentication attempt(s); retries exhausted"
                        )));
                    }
                    let Some(token) = self.options.token.as_ref() else {
                        return Err(LlmError::AuthenticationError(
                            "credential rejected and no auth token is configured".to_string(),
                        ));
                    };
                    if !self.refresher.refresh(session, token).await {
                        return Err(LlmError::AuthenticationError(
                            "credential refresh failed".to_string(),
                        ));
                    }
                    attempt += 1;
                    tracing::info!(target: "note_gpt::auth", attempt, "re-authenticated, resending request");
                    State::Sending
                }
            };
        }
    }

    async fn send(
        &self,
        session: &Session,
        request: &ChatRequest,
        attempt: u32,
    ) -> Result<reqwest::Response, LlmError> {
        let url = session.url_for(&self.options.chat_path);
        tracing::info!(target: "note_gpt::http", url = %url, attempt, model = %request.model, "requesting completion");

        // The body is bounded per read by the consumer; only the wait for
        // response headers is bounded here.
        let limit = self.options.chat_timeout;
        let pending = session
            .post_json(&self.options.chat_path, request)
            .header(ACCEPT, "text/event-stream")
            .send();
        let response = match tokio::time::timeout(limit, pending).await {
            Ok(sent) => sent.map_err(LlmError::from),
            Err(_) => Err(LlmError::TimeoutError(format!(
                "no response headers within {limit:?}"
            ))),
        }
        .inspect_err(|err| {
            tracing::error!(target: "note_gpt::http", url = %url, err = %err, "chat request failed");
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let text = match tokio::time::timeout(limit, response.text()).await {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    tracing::debug!(target: "note_gpt::http", url = %url, status, err = %e, "failed to read error response body");
                    String::new()
                }
                Err(_) => {
                    tracing::debug!(target: "note_gpt::http", url = %url, status, "timed out reading error response body");
                    String::new()
                }
            };
            let err = classify_http_error(status, &text, &headers);
            tracing::error!(target: "note_gpt::http", url = %url, status, err = %err, "chat endpoint returned error status");
            return Err(err);
        }
        Ok(response)
    }
}

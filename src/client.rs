//! Note generation client

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::auth::{AuthFlow, CredentialRefresher};
use crate::config::NoteGptConfig;
use crate::error::LlmError;
use crate::orchestrator::{OrchestratorOptions, RetryOrchestrator};
use crate::prompt::NoteSource;
use crate::session::Session;
use crate::types::ChatRequest;

/// Client for a cookie-authenticated chat completion gateway.
///
/// One client owns one [`Session`]. Calls on the same client share its
/// cookies; callers that need isolated credentials should create separate
/// clients.
#[derive(Debug, Clone)]
pub struct NoteGptClient {
    config: NoteGptConfig,
    session: Session,
    orchestrator: RetryOrchestrator,
}

static_assertions::assert_impl_all!(NoteGptClient: Send, Sync);

impl NoteGptClient {
    /// Create a client that refreshes credentials through the gateway's auth endpoint.
    pub fn new(config: NoteGptConfig) -> Result<Self, LlmError> {
        let auth = AuthFlow::new(config.auth_path(), config.auth.timeout);
        Self::with_refresher(config, Arc::new(auth))
    }

    /// Create a client from the `CUSTOM_*` environment variables.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(NoteGptConfig::from_env())
    }

    /// Create a client with a custom credential refresher.
    pub fn with_refresher(
        config: NoteGptConfig,
        refresher: Arc<dyn CredentialRefresher>,
    ) -> Result<Self, LlmError> {
        config.validate()?;
        let session = Session::new(
            &config.base_url,
            config.connect_timeout,
            config.cookies.expose_secret(),
        )?;
        let orchestrator = RetryOrchestrator::new(
            OrchestratorOptions {
                chat_path: config.chat_path.clone(),
                chat_timeout: config.chat_timeout,
                max_retries: config.auth.max_retries,
                token: config.auth.token.clone(),
            },
            refresher,
        );
        Ok(Self {
            config,
            session,
            orchestrator,
        })
    }

    pub fn config(&self) -> &NoteGptConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Generate Markdown notes for a transcript.
    pub async fn summarize(&self, source: &NoteSource) -> Result<String, LlmError> {
        if source.segments.is_empty() {
            tracing::warn!(target: "note_gpt::http", title = %source.title, "summarizing a transcript with no segments");
        }
        let params = &self.config.params;
        self.complete(|| Ok(source.to_request(params))).await
    }

    /// Stream a completion for requests produced by `build_request` and
    /// return the reassembled, trimmed text.
    pub async fn complete<B>(&self, build_request: B) -> Result<String, LlmError>
    where
        B: Fn() -> Result<ChatRequest, LlmError> + Send + Sync,
    {
        self.orchestrator.run(&self.session, build_request).await
    }
}

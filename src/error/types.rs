//! Core error types.

use thiserror::Error;

/// Errors surfaced by the note-gpt client.
///
/// Only terminal failures reach the caller of `summarize`. Frame decode
/// problems are reported through [`crate::streaming::StreamFrame::Unparseable`]
/// and never become an `LlmError` on their own.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LlmError {
    /// Generic transport failure while sending a request.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The request did not complete within its timeout.
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// Connection refused, DNS failure and similar.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Non-2xx status from the chat endpoint.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Re-authentication failed or the retry bound was exhausted.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The response body could not be read while streaming.
    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LlmError {
    /// Create an API error without structured details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error carrying structured details.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code, if this error came from a non-2xx response.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthenticationError(_))
    }

    /// Whether the failure happened below the HTTP layer.
    ///
    /// The client itself never retries these; the flag is informational for
    /// callers that want to re-run `summarize`.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TimeoutError(_) | Self::ConnectionError(_) | Self::HttpError(_)
        )
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::TimeoutError(format!("Request timed out: {e}"));
        }
        if e.is_connect() {
            return Self::ConnectionError(format!("Connection error: {e}"));
        }
        Self::HttpError(format!("Failed to send request: {e}"))
    }
}

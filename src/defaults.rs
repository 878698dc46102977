//! Default Configuration Values
//!
//! Centralizes the defaults used by the client and its configuration.

use std::time::Duration;

/// HTTP client defaults
pub mod http {
    use super::*;

    /// Read timeout for the streaming chat request.
    ///
    /// Token generation for a long transcript can be slow, so this is
    /// deliberately generous.
    pub const CHAT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Timeout for the single round trip to the auth endpoint.
    pub const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const USER_AGENT: &str = concat!("note-gpt/", env!("CARGO_PKG_VERSION"));
}

/// Gateway endpoint layout
pub mod endpoints {
    pub const BASE_URL: &str = "http://localhost:3000";

    pub const CHAT_PATH: &str = "/api/chat/completions";

    /// Prefix of the auth endpoint; the provider name is appended.
    pub const AUTH_PATH_PREFIX: &str = "/api/auth/";

    pub const AUTH_PROVIDER: &str = "github";
}

/// Generation parameter defaults
pub mod generation {
    pub const MODEL: &str = "gpt4.1";
    pub const TEMPERATURE: f32 = 0.7;
    pub const TOP_P: f32 = 1.0;
    pub const MAX_TOKENS: u32 = 2048;
}

/// Stream protocol constants
pub mod stream {
    pub const DATA_PREFIX: &str = "data:";
    pub const DONE_MARKER: &str = "[DONE]";

    /// Error text the gateway embeds in the first frame when its credential is stale.
    pub const AUTH_SENTINEL: &str = "No valid token available";
}

/// One re-authentication per call chain covers the observed failure pattern.
pub const MAX_AUTH_RETRIES: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_timeout_exceeds_auth_timeout() {
        assert!(http::CHAT_TIMEOUT > http::AUTH_TIMEOUT);
    }

    #[test]
    fn user_agent_carries_crate_version() {
        assert!(http::USER_AGENT.starts_with("note-gpt/"));
    }
}

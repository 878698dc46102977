//! Client configuration
//!
//! `NoteGptConfig` is built either with `with_*` setters or from the
//! `CUSTOM_*` environment variables via [`NoteGptConfig::from_env`].

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::defaults;
use crate::error::LlmError;
use crate::types::GenerationParams;

pub const ENV_BASE_URL: &str = "CUSTOM_API_BASE_URL";
pub const ENV_MODEL: &str = "CUSTOM_MODEL";
pub const ENV_COOKIES: &str = "CUSTOM_MODEL_COOKIES";
pub const ENV_AUTH_TOKEN: &str = "CUSTOM_AUTH_TOKEN";
pub const ENV_AUTH_PROVIDER: &str = "CUSTOM_AUTH_PROVIDER";

/// Settings for the credential refresh call.
#[derive(Clone)]
pub struct AuthConfig {
    /// Provider segment of the auth path (`/api/auth/<provider>`).
    pub provider: String,
    /// External credential exchanged for a fresh gateway session.
    pub token: Option<SecretString>,
    pub timeout: Duration,
    /// Upper bound on re-authentications within one call.
    pub max_retries: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: defaults::endpoints::AUTH_PROVIDER.to_string(),
            token: None,
            timeout: defaults::http::AUTH_TIMEOUT,
            max_retries: defaults::MAX_AUTH_RETRIES,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("provider", &self.provider)
            .field("has_token", &self.token.is_some())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Configuration for [`crate::NoteGptClient`].
#[derive(Clone)]
pub struct NoteGptConfig {
    pub base_url: String,
    pub chat_path: String,
    pub params: GenerationParams,
    /// Initial session cookies in `k=v; k2=v2` form.
    pub cookies: SecretString,
    pub chat_timeout: Duration,
    pub connect_timeout: Duration,
    pub auth: AuthConfig,
}

impl Default for NoteGptConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::endpoints::BASE_URL.to_string(),
            chat_path: defaults::endpoints::CHAT_PATH.to_string(),
            params: GenerationParams::default(),
            cookies: SecretString::from(String::new()),
            chat_timeout: defaults::http::CHAT_TIMEOUT,
            connect_timeout: defaults::http::CONNECT_TIMEOUT,
            auth: AuthConfig::default(),
        }
    }
}

impl std::fmt::Debug for NoteGptConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ds = f.debug_struct("NoteGptConfig");
        ds.field("base_url", &self.base_url)
            .field("chat_path", &self.chat_path)
            .field("params", &self.params)
            .field("chat_timeout", &self.chat_timeout)
            .field("auth", &self.auth);
        if !self.cookies.expose_secret().is_empty() {
            ds.field("has_cookies", &true);
        }
        ds.finish()
    }
}

impl NoteGptConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. Unset or blank
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.params.model = model;
        }
        if let Some(cookies) = get(ENV_COOKIES) {
            config.cookies = SecretString::from(cookies);
        }
        if let Some(token) = get(ENV_AUTH_TOKEN) {
            config.auth.token = Some(SecretString::from(token));
        }
        if let Some(provider) = get(ENV_AUTH_PROVIDER) {
            config.auth.provider = provider;
        }
        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.params.model = model.into();
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = SecretString::from(cookies.into());
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_auth_provider(mut self, provider: impl Into<String>) -> Self {
        self.auth.provider = provider.into();
        self
    }

    pub fn with_max_auth_retries(mut self, max_retries: u32) -> Self {
        self.auth.max_retries = max_retries;
        self
    }

    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth.timeout = timeout;
        self
    }

    /// Auth endpoint path for the configured provider.
    pub fn auth_path(&self) -> String {
        format!("{}{}", defaults::endpoints::AUTH_PATH_PREFIX, self.auth.provider)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.base_url.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(LlmError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.params.model.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Model cannot be empty".to_string(),
            ));
        }
        if self.auth.provider.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Auth provider cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = NoteGptConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.chat_path, "/api/chat/completions");
        assert_eq!(config.params.model, "gpt4.1");
        assert_eq!(config.params.max_tokens, 2048);
        assert!(config.cookies.expose_secret().is_empty());
        assert!(config.auth.token.is_none());
        assert_eq!(config.auth.max_retries, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = NoteGptConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://gateway.example"),
            (ENV_MODEL, "gpt-4o"),
            (ENV_COOKIES, "sid=abc"),
            (ENV_AUTH_TOKEN, "ext-token"),
            (ENV_AUTH_PROVIDER, "linuxdo"),
        ]));
        assert_eq!(config.base_url, "https://gateway.example");
        assert_eq!(config.params.model, "gpt-4o");
        assert_eq!(config.cookies.expose_secret(), "sid=abc");
        assert_eq!(
            config.auth.token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("ext-token".to_string())
        );
        assert_eq!(config.auth_path(), "/api/auth/linuxdo");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = NoteGptConfig::from_lookup(lookup_from(&[(ENV_MODEL, "  ")]));
        assert_eq!(config.params.model, "gpt4.1");
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let err = NoteGptConfig::new("ftp://x").validate().unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
        assert!(NoteGptConfig::new("").validate().is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = NoteGptConfig::default()
            .with_cookies("sid=secret-cookie")
            .with_auth_token("secret-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-cookie"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("has_cookies"));
        assert!(rendered.contains("has_token: true"));
    }
}

//! Shared credential state
//!
//! A `Session` owns the cookie jar and the single `reqwest::Client` built on
//! top of it. The chat request and the auth request both go through the same
//! session, so cookies set by a successful re-authentication are sent with the
//! next chat request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;

use crate::defaults;
use crate::error::LlmError;

/// Split a `k=v; k2=v2` cookie string into name/value pairs.
///
/// Items without `=` are skipped; the value keeps everything after the first `=`.
pub fn parse_cookie_string(cookies: &str) -> Vec<(String, String)> {
    cookies
        .split(';')
        .filter_map(|item| item.trim().split_once('='))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: String,
    origin: Url,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("has_cookies", &self.cookie_header().is_some())
            .finish()
    }
}

impl Session {
    /// Create a session for `base_url`, seeding the jar from a cookie string.
    pub fn new(base_url: &str, connect_timeout: Duration, cookies: &str) -> Result<Self, LlmError> {
        let origin = Url::parse(base_url).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid base URL {base_url}: {e}"))
        })?;

        let jar = Arc::new(Jar::default());
        let seeded = parse_cookie_string(cookies);
        for (name, value) in &seeded {
            jar.add_cookie_str(&format!("{name}={value}; Path=/"), &origin);
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .connect_timeout(connect_timeout)
            .user_agent(defaults::http::USER_AGENT)
            .build()
            .map_err(|e| {
                LlmError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
            })?;

        tracing::debug!(target: "note_gpt::http", base_url = %base_url, seeded_cookies = seeded.len(), "session created");

        Ok(Self {
            http,
            jar,
            base_url: base_url.trim_end_matches('/').to_string(),
            origin,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The `Cookie` header value the session would send to its base URL.
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Start a JSON POST to `path`.
    ///
    /// No overall timeout is set here. Callers reading a long stream bound
    /// each read instead.
    pub fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> reqwest::RequestBuilder {
        self.http.post(self.url_for(path)).json(body)
    }
}

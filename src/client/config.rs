use std::time::Duration;

use crate::foundation::{
    core::ensure_non_empty,
    error::{VideodbError, VideodbResult},
};

/// Default API endpoint.
pub const VIDEO_DB_API: &str = "https://api.videodb.io";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VIDEO_DB_API_KEY";
/// Environment variable overriding the API endpoint.
pub const BASE_URL_ENV: &str = "VIDEO_DB_BASE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(500);

/// Connection settings for [`crate::HttpClient`] and [`crate::Connection`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    poll_interval: Duration,
    poll_timeout: Duration,
    extra_headers: Vec<(String, String)>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("poll_timeout", &self.poll_timeout)
            .field("extra_headers", &self.extra_headers)
            .finish()
    }
}

impl ClientConfig {
    /// Settings for `api_key` against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: VIDEO_DB_API.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            extra_headers: Vec::new(),
        }
    }

    /// Read `VIDEO_DB_API_KEY` and optional `VIDEO_DB_BASE_URL`.
    pub fn from_env() -> VideodbResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> VideodbResult<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(missing_api_key)?;
        let mut cfg = Self::new(api_key);
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            cfg = cfg.base_url(url);
        }
        Ok(cfg)
    }

    /// Override the API endpoint. A trailing `/` is dropped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay between polls of an async output.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Give up polling an async output after this long.
    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Add an extra header; sent as `x-<key>` with `_` turned into `-`.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((key.into(), value.into()));
        self
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API endpoint, without trailing `/`.
    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Delay between polls of an async output.
    pub fn poll_every(&self) -> Duration {
        self.poll_interval
    }

    /// Polling deadline for an async output.
    pub fn poll_deadline(&self) -> Duration {
        self.poll_timeout
    }

    /// Extra headers as given (unformatted).
    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }

    /// Check the key is present and the endpoint is an http(s) URL.
    pub fn validate(&self) -> VideodbResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(missing_api_key());
        }
        ensure_non_empty(&self.base_url, "base_url")?;
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(VideodbError::invalid_argument(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(VideodbError::invalid_argument("timeout must be > 0"));
        }
        Ok(())
    }
}

pub(crate) fn missing_api_key() -> VideodbError {
    VideodbError::authentication(format!(
        "No API key provided. Set an API key either as an environment variable ({API_KEY_ENV}) or pass it as an argument."
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/client/config.rs"]
mod tests;

use crate::{
    client::{
        config::{ClientConfig, missing_api_key},
        http::HttpClient,
    },
    composition::stream::StreamResolver,
    foundation::error::VideodbResult,
};

/// Authenticated handle to the VideoDB API.
///
/// Resolves [`crate::Timeline`] and [`crate::editor::EditorTimeline`]
/// requests through its [`StreamResolver`] impl.
#[derive(Debug, Clone)]
pub struct Connection {
    http: HttpClient,
}

impl Connection {
    /// Open a connection with explicit settings.
    pub fn new(config: &ClientConfig) -> VideodbResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Underlying HTTP client, for endpoints without a typed wrapper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

impl StreamResolver for Connection {
    fn send(&self, path: &str, body: &serde_json::Value) -> VideodbResult<serde_json::Value> {
        Ok(self.http.post(path, body)?.unwrap_or(serde_json::Value::Null))
    }
}

/// Connect with `api_key`, or with `VIDEO_DB_API_KEY` when `None`.
///
/// `VIDEO_DB_BASE_URL` overrides the endpoint when set.
pub fn connect(api_key: Option<&str>) -> VideodbResult<Connection> {
    let config = match api_key {
        Some(key) if !key.trim().is_empty() => {
            let cfg = ClientConfig::new(key);
            match std::env::var(crate::client::config::BASE_URL_ENV) {
                Ok(url) if !url.trim().is_empty() => cfg.base_url(url),
                _ => cfg,
            }
        }
        Some(_) => return Err(missing_api_key()),
        None => ClientConfig::from_env()?,
    };
    Connection::new(&config)
}

#[cfg(test)]
#[path = "../../tests/unit/client/connection.rs"]
mod tests;

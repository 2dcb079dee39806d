use crate::foundation::error::{VideodbError, VideodbResult};

/// Transport seam to the service that compiles compositions into streams.
///
/// [`crate::Connection`] implements it over HTTP. Implementations return the
/// response `data` payload and surface remote failures unmodified.
pub trait StreamResolver {
    /// POST the JSON `body` to the API `path` and return the response data.
    fn send(&self, path: &str, body: &serde_json::Value) -> VideodbResult<serde_json::Value>;
}

impl<T: StreamResolver + ?Sized> StreamResolver for &T {
    fn send(&self, path: &str, body: &serde_json::Value) -> VideodbResult<serde_json::Value> {
        (**self).send(path, body)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Resolver-issued reference to a playable composed stream.
pub struct StreamRef {
    /// HLS/stream URL of the composed result.
    pub stream_url: String,
    /// Hosted player page, when the service returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_url: Option<String>,
}

impl StreamRef {
    /// Extract the stream reference from a response data payload.
    pub fn from_data(data: &serde_json::Value) -> VideodbResult<Self> {
        let stream_url = data
            .get("stream_url")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VideodbError::invalid_request("response is missing stream_url"))?;
        let player_url = data
            .get("player_url")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Ok(Self {
            stream_url: stream_url.to_string(),
            player_url,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/stream.rs"]
mod tests;

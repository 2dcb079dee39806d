/// Convenience result type used across the client.
pub type VideodbResult<T> = Result<T, VideodbError>;

/// Top-level error taxonomy used by composition and client APIs.
#[derive(thiserror::Error, Debug)]
pub enum VideodbError {
    /// Malformed caller-provided values (timing, references, placements).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing API key, or the API rejected the credentials (HTTP 401).
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The API rejected or failed a request, or its response was unusable.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The transport timed out, or an async output never finished processing.
    #[error("timeout error: {0}")]
    Timeout(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VideodbError {
    /// Build a [`VideodbError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`VideodbError::Authentication`] value.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Build a [`VideodbError::InvalidRequest`] value.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Build a [`VideodbError::Timeout`] value.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Build a [`VideodbError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for failures reported by (or on the way to) the remote API.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_) | Self::InvalidRequest(_) | Self::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for VideodbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

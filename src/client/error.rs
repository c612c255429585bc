//! Error types for EPGStation API requests

use std::fmt;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the EPGStation API
#[derive(Debug)]
pub enum ClientError {
    /// The base URL or the HTTP client could not be built
    InvalidRequest(String),

    /// Sending the request or reading the body failed
    Transport(reqwest::Error),

    /// The body is not JSON of the expected shape
    Decode(serde_json::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidRequest(msg) => write!(f, "failed to build request: {}", msg),
            ClientError::Transport(err) => write!(f, "request failed: {}", err),
            ClientError::Decode(err) => write!(f, "invalid response body: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::InvalidRequest(_) => None,
            ClientError::Transport(err) => Some(err),
            ClientError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err)
    }
}

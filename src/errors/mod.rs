//! Error types shared by the service client, the controller and configuration.

/// Failure talking to the learned-index service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Check if the service answered but with a non-success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    /// Check if the response body could not be parsed.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Invalid dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Unsupported base URL scheme: {0}")]
    UnsupportedScheme(String),
}

use thiserror::Error;

/// Errors from the catalog and profile-store adapters.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    pub fn api(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        RemoteError::Api {
            service,
            status,
            message: message.into(),
        }
    }
}

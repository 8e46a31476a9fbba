use thiserror::Error;

/// Failure to fetch hosts from the monitoring service.
///
/// Every variant means the same thing to the inventory: the source is unavailable and the
/// empty document is printed instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("mackerel API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to decode hosts response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

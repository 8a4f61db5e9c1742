use thiserror::Error;

/// Errors from the recommendation backend.
///
/// Every variant collapses to the same generic message in the UI; the
/// detail is only for logs.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Failed to reach recommendation service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Recommendation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from recommendation service: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { url: url.to_string() }
        } else {
            ClientError::Transport(err)
        }
    }
}

/// Errors from the poster-metadata service.
///
/// These never leave the card that issued the lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Poster lookup failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Poster service returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response from poster service: {0}")]
    InvalidResponse(String),
}

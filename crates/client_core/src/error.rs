use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileFetchError {
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("invalid response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot build avatar URL from '{base}': {reason}")]
    AvatarUrl { base: String, reason: String },
}

impl ProfileFetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProfileFetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

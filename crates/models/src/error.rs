use thiserror::Error;

/// Failure of a single call to the upstream match/team provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Upstream rate limit hit for {url}")]
    RateLimited { url: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Could not decode upstream payload from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::Status { status: 404, .. })
    }
}

#[derive(Error, Debug)]
pub enum InsightError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Missing data in match {match_ref}: {field}")]
    MissingData { match_ref: String, field: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InsightError>;

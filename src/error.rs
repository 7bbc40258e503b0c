#[derive(Debug, thiserror::Error)]
pub enum MarketboardError {
    #[error("Listing service unavailable{}", status_suffix(.status))]
    ServiceUnavailable { status: Option<u16> },

    #[error("No data: {0}")]
    NoData(String),

    #[error("Unknown scope: {0}")]
    UnknownScope(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MarketboardError {
    /// `true` when the listing service itself is down, as opposed to the
    /// item simply having no listings.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, MarketboardError::ServiceUnavailable { .. })
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, MarketboardError>;

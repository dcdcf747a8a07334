use thiserror::Error;

/// Why a lookup produced no summary.
///
/// Every non-success status from the provider collapses into [`LookupError::NotFound`];
/// an unknown city, a rejected API key and an outage all read "City not found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("City not found")]
    NotFound { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    MalformedResponse(String),

    /// The caller dropped the lookup before the provider answered.
    #[error("Lookup cancelled")]
    Cancelled,
}

impl LookupError {
    /// True for failures detected locally, before any request is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, LookupError::EmptyQuery)
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        LookupError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::MalformedResponse(err.to_string())
    }
}

use thiserror::Error;

/// Why a single lookup failed. Every variant is terminal for that request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The query was empty or whitespace only; nothing was sent.
    #[error("Please enter a city name")]
    EmptyInput,

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The request never completed or the payload could not be understood.
    #[error("{0}")]
    TransportOrParse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::TransportOrParse(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::TransportOrParse(format!("Malformed weather response: {err}"))
    }
}

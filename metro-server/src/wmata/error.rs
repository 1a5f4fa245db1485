//! Feed client error types.

use crate::domain::TripError;

/// Errors from the live transit feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or missing API key
    #[error("unauthorized: check WMATA_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The feed reported a line code we do not recognize
    #[error("unknown line code: {0}")]
    UnknownLine(String),
}

/// Transport-level failures collapse into `Connection` at the engine
/// boundary; an unrecognized line code keeps its identity because the
/// presentation layer words it differently.
impl From<FeedError> for TripError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::UnknownLine(code) => TripError::UnknownLine(code),
            _ => TripError::Connection,
        }
    }
}

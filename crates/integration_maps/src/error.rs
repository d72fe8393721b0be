//! Map provider error types

use thiserror::Error;

/// Errors that can occur while talking to a map provider
#[derive(Debug, Error)]
pub enum MapsError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Provider answered with a server-side failure status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider answered but found nothing for the query
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider refused the request, either with its own status code or
    /// with a 4xx HTTP status
    #[error("Provider rejected the request ({status}): {message}")]
    Rejected {
        /// Provider status, e.g. `REQUEST_DENIED`
        status: String,
        /// Provider error message
        message: String,
    },

    /// A credential required by the provider is not configured
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Invalid query input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MapsError {
    /// Returns true if the provider could not be reached or did not answer properly
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RequestFailed(_)
        )
    }

    /// Classify a reqwest error
    pub(crate) fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::ConnectionFailed(error.to_string())
        }
    }
}

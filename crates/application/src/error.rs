//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every failure reaching a port boundary is classified into one of these
/// kinds, so fallback logic and the HTTP layer can act on *why* something
/// failed.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Required provider credential or setting is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller input rejected before any network call
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stop-ordering input rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider could not be reached, timed out or answered with a server error
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider answered with a body that could not be understood
    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(String),

    /// Provider understood the request but refused it
    #[error("Upstream rejected the request ({status}): {message}")]
    UpstreamRejected {
        /// Provider status code (e.g. `NOT_FOUND`, `REQUEST_DENIED`)
        status: String,
        /// Provider or fallback message
        message: String,
    },

    /// Geocoder returned no result for the address
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Providers answered but none produced a usable route
    #[error("No route found: {0}")]
    NoRouteFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the routing fallback chain should move on to the next provider
    pub const fn allows_fallback(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_)
                | Self::UpstreamMalformed(_)
                | Self::UpstreamRejected { .. }
                | Self::NoRouteFound(_)
                | Self::Configuration(_)
        )
    }
}

//! Geocoding service port
//!
//! Resolves free-text addresses to coordinates. Adapters in the
//! infrastructure layer implement this port over concrete geocoding APIs.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address geocoding
///
/// Implementations make exactly one outbound request per call: no retries,
/// no caching.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text address to a coordinate
    async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError>;

    /// Check that credentials and settings needed by this provider are present
    fn ensure_configured(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

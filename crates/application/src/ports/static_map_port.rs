//! Static map port
//!
//! Builds the URL of a non-interactive map image showing the route. The
//! image itself is never fetched.

use domain::{MapMarkers, value_objects::Coordinate};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for static map URL construction
#[cfg_attr(test, automock)]
pub trait StaticMapPort: Send + Sync {
    /// Compose markers and an already simplified path into one request URL
    fn build_url(&self, markers: &MapMarkers, path: &[Coordinate]) -> String;

    /// Maximum number of path points the provider accepts in one URL
    fn max_path_points(&self) -> usize;

    /// Check that the provider has the credentials its URLs need
    fn ensure_configured(&self) -> Result<(), ApplicationError>;
}

//! Infrastructure adapters
//!
//! Adapters connect application ports to the concrete map provider clients.

mod geocoding_adapter;
mod routing_adapter;
mod static_map_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use routing_adapter::RoutingAdapter;
pub use static_map_adapter::StaticMapAdapter;

use application::ApplicationError;
use integration_maps::MapsError;

/// Which kind of lookup produced a `NotFound`
#[derive(Debug, Clone, Copy)]
enum Lookup<'a> {
    Address(&'a str),
    Route,
}

/// Classify a provider error for the application layer
fn map_maps_error(error: MapsError, lookup: Lookup<'_>) -> ApplicationError {
    match error {
        e @ (MapsError::ConnectionFailed(_)
        | MapsError::Timeout { .. }
        | MapsError::RequestFailed(_)) => ApplicationError::UpstreamUnavailable(e.to_string()),
        MapsError::ParseError(msg) => ApplicationError::UpstreamMalformed(msg),
        MapsError::NotFound(msg) => match lookup {
            Lookup::Address(address) => ApplicationError::AddressNotFound(address.to_string()),
            Lookup::Route => ApplicationError::NoRouteFound(msg),
        },
        MapsError::Rejected { status, message } => {
            ApplicationError::UpstreamRejected { status, message }
        },
        MapsError::MissingApiKey(var) => ApplicationError::Configuration(format!("{var} is not set")),
        MapsError::InvalidInput(msg) => ApplicationError::Validation(msg),
    }
}

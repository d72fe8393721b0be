//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod route_preference;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinates};
pub use route_preference::RoutePreference;

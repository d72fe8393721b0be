//! Port definitions - Interfaces to external provider services

mod geocoding_port;
mod routing_port;
mod static_map_port;

pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use routing_port::RoutingPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use static_map_port::StaticMapPort;
#[cfg(test)]
pub use static_map_port::MockStaticMapPort;

//! Domain layer for FleetRoute
//!
//! Contains the directions and stop-ordering vocabulary: coordinates, routing
//! preferences, requests and results. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

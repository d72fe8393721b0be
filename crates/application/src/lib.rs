//! Application layer - Use cases and orchestration
//!
//! Contains the directions and stop-ordering use cases, the provider fallback
//! chain and the port definitions adapters implement.

pub mod error;
pub mod polyline;
pub mod ports;
pub mod route_formatter;
pub mod services;

pub use error::ApplicationError;
pub use polyline::{DEFAULT_MAX_PATH_POINTS, map_path, simplify_polyline};
pub use ports::*;
pub use route_formatter::{format_distance, format_duration};
pub use services::*;

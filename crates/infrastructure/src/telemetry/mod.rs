//! Logging setup
//!
//! Console logging through `tracing-subscriber`, in text or JSON form.

mod logging;

pub use logging::{LogFormat, TelemetryError, init_logging};

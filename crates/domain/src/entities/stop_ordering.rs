//! Stop-ordering request and result entities

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::Coordinate};

/// A fixed start and the stops to visit before returning to it
#[derive(Debug, Clone, PartialEq)]
pub struct StopOrderingRequest {
    start: Coordinate,
    stops: Vec<Coordinate>,
}

impl StopOrderingRequest {
    /// Create a request
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `stops` is empty.
    pub fn new(start: Coordinate, stops: Vec<Coordinate>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::invalid_input(
                "at least one stop must be provided",
            ));
        }
        Ok(Self { start, stops })
    }

    /// Start and end of the tour
    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    /// Stops in the caller's order
    #[must_use]
    pub fn stops(&self) -> &[Coordinate] {
        &self.stops
    }
}

/// Best visiting order found for a [`StopOrderingRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopOrderingResult {
    /// Permutation of the requested stops
    pub order: Vec<Coordinate>,
    /// Length of start → order… → start in kilometers
    pub total_distance_km: f64,
}

/// Length of the closed tour `start → stops[0] → … → stops[last] → start`
#[must_use]
pub fn closed_tour_km<'a>(
    start: &Coordinate,
    stops: impl IntoIterator<Item = &'a Coordinate>,
) -> f64 {
    let mut total = 0.0;
    let mut prev = start;
    for stop in stops {
        total += prev.distance_km(stop);
        prev = stop;
    }
    total + prev.distance_km(start)
}

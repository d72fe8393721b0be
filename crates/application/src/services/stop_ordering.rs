//! Exact stop-ordering optimizer
//!
//! Finds the visiting order that minimises the closed tour
//! start → stops… → start under great-circle distance, by enumerating every
//! permutation of the stops. The search is factorial, so the number of stops
//! is bounded.

use domain::{StopOrderingRequest, StopOrderingResult, closed_tour_km};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::ApplicationError;

/// Default maximum number of stops accepted by the exact search
pub const MAX_EXACT_STOPS: usize = 8;

/// Brute-force solver for small stop sets
#[derive(Debug, Clone, Copy)]
pub struct StopOrderingOptimizer {
    max_stops: usize,
}

impl Default for StopOrderingOptimizer {
    fn default() -> Self {
        Self::new(MAX_EXACT_STOPS)
    }
}

impl StopOrderingOptimizer {
    /// Create an optimizer accepting at most `max_stops` stops
    #[must_use]
    pub const fn new(max_stops: usize) -> Self {
        Self { max_stops }
    }

    /// Configured stop limit
    #[must_use]
    pub const fn max_stops(&self) -> usize {
        self.max_stops
    }

    /// Find the shortest visiting order
    ///
    /// Permutations are enumerated in lexicographic order of the input
    /// indices and only a strictly shorter tour replaces the current best,
    /// so ties resolve to the earliest permutation.
    #[instrument(skip(self, request), fields(stops = request.stops().len()))]
    pub fn solve(
        &self,
        request: &StopOrderingRequest,
    ) -> Result<StopOrderingResult, ApplicationError> {
        let start = request.start();
        let stops = request.stops();

        if stops.len() > self.max_stops {
            return Err(ApplicationError::InvalidInput(format!(
                "at most {} stops can be ordered, got {}",
                self.max_stops,
                stops.len()
            )));
        }

        let mut best_order: Vec<usize> = (0..stops.len()).collect();
        let mut best_distance = f64::INFINITY;

        for order in (0..stops.len()).permutations(stops.len()) {
            let distance = closed_tour_km(&start, order.iter().map(|&i| &stops[i]));
            if distance < best_distance {
                best_distance = distance;
                best_order = order;
            }
        }

        debug!(total_km = best_distance, "Stop order found");

        Ok(StopOrderingResult {
            order: best_order.into_iter().map(|i| stops[i]).collect(),
            total_distance_km: best_distance,
        })
    }
}

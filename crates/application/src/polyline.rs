//! Route geometry downsampling for static map requests
//!
//! Static map providers cap the length of the request URL, so route
//! geometries are thinned with a uniform integer stride before being
//! serialised.

use domain::value_objects::Coordinate;

/// Default maximum number of path points sent to a static map provider
pub const DEFAULT_MAX_PATH_POINTS: usize = 50;

/// Downsample `points` to at most `max_points`, preserving order
///
/// Uses the stride `max(len / max_points, 1)` starting at the first point.
/// The last point is only kept when the stride happens to land on it. When
/// the stride alone would still exceed `max_points` (lengths that are not a
/// multiple of `max_points`), the sampled sequence is cut at `max_points`.
#[must_use]
pub fn simplify_polyline(points: &[Coordinate], max_points: usize) -> Vec<Coordinate> {
    let max_points = max_points.max(1);
    if points.len() <= max_points {
        return points.to_vec();
    }

    let step = (points.len() / max_points).max(1);
    points
        .iter()
        .step_by(step)
        .take(max_points)
        .copied()
        .collect()
}

/// Path to draw on the map: the simplified route geometry, or the straight
/// line through the request points when the provider returned no geometry
#[must_use]
pub fn map_path(
    geometry: &[Coordinate],
    request_points: &[Coordinate],
    max_points: usize,
) -> Vec<Coordinate> {
    if geometry.is_empty() {
        return simplify_polyline(request_points, max_points);
    }
    simplify_polyline(geometry, max_points)
}

//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    Coordinate, DirectionsRequest, RoutePreference, closed_tour_km,
    value_objects::EARTH_RADIUS_KM,
};
use proptest::prelude::*;

// ============================================================================
// Coordinate Property Tests
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_point(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = Coordinate::new(lat, lon);
            prop_assert!(result.is_ok());

            let coord = result.unwrap();
            prop_assert!((coord.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((coord.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn distance_to_self_is_zero(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let coord = Coordinate::new(lat, lon).unwrap();
            prop_assert!(coord.distance_km(&coord).abs() < 0.001);
        }

        #[test]
        fn distance_is_symmetric_and_bounded(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = Coordinate::new(lat1, lon1).unwrap();
            let b = Coordinate::new(lat2, lon2).unwrap();
            let ab = a.distance_km(&b);
            let ba = b.distance_km(&a);
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!(ab >= 0.0);
            // Never longer than half the circumference
            prop_assert!(ab <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
        }
    }
}

// ============================================================================
// Closed tour Property Tests
// ============================================================================

mod closed_tour_tests {
    use super::*;

    proptest! {
        #[test]
        fn reversed_tour_has_same_length(
            points in prop::collection::vec((-80.0f64..80.0f64, -170.0f64..170.0f64), 1..6)
        ) {
            let start = Coordinate::new(0.0, 0.0).unwrap();
            let stops: Vec<Coordinate> = points
                .iter()
                .map(|(lat, lon)| Coordinate::new(*lat, *lon).unwrap())
                .collect();

            let forward = closed_tour_km(&start, stops.iter());
            let backward = closed_tour_km(&start, stops.iter().rev());
            prop_assert!((forward - backward).abs() < 1e-6);
        }
    }
}

// ============================================================================
// DirectionsRequest Property Tests
// ============================================================================

mod directions_request_tests {
    use super::*;

    proptest! {
        #[test]
        fn whitespace_only_origin_rejected(origin in "[ \t]{0,8}", destination in "[a-z]{1,16}") {
            let result = DirectionsRequest::new(&origin, &destination, None, RoutePreference::None);
            prop_assert!(result.is_err());
        }

        #[test]
        fn addresses_are_trimmed(
            origin in "[a-z]{1,16}",
            destination in "[a-z]{1,16}",
            pad in "[ ]{0,4}"
        ) {
            let padded_origin = format!("{pad}{origin}{pad}");
            let padded_destination = format!("{pad}{destination}{pad}");
            let req = DirectionsRequest::new(
                &padded_origin,
                &padded_destination,
                None,
                RoutePreference::None,
            )
            .unwrap();
            prop_assert_eq!(req.origin(), origin.as_str());
            prop_assert_eq!(req.destination(), destination.as_str());
        }
    }
}

//! Directions service
//!
//! Geocodes the request addresses, fetches a route through the provider
//! chain, downsamples the geometry for the static map and renders the
//! human-readable summary.

use std::{fmt, sync::Arc};

use domain::{Coordinate, DirectionsRequest, MapMarkers, RouteResult};
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    polyline::map_path,
    ports::{GeocodingPort, StaticMapPort},
    route_formatter::{format_distance, format_duration},
    services::RouteFetcher,
};

/// Use case behind `POST /directions`
pub struct DirectionsService {
    geocoder: Arc<dyn GeocodingPort>,
    route_fetcher: RouteFetcher,
    static_map: Arc<dyn StaticMapPort>,
}

impl fmt::Debug for DirectionsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionsService")
            .field("route_fetcher", &self.route_fetcher)
            .finish_non_exhaustive()
    }
}

impl DirectionsService {
    /// Wire the service to its ports
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        route_fetcher: RouteFetcher,
        static_map: Arc<dyn StaticMapPort>,
    ) -> Self {
        Self {
            geocoder,
            route_fetcher,
            static_map,
        }
    }

    /// Build directions for a validated request
    #[instrument(skip(self, request), fields(preference = %request.preference()))]
    pub async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<RouteResult, ApplicationError> {
        self.geocoder.ensure_configured()?;
        self.static_map.ensure_configured()?;

        let waypoint = async {
            match request.waypoint() {
                Some(address) => Some(self.geocoder.geocode(address).await),
                None => None,
            }
        };
        let (origin, destination, waypoint) = tokio::join!(
            self.geocoder.geocode(request.origin()),
            self.geocoder.geocode(request.destination()),
            waypoint,
        );

        let origin = resolve_endpoint(origin, request.origin())?;
        let destination = resolve_endpoint(destination, request.destination())?;
        let waypoint = match waypoint {
            Some(result) => resolve_waypoint(result)?,
            None => None,
        };

        let markers = MapMarkers {
            origin,
            waypoint,
            destination,
        };
        let points = markers.points();

        let route = self
            .route_fetcher
            .fetch_route(&points, request.preference())
            .await?;

        let path = map_path(&route.geometry, &points, self.static_map.max_path_points());
        let map_url = self.static_map.build_url(&markers, &path);

        info!(
            distance_m = ?route.distance_meters,
            duration_s = ?route.duration_seconds,
            path_points = path.len(),
            "Directions built"
        );

        Ok(RouteResult {
            distance_text: format_distance(route.distance_meters),
            duration_text: format_duration(route.duration_seconds),
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
            geometry: route.geometry,
            polyline: route.encoded_polyline,
            map_url,
            start_address: route
                .start_address
                .unwrap_or_else(|| request.origin().to_string()),
            end_address: route
                .end_address
                .unwrap_or_else(|| request.destination().to_string()),
        })
    }
}

/// Origin and destination must resolve; lookup failures become `AddressNotFound`
fn resolve_endpoint(
    result: Result<Coordinate, ApplicationError>,
    address: &str,
) -> Result<Coordinate, ApplicationError> {
    match result {
        Ok(coordinate) => Ok(coordinate),
        Err(
            e @ (ApplicationError::UpstreamUnavailable(_) | ApplicationError::Configuration(_)),
        ) => Err(e),
        Err(e) => {
            warn!(%address, error = %e, "Endpoint could not be geocoded");
            Err(ApplicationError::AddressNotFound(address.to_string()))
        },
    }
}

/// A waypoint that cannot be resolved is left out of the route
fn resolve_waypoint(
    result: Result<Coordinate, ApplicationError>,
) -> Result<Option<Coordinate>, ApplicationError> {
    match result {
        Ok(coordinate) => Ok(Some(coordinate)),
        Err(
            e @ (ApplicationError::UpstreamUnavailable(_) | ApplicationError::Configuration(_)),
        ) => Err(e),
        Err(e) => {
            warn!(error = %e, "Waypoint could not be geocoded, dropping it");
            Ok(None)
        },
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use domain::{RouteGeometry, RoutePreference};

    use super::*;
    use crate::ports::{MockStaticMapPort, RoutingPort};

    struct StubGeocoder {
        known: HashMap<String, Coordinate>,
        configured: bool,
        down: bool,
    }

    impl StubGeocoder {
        fn with(entries: &[(&str, Coordinate)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(address, coord)| ((*address).to_string(), *coord))
                    .collect(),
                configured: true,
                down: false,
            }
        }
    }

    #[async_trait]
    impl GeocodingPort for StubGeocoder {
        async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError> {
            if self.down {
                return Err(ApplicationError::UpstreamUnavailable("timeout".to_string()));
            }
            self.known
                .get(address)
                .copied()
                .ok_or_else(|| ApplicationError::AddressNotFound(address.to_string()))
        }

        fn ensure_configured(&self) -> Result<(), ApplicationError> {
            if self.configured {
                Ok(())
            } else {
                Err(ApplicationError::Configuration(
                    "YANDEX_GEOCODER_API_KEY is not set".to_string(),
                ))
            }
        }

        fn provider_name(&self) -> &str {
            "stub-geocoder"
        }
    }

    #[derive(Default)]
    struct RecordingRouter {
        route: RouteGeometry,
        calls: AtomicUsize,
        last_points: Mutex<Vec<Coordinate>>,
    }

    #[async_trait]
    impl RoutingPort for RecordingRouter {
        async fn route(
            &self,
            points: &[Coordinate],
            _preference: RoutePreference,
        ) -> Result<RouteGeometry, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_points.lock().unwrap() = points.to_vec();
            Ok(self.route.clone())
        }

        fn provider_name(&self) -> &str {
            "recording"
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(55.7558, 37.6173).unwrap()
    }

    fn waypoint() -> Coordinate {
        Coordinate::new(55.80, 37.50).unwrap()
    }

    fn destination() -> Coordinate {
        Coordinate::new(55.8890, 37.4450).unwrap()
    }

    fn geocoder() -> StubGeocoder {
        StubGeocoder::with(&[
            ("Москва, Красная площадь", origin()),
            ("Москва, Сокол", waypoint()),
            ("Химки", destination()),
        ])
    }

    fn sample_route() -> RouteGeometry {
        RouteGeometry::new(
            Some(18_500.0),
            Some(3700.0),
            vec![origin(), waypoint(), destination()],
        )
    }

    fn static_map() -> MockStaticMapPort {
        let mut map = MockStaticMapPort::new();
        map.expect_ensure_configured().returning(|| Ok(()));
        map.expect_max_path_points().return_const(50usize);
        map.expect_build_url()
            .returning(|_, path| format!("https://maps.test/static?points={}", path.len()));
        map
    }

    fn service(
        geocoder: StubGeocoder,
        router: Arc<RecordingRouter>,
        map: MockStaticMapPort,
    ) -> DirectionsService {
        DirectionsService::new(
            Arc::new(geocoder),
            RouteFetcher::new(vec![router], Duration::from_secs(5)),
            Arc::new(map),
        )
    }

    fn request(waypoint: Option<&str>) -> DirectionsRequest {
        DirectionsRequest::new(
            "Москва, Красная площадь",
            "Химки",
            waypoint,
            RoutePreference::None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn builds_complete_result() {
        let router = Arc::new(RecordingRouter {
            route: sample_route(),
            ..Default::default()
        });
        let service = service(geocoder(), router.clone(), static_map());

        let result = service.directions(&request(None)).await.unwrap();

        assert_eq!(result.distance_text.as_deref(), Some("18.5 км"));
        assert_eq!(result.duration_text.as_deref(), Some("1 ч 2 мин"));
        assert_eq!(result.distance_meters, Some(18_500.0));
        assert_eq!(result.geometry.len(), 3);
        assert_eq!(result.map_url, "https://maps.test/static?points=3");
        assert_eq!(result.start_address, "Москва, Красная площадь");
        assert_eq!(result.end_address, "Химки");
        assert!(result.polyline.is_none());
        assert_eq!(*router.last_points.lock().unwrap(), vec![origin(), destination()]);
    }

    #[tokio::test]
    async fn waypoint_is_routed_in_order() {
        let router = Arc::new(RecordingRouter {
            route: sample_route(),
            ..Default::default()
        });
        let service = service(geocoder(), router.clone(), static_map());

        service
            .directions(&request(Some("Москва, Сокол")))
            .await
            .unwrap();

        assert_eq!(
            *router.last_points.lock().unwrap(),
            vec![origin(), waypoint(), destination()]
        );
    }

    #[tokio::test]
    async fn unknown_waypoint_is_dropped() {
        let router = Arc::new(RecordingRouter {
            route: sample_route(),
            ..Default::default()
        });
        let service = service(geocoder(), router.clone(), static_map());

        let result = service.directions(&request(Some("Нигде"))).await;

        assert!(result.is_ok());
        assert_eq!(
            *router.last_points.lock().unwrap(),
            vec![origin(), destination()]
        );
    }

    #[tokio::test]
    async fn unknown_origin_short_circuits() {
        let router = Arc::new(RecordingRouter::default());
        let mut map = MockStaticMapPort::new();
        map.expect_ensure_configured().returning(|| Ok(()));
        map.expect_build_url().never();
        map.expect_max_path_points().never();
        let service = service(StubGeocoder::with(&[]), router.clone(), map);

        let err = service.directions(&request(None)).await.unwrap_err();

        assert!(matches!(err, ApplicationError::AddressNotFound(_)));
        assert_eq!(router.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_key_fails_before_lookups() {
        let router = Arc::new(RecordingRouter::default());
        let mut geocoder = geocoder();
        geocoder.configured = false;
        let service = service(geocoder, router.clone(), static_map());

        let err = service.directions(&request(None)).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert_eq!(router.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unkeyed_static_map_fails_before_lookups() {
        let router = Arc::new(RecordingRouter::default());
        let mut map = MockStaticMapPort::new();
        map.expect_ensure_configured().returning(|| {
            Err(ApplicationError::Configuration(
                "GOOGLE_MAPS_API_KEY is not set".to_string(),
            ))
        });
        map.expect_build_url().never();
        let service = service(geocoder(), router.clone(), map);

        let err = service.directions(&request(None)).await.unwrap_err();

        assert!(
            matches!(err, ApplicationError::Configuration(msg) if msg.contains("GOOGLE_MAPS_API_KEY"))
        );
        assert_eq!(router.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn geocoder_outage_is_unavailable() {
        let router = Arc::new(RecordingRouter::default());
        let mut geocoder = geocoder();
        geocoder.down = true;
        let service = service(geocoder, router, static_map());

        let err = service.directions(&request(None)).await.unwrap_err();

        assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn provider_addresses_and_polyline_pass_through() {
        let route = sample_route()
            .with_encoded_polyline("_p~iF~ps|U")
            .with_addresses(
                Some("Красная пл., Москва".to_string()),
                Some("Химки, Московская обл.".to_string()),
            );
        let router = Arc::new(RecordingRouter {
            route,
            ..Default::default()
        });
        let service = service(geocoder(), router, static_map());

        let result = service.directions(&request(None)).await.unwrap();

        assert_eq!(result.polyline.as_deref(), Some("_p~iF~ps|U"));
        assert_eq!(result.start_address, "Красная пл., Москва");
        assert_eq!(result.end_address, "Химки, Московская обл.");
    }

    #[tokio::test]
    async fn missing_measurements_leave_text_empty() {
        let router = Arc::new(RecordingRouter {
            route: RouteGeometry::new(None, None, Vec::new()),
            ..Default::default()
        });
        let service = service(geocoder(), router, static_map());

        let result = service.directions(&request(None)).await.unwrap();

        assert!(result.distance_text.is_none());
        assert!(result.duration_text.is_none());
        // Map falls back to the straight line through the request points
        assert_eq!(result.map_url, "https://maps.test/static?points=2");
    }

    #[tokio::test]
    async fn long_geometry_is_simplified_for_map() {
        let geometry: Vec<Coordinate> = (0..500)
            .map(|i| Coordinate::new(55.0, 37.0 + f64::from(i) * 0.001).unwrap())
            .collect();
        let router = Arc::new(RecordingRouter {
            route: RouteGeometry::new(Some(1.0), Some(1.0), geometry),
            ..Default::default()
        });
        let service = service(geocoder(), router, static_map());

        let result = service.directions(&request(None)).await.unwrap();

        assert_eq!(result.geometry.len(), 500);
        assert_eq!(result.map_url, "https://maps.test/static?points=50");
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let router = Arc::new(RecordingRouter {
            route: sample_route(),
            ..Default::default()
        });
        let service = service(geocoder(), router, static_map());
        let req = request(Some("Москва, Сокол"));

        let first = service.directions(&req).await.unwrap();
        let second = service.directions(&req).await.unwrap();

        assert_eq!(first, second);
    }
}

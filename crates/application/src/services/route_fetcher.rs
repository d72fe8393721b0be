//! Route fetching with ordered provider fallback
//!
//! Consults each configured [`RoutingPort`] in priority order and returns the
//! first usable route. A provider that errors, times out or answers without a
//! route is skipped; nothing is retried.

use std::{fmt, sync::Arc, time::Duration};

use domain::{RouteGeometry, RoutePreference, value_objects::Coordinate};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::RoutingPort};

/// Default per-provider attempt timeout in seconds
pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 12;

/// Ordered chain of routing providers
pub struct RouteFetcher {
    providers: Vec<Arc<dyn RoutingPort>>,
    attempt_timeout: Duration,
}

impl fmt::Debug for RouteFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.provider_name()).collect();
        f.debug_struct("RouteFetcher")
            .field("providers", &names)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl RouteFetcher {
    /// Create a fetcher consulting `providers` in the given order
    pub fn new(providers: Vec<Arc<dyn RoutingPort>>, attempt_timeout: Duration) -> Self {
        Self {
            providers,
            attempt_timeout,
        }
    }

    /// Number of configured providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Fetch a route through `points`, falling back across providers
    #[instrument(skip(self, points), fields(points = points.len(), %preference))]
    pub async fn fetch_route(
        &self,
        points: &[Coordinate],
        preference: RoutePreference,
    ) -> Result<RouteGeometry, ApplicationError> {
        if points.len() < 2 {
            return Err(ApplicationError::Validation(
                "a route needs at least two points".to_string(),
            ));
        }

        let mut failures = FallbackFailures::default();

        for provider in &self.providers {
            let name = provider.provider_name();
            debug!(provider = %name, "Requesting route");

            match timeout(self.attempt_timeout, provider.route(points, preference)).await {
                Ok(Ok(route)) => {
                    info!(
                        provider = %name,
                        distance_m = ?route.distance_meters,
                        geometry_points = route.geometry.len(),
                        "Route found"
                    );
                    return Ok(route);
                },
                Ok(Err(e)) if e.allows_fallback() => {
                    warn!(provider = %name, error = %e, "Routing provider failed, trying next");
                    failures.record(e);
                },
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    warn!(
                        provider = %name,
                        timeout_secs = self.attempt_timeout.as_secs(),
                        "Routing provider timed out, trying next"
                    );
                    failures.record(ApplicationError::UpstreamUnavailable(format!(
                        "{name} timed out after {}s",
                        self.attempt_timeout.as_secs()
                    )));
                },
            }
        }

        Err(failures.into_error())
    }
}

/// Summary of why every provider in the chain failed
#[derive(Debug, Default)]
struct FallbackFailures {
    attempts: usize,
    responded_without_route: bool,
    misconfigured: usize,
    last_rejection: Option<ApplicationError>,
}

impl FallbackFailures {
    fn record(&mut self, error: ApplicationError) {
        self.attempts += 1;
        match error {
            ApplicationError::NoRouteFound(_) | ApplicationError::UpstreamMalformed(_) => {
                self.responded_without_route = true;
            },
            ApplicationError::Configuration(_) => self.misconfigured += 1,
            rejected @ ApplicationError::UpstreamRejected { .. } => {
                self.last_rejection = Some(rejected);
            },
            _ => {},
        }
    }

    fn into_error(self) -> ApplicationError {
        if self.attempts == 0 {
            return ApplicationError::Configuration(
                "no routing providers are configured".to_string(),
            );
        }
        if self.responded_without_route {
            return ApplicationError::NoRouteFound(
                "no routing provider returned a usable route".to_string(),
            );
        }
        if let Some(rejection) = self.last_rejection {
            return rejection;
        }
        if self.misconfigured == self.attempts {
            return ApplicationError::Configuration(
                "no routing provider has the credentials it needs".to_string(),
            );
        }
        ApplicationError::UpstreamUnavailable(
            "all routing providers are unreachable".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    enum Behaviour {
        Succeed(RouteGeometry),
        Fail(fn() -> ApplicationError),
        Hang,
    }

    struct StubProvider {
        name: String,
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(name: &str, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RoutingPort for StubProvider {
        async fn route(
            &self,
            _points: &[Coordinate],
            _preference: RoutePreference,
        ) -> Result<RouteGeometry, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Succeed(route) => Ok(route.clone()),
                Behaviour::Fail(make) => Err(make()),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(ApplicationError::Internal("unreachable".to_string()))
                },
            }
        }

        fn provider_name(&self) -> &str {
            &self.name
        }
    }

    fn points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(55.75, 37.61).unwrap(),
            Coordinate::new(55.80, 37.70).unwrap(),
        ]
    }

    fn route(distance: f64) -> RouteGeometry {
        RouteGeometry::new(Some(distance), Some(600.0), points())
    }

    fn unavailable() -> ApplicationError {
        ApplicationError::UpstreamUnavailable("HTTP 500".to_string())
    }

    fn no_route() -> ApplicationError {
        ApplicationError::NoRouteFound("empty routes".to_string())
    }

    fn misconfigured() -> ApplicationError {
        ApplicationError::Configuration("missing key".to_string())
    }

    fn denied() -> ApplicationError {
        ApplicationError::UpstreamRejected {
            status: "REQUEST_DENIED".to_string(),
            message: "bad key".to_string(),
        }
    }

    fn fetcher(providers: Vec<Arc<dyn RoutingPort>>) -> RouteFetcher {
        RouteFetcher::new(providers, Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS))
    }

    #[tokio::test]
    async fn first_success_wins() {
        let first = StubProvider::new("first", Behaviour::Succeed(route(1000.0)));
        let second = StubProvider::new("second", Behaviour::Succeed(route(2000.0)));
        let fetcher = fetcher(vec![first.clone(), second.clone()]);

        let result = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap();

        assert_eq!(result, route(1000.0));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn failing_provider_falls_back_to_next() {
        let first = StubProvider::new("first", Behaviour::Fail(unavailable));
        let second = StubProvider::new("second", Behaviour::Succeed(route(2000.0)));
        let fetcher = fetcher(vec![first.clone(), second.clone()]);

        let result = fetcher
            .fetch_route(&points(), RoutePreference::Fast)
            .await
            .unwrap();

        assert_eq!(result, route(2000.0));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_provider_falls_back_to_next() {
        let first = StubProvider::new("slow", Behaviour::Hang);
        let second = StubProvider::new("fast", Behaviour::Succeed(route(3000.0)));
        let fetcher = RouteFetcher::new(vec![first, second], Duration::from_secs(10));

        let result = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap();

        assert_eq!(result, route(3000.0));
    }

    #[tokio::test]
    async fn all_unreachable_is_unavailable() {
        let fetcher = fetcher(vec![
            StubProvider::new("a", Behaviour::Fail(unavailable)),
            StubProvider::new("b", Behaviour::Fail(unavailable)),
        ]);

        let err = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn answered_without_route_is_no_route() {
        let fetcher = fetcher(vec![
            StubProvider::new("a", Behaviour::Fail(unavailable)),
            StubProvider::new("b", Behaviour::Fail(no_route)),
        ]);

        let err = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NoRouteFound(_)));
    }

    #[tokio::test]
    async fn rejection_surfaces_when_nothing_else_answered() {
        let fetcher = fetcher(vec![StubProvider::new("google", Behaviour::Fail(denied))]);

        let err = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap_err();

        let ApplicationError::UpstreamRejected { status, .. } = err else {
            unreachable!("Expected UpstreamRejected");
        };
        assert_eq!(status, "REQUEST_DENIED");
    }

    #[tokio::test]
    async fn all_misconfigured_is_configuration_error() {
        let fetcher = fetcher(vec![StubProvider::new("google", Behaviour::Fail(misconfigured))]);

        let err = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn empty_chain_is_configuration_error() {
        let err = fetcher(Vec::new())
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn single_point_rejected_without_calls() {
        let provider = StubProvider::new("a", Behaviour::Succeed(route(1.0)));
        let fetcher = fetcher(vec![provider.clone()]);

        let err = fetcher
            .fetch_route(&points()[..1], RoutePreference::None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Validation(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn non_fallback_error_stops_chain() {
        fn internal() -> ApplicationError {
            ApplicationError::Internal("bug".to_string())
        }
        let first = StubProvider::new("a", Behaviour::Fail(internal));
        let second = StubProvider::new("b", Behaviour::Succeed(route(1.0)));
        let fetcher = fetcher(vec![first, second.clone()]);

        let err = fetcher
            .fetch_route(&points(), RoutePreference::None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Internal(_)));
        assert_eq!(second.calls(), 0);
    }

    #[test]
    fn debug_lists_provider_names() {
        let fetcher = fetcher(vec![StubProvider::new("osrm", Behaviour::Fail(unavailable))]);
        let debug = format!("{fetcher:?}");
        assert!(debug.contains("osrm"));
    }
}

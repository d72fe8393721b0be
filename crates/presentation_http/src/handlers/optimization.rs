//! Stop-ordering handler

use axum::{Json, extract::State};
use domain::{Coordinate, StopOrderingRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::{ApiError, MSG_MISSING_STOPS},
    middleware::ValidatedJson,
    state::AppState,
};

/// Point in `{lat, lon}` form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl TryFrom<LatLon> for Coordinate {
    type Error = ApiError;

    fn try_from(point: LatLon) -> Result<Self, Self::Error> {
        Self::new(point.lat, point.lon).map_err(|e| {
            ApiError::bad_request(format!("Некорректные координаты точки: {e}"))
        })
    }
}

impl From<Coordinate> for LatLon {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat: coordinate.latitude(),
            lon: coordinate.longitude(),
        }
    }
}

/// `POST /routes/optimal` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OptimalRouteBody {
    /// Start and end of the tour
    #[serde(default)]
    #[validate(required(message = "Необходимо указать старт и список точек"))]
    pub start: Option<LatLon>,

    /// Stops to visit
    #[serde(default)]
    #[validate(length(min = 1, message = "Необходимо указать старт и список точек"))]
    pub stops: Vec<LatLon>,
}

impl OptimalRouteBody {
    fn into_request(self) -> Result<StopOrderingRequest, ApiError> {
        let start: Coordinate = self
            .start
            .ok_or_else(|| ApiError::bad_request(MSG_MISSING_STOPS))?
            .try_into()?;
        let stops = self
            .stops
            .into_iter()
            .map(Coordinate::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        StopOrderingRequest::new(start, stops).map_err(|_| ApiError::bad_request(MSG_MISSING_STOPS))
    }
}

/// `POST /routes/optimal` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRouteResponse {
    pub optimal_order: Vec<LatLon>,
    /// Closed tour length in kilometers, rounded to two decimals
    pub total_distance_km: f64,
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Order stops to minimise the closed tour from the start
#[instrument(skip(state, body), fields(stops = body.stops.len()))]
pub async fn optimal_route(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<OptimalRouteBody>,
) -> Result<Json<OptimalRouteResponse>, ApiError> {
    let request = body.into_request()?;

    let optimizer = state.stop_ordering;
    if request.stops().len() > optimizer.max_stops() {
        return Err(ApiError::bad_request(format!(
            "Слишком много точек: можно упорядочить не более {}, передано {}.",
            optimizer.max_stops(),
            request.stops().len()
        )));
    }

    let result = tokio::task::spawn_blocking(move || optimizer.solve(&request))
        .await
        .map_err(|e| ApiError::Internal(format!("stop ordering task failed: {e}")))??;

    info!(
        total_distance_km = result.total_distance_km,
        "Stop order computed"
    );

    Ok(Json(OptimalRouteResponse {
        optimal_order: result.order.into_iter().map(LatLon::from).collect(),
        total_distance_km: round_to_cents(result.total_distance_km),
    }))
}

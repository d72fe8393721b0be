//! Driving directions handler

use axum::{Json, extract::State};
use domain::{DirectionsRequest, RoutePreference, RouteResult};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::{ApiError, MSG_MISSING_ENDPOINTS},
    middleware::ValidatedJson,
    state::AppState,
};

/// `POST /directions` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DirectionsBody {
    /// Origin address
    #[serde(default)]
    #[validate(length(min = 1, message = "Необходимо указать точку старта и пункт назначения."))]
    pub start: String,

    /// Destination address
    #[serde(default)]
    #[validate(length(min = 1, message = "Необходимо указать точку старта и пункт назначения."))]
    pub end: String,

    /// Optional intermediate stop
    #[serde(default)]
    pub waypoint: Option<String>,

    /// `avoid_tolls`, `short` or `fast`; anything else means no preference
    #[serde(default)]
    pub preference: RoutePreference,
}

impl DirectionsBody {
    fn into_request(self) -> Result<DirectionsRequest, ApiError> {
        DirectionsRequest::new(
            &self.start,
            &self.end,
            self.waypoint.as_deref(),
            self.preference,
        )
        .map_err(|_| ApiError::bad_request(MSG_MISSING_ENDPOINTS))
    }
}

/// `POST /directions` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub distance_text: Option<String>,
    pub distance_value: Option<f64>,
    pub duration_text: Option<String>,
    pub duration_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    pub map_url: String,
    pub start_address: String,
    pub end_address: String,
}

impl From<RouteResult> for DirectionsResponse {
    fn from(route: RouteResult) -> Self {
        Self {
            distance_text: route.distance_text,
            distance_value: route.distance_meters,
            duration_text: route.duration_text,
            duration_value: route.duration_seconds,
            polyline: route.polyline,
            map_url: route.map_url,
            start_address: route.start_address,
            end_address: route.end_address,
        }
    }
}

/// Build a driving route between two addresses
#[instrument(skip(state, body))]
pub async fn directions(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<DirectionsBody>,
) -> Result<Json<DirectionsResponse>, ApiError> {
    let request = body.into_request()?;
    let route = state.directions.directions(&request).await?;

    info!(
        distance_meters = ?route.distance_meters,
        duration_seconds = ?route.duration_seconds,
        "Directions built"
    );

    Ok(Json(route.into()))
}

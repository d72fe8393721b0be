//! API error handling
//!
//! Every failure leaves the server as `{message}` (plus `status` when an
//! upstream provider reported its own status code), with user-facing text in
//! Russian.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Origin or destination missing from a directions request
pub const MSG_MISSING_ENDPOINTS: &str = "Необходимо указать точку старта и пункт назначения.";
/// Origin or destination could not be geocoded
pub const MSG_ADDRESS_NOT_FOUND: &str =
    "Не удалось определить координаты старта или финиша по адресу.";
/// No provider produced a route
pub const MSG_NO_ROUTE: &str = "Маршрут не найден или сервис построения временно недоступен.";
/// Every provider was unreachable
pub const MSG_UPSTREAM_UNAVAILABLE: &str =
    "Не удалось связаться с сервисом карт. Проверьте соединение.";
/// Provider refused the request without its own message
pub const MSG_UPSTREAM_REJECTED: &str = "Сервис карт вернул ошибку. Проверьте параметры запроса.";
/// Stop-ordering request without a start or stops
pub const MSG_MISSING_STOPS: &str = "Необходимо указать старт и список точек";
/// Catch-all for unexpected failures
pub const MSG_INTERNAL: &str = "Внутренняя ошибка сервера.";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        status: Option<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 400 with a plain message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            status: None,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub message: String,
    /// Upstream provider status code, e.g. `REQUEST_DENIED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message, status) = match self {
            Self::BadRequest { message, status } => (StatusCode::BAD_REQUEST, message, status),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            Self::ServiceUnavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message, None),
            Self::Internal(detail) => {
                error!(error = %detail, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string(), None)
            },
        };

        (code, Json(ErrorResponse { message, status })).into_response()
    }
}

/// Message for a missing credential, e.g. `YANDEX_GEOCODER_API_KEY не задан. …`
fn missing_setting_message(detail: &str) -> String {
    detail.strip_suffix(" is not set").map_or_else(
        || "Сервис карт не настроен. Проверьте конфигурацию и перезапустите сервис.".to_string(),
        |setting| {
            format!(
                "{setting} не задан. Установите ключ в переменной окружения и перезапустите сервис."
            )
        },
    )
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Configuration(detail) => {
                warn!(%detail, "Provider not configured");
                Self::ServiceUnavailable(missing_setting_message(&detail))
            },
            ApplicationError::Validation(msg) | ApplicationError::InvalidInput(msg) => {
                Self::bad_request(msg)
            },
            ApplicationError::Domain(e) => Self::bad_request(e.to_string()),
            ApplicationError::AddressNotFound(_) | ApplicationError::UpstreamMalformed(_) => {
                Self::bad_request(MSG_ADDRESS_NOT_FOUND)
            },
            ApplicationError::UpstreamRejected { status, message } => Self::BadRequest {
                message: if message.trim().is_empty() {
                    MSG_UPSTREAM_REJECTED.to_string()
                } else {
                    message
                },
                status: Some(status),
            },
            ApplicationError::NoRouteFound(_) => Self::NotFound(MSG_NO_ROUTE.to_string()),
            ApplicationError::UpstreamUnavailable(detail) => {
                warn!(%detail, "Map providers unreachable");
                Self::ServiceUnavailable(MSG_UPSTREAM_UNAVAILABLE.to_string())
            },
            ApplicationError::Internal(detail) => Self::Internal(detail),
        }
    }
}

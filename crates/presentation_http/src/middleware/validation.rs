//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::JsonError(e) => format!("Некорректный JSON в теле запроса: {}", e.body_text()),
            Self::ValidationFailed(msg) => msg,
        };

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                message,
                status: None,
            }),
        )
            .into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// Field messages are reported without field names, sorted and
/// de-duplicated, so two fields sharing one message produce it once.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct MyRequest {
///     #[validate(length(min = 1, message = "Укажите адрес"))]
///     address: String,
/// }
///
/// async fn handler(ValidatedJson(req): ValidatedJson<MyRequest>) {}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| {
            let mut messages: Vec<String> = e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        error.message.as_ref().map_or_else(
                            || format!("{field}: {}", error.code),
                            ToString::to_string,
                        )
                    })
                })
                .collect();
            messages.sort();
            messages.dedup();

            ValidationError::ValidationFailed(messages.join("; "))
        })?;

        Ok(Self(value))
    }
}

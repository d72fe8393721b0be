//! Shared HTTP plumbing for the provider clients

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::MapsError;

const USER_AGENT: &str = "FleetRoute/1.0 (https://github.com/twohreichel/FleetRoute)";

/// Build a pooled client with a per-request timeout
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, MapsError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| MapsError::ConnectionFailed(e.to_string()))
}

/// Raw answer of a single provider call
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Send the request once and read the whole body
pub(crate) async fn send(
    request: RequestBuilder,
    timeout_secs: u64,
) -> Result<RawResponse, MapsError> {
    let response = request
        .send()
        .await
        .map_err(|e| MapsError::from_reqwest(&e, timeout_secs))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| MapsError::from_reqwest(&e, timeout_secs))?;

    Ok(RawResponse { status, body })
}

/// Send the request once and decode a successful JSON body
///
/// A 4xx answer is a refusal of this request (bad key, quota, bad query);
/// any other non-success status counts as a provider failure.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout_secs: u64,
) -> Result<T, MapsError> {
    let raw = send(request, timeout_secs).await?;
    if !raw.status.is_success() {
        return Err(status_error(raw.status));
    }
    parse_json(&raw.body)
}

fn status_error(status: StatusCode) -> MapsError {
    if status.is_client_error() {
        MapsError::Rejected {
            status: format!("HTTP {}", status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("request refused")
                .to_string(),
        }
    } else {
        MapsError::RequestFailed(format!("HTTP {status}"))
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, MapsError> {
    serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))
}

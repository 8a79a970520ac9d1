//! Authenticated HTTP client for the Cloudbeds API (v1.3).
//!
//! The client performs exactly one attempt per call. Retry policy, if any,
//! belongs to the caller: auth and rate-limit problems are actionable by the
//! user, so they are surfaced as typed errors rather than retried blindly.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Production API base. Tests point the client at a local mock instead.
pub const API_BASE_URL: &str = "https://api.cloudbeds.com/api/v1.3";

pub const ALLOTMENT_BLOCKS_ENDPOINT: &str = "getAllotmentBlocks";
pub const RESERVATIONS_ENDPOINT: &str = "getReservations";
pub const RESERVATION_DETAIL_ENDPOINT: &str = "getReservation";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API credentials resolved from the local config store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Static API key sent as the `x-api-key` header.
    pub api_key: String,
    /// Cloudbeds property identifier, sent as the `propertyID` query param.
    pub property_id: String,
}

/// Fixed failure taxonomy for vendor API calls.
///
/// Display strings are user-facing and rendered verbatim by the UI.
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Authentication failed. Please check your API key.")]
    Unauthorized,
    #[error("Access forbidden. Please check your API permissions.")]
    Forbidden,
    #[error("Rate limit exceeded. Please try again in a few minutes.")]
    RateLimited,
    /// Any other non-200 status. `message` comes from the body's JSON
    /// `"message"` field when the body parses, else the raw body text.
    #[error("API Error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Request timed out. Please check your internet connection.")]
    Timeout,
    #[error("Connection error. Please check your internet connection.")]
    Connection,
    #[error("Connection error: {message}")]
    Unknown { message: String },
}

/// Cloudbeds API client.
pub struct CloudbedsClient {
    http: reqwest::Client,
    base_url: String,
}

impl CloudbedsClient {
    /// Create a client against the production API base.
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against an arbitrary base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Issue one authenticated GET against `endpoint` and classify the outcome.
    ///
    /// HTTP 200 yields the parsed JSON body; everything else maps onto the
    /// [`ApiClientError`] taxonomy. No retries are performed here.
    pub async fn call(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        credentials: &Credentials,
    ) -> Result<Value, ApiClientError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &credentials.api_key)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .query(params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "cloudbeds api call");

        match status {
            StatusCode::OK => response.json().await.map_err(map_transport_error),
            StatusCode::UNAUTHORIZED => Err(ApiClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiClientError::Forbidden),
            StatusCode::TOO_MANY_REQUESTS => Err(ApiClientError::RateLimited),
            other => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiClientError::Api {
                    status: other.as_u16(),
                    message: extract_error_message(&body),
                })
            }
        }
    }

    /// Fetch all allotment blocks overlapping the given date window.
    pub async fn get_allotment_blocks(
        &self,
        credentials: &Credentials,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Value>, ApiClientError> {
        let body = self
            .call(
                ALLOTMENT_BLOCKS_ENDPOINT,
                &[
                    ("propertyID", credentials.property_id.as_str()),
                    ("startDate", start_date),
                    ("endDate", end_date),
                ],
                credentials,
            )
            .await?;
        Ok(data_array(body))
    }

    /// Fetch reservations with check-in inside the given window, including
    /// guest details.
    pub async fn get_reservations(
        &self,
        credentials: &Credentials,
        check_in_from: &str,
        check_in_to: &str,
    ) -> Result<Vec<Value>, ApiClientError> {
        let body = self
            .call(
                RESERVATIONS_ENDPOINT,
                &[
                    ("propertyID", credentials.property_id.as_str()),
                    ("checkInFrom", check_in_from),
                    ("checkInTo", check_in_to),
                    ("includeGuestsDetails", "true"),
                ],
                credentials,
            )
            .await?;
        Ok(data_array(body))
    }

    /// Fetch the detail record for one reservation. Returns `Value::Null`
    /// when the response carries no `data` object.
    pub async fn get_reservation(
        &self,
        credentials: &Credentials,
        reservation_id: &str,
    ) -> Result<Value, ApiClientError> {
        let body = self
            .call(
                RESERVATION_DETAIL_ENDPOINT,
                &[
                    ("propertyID", credentials.property_id.as_str()),
                    ("reservationID", reservation_id),
                ],
                credentials,
            )
            .await?;
        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiClientError {
    if err.is_timeout() {
        ApiClientError::Timeout
    } else if err.is_connect() {
        ApiClientError::Connection
    } else {
        ApiClientError::Unknown {
            message: err.to_string(),
        }
    }
}

/// Pull the vendor's `"message"` field out of an error body, falling back to
/// the raw text when the body is not JSON.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Unwrap the `{"data": [...]}` envelope. An absent or wrong-typed envelope
/// degrades to an empty list rather than an error.
fn data_array(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one frontend call: parse the request, talk to
//! the Cloudbeds client and the report pipeline, wrap the result in the
//! success/error envelope.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::dto::{
    Envelope, HealthResponse, ReportQuery, ReservationsQuery, SaveSettingsRequest,
    SettingsResponse, TestConnectionData, TestConnectionQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::Report;
use crate::cloudbeds::Credentials;
use crate::config::AppConfig;
use crate::report::generate_group_report;

/// Result type for handlers: envelope on success, envelope via `AppError` on
/// failure, HTTP 200 either way.
pub type HandlerResult<T> = Result<Json<Envelope<T>>, AppError>;

const DEFAULT_REPORT_START: &str = "2025-01-01";
const DEFAULT_REPORT_END: &str = "2025-12-31";

fn iso_date(offset_days: i64) -> String {
    (Utc::now() + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Resolve credentials from the config store, rejecting blank API keys.
fn require_credentials(state: &AppState) -> Result<Credentials, AppError> {
    let config = state.config.load();
    if !config.has_api_key() {
        return Err(AppError::MissingCredentials(
            "API credentials not configured. Please check settings.".to_string(),
        ));
    }
    Ok(config.credentials())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.config.load();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        credentials_configured: config.has_api_key(),
    })
}

// =============================================================================
// Group Allotment Report
// =============================================================================

/// GET /api/group-allotment-report?start_date&end_date
///
/// Fetches all allotment blocks in the window and runs the full
/// normalize/aggregate pipeline. Dates are opaque ISO strings passed through
/// to the vendor and echoed into the report.
pub async fn group_allotment_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> HandlerResult<Report> {
    let credentials = require_credentials(&state)?;

    let start_date = query
        .start_date
        .unwrap_or_else(|| DEFAULT_REPORT_START.to_string());
    let end_date = query
        .end_date
        .unwrap_or_else(|| DEFAULT_REPORT_END.to_string());

    info!(%start_date, %end_date, "fetching group allotment report");

    let raw_blocks = state
        .client
        .get_allotment_blocks(&credentials, &start_date, &end_date)
        .await
        .map_err(|e| AppError::upstream("Failed to fetch allotment blocks", e))?;

    info!(block_count = raw_blocks.len(), "allotment blocks fetched");

    let report = generate_group_report(&raw_blocks, &start_date, &end_date);

    info!(group_count = report.groups.len(), "report generated");

    Ok(Json(Envelope::ok(report)))
}

// =============================================================================
// Reservations
// =============================================================================

/// GET /api/reservations?allotmentBlockCode=
///
/// Lists reservations attached to one allotment block over a +/- 90 day
/// check-in window, each enriched with the detail endpoint. A failed detail
/// fetch keeps the bare reservation rather than dropping it.
pub async fn reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationsQuery>,
) -> HandlerResult<Vec<Value>> {
    let Some(block_code) = query.allotment_block_code.filter(|c| !c.is_empty()) else {
        return Err(AppError::BadRequest(
            "allotmentBlockCode parameter is required".to_string(),
        ));
    };
    let credentials = require_credentials(&state)?;

    let check_in_from = iso_date(-90);
    let check_in_to = iso_date(90);

    let all_reservations = state
        .client
        .get_reservations(&credentials, &check_in_from, &check_in_to)
        .await
        .map_err(|e| AppError::upstream("Failed to fetch reservations", e))?;

    let matching: Vec<&Value> = all_reservations
        .iter()
        .filter(|r| {
            r.get("allotmentBlockCode").and_then(Value::as_str) == Some(block_code.as_str())
        })
        .collect();

    info!(
        block_code = %block_code,
        total = all_reservations.len(),
        matching = matching.len(),
        "filtered reservations for allotment block"
    );

    let mut detailed = Vec::with_capacity(matching.len());
    for reservation in matching {
        let Some(reservation_id) =
            crate::report::normalize::lenient_string(reservation.get("reservationID"))
        else {
            detailed.push(reservation.clone());
            continue;
        };

        match state
            .client
            .get_reservation(&credentials, &reservation_id)
            .await
        {
            Ok(detail) if detail.is_object() => {
                detailed.push(merge_objects(reservation, &detail));
            }
            Ok(_) => detailed.push(reservation.clone()),
            Err(e) => {
                warn!(%reservation_id, error = %e, "failed to fetch reservation details");
                detailed.push(reservation.clone());
            }
        }
    }

    Ok(Json(Envelope::ok(detailed)))
}

/// Overlay `detail`'s fields onto `base`. Non-object inputs fall back to the
/// base record untouched.
fn merge_objects(base: &Value, detail: &Value) -> Value {
    match (base.as_object(), detail.as_object()) {
        (Some(b), Some(d)) => {
            let mut merged = b.clone();
            for (key, value) in d {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => base.clone(),
    }
}

// =============================================================================
// Connection Test
// =============================================================================

/// GET /api/test-connection?api_key&property_id
///
/// Probes the allotment-blocks endpoint over a -30/+60 day window. Form
/// parameters, when both present, override the saved credentials so the
/// settings page can test before saving.
pub async fn test_connection(
    State(state): State<AppState>,
    Query(query): Query<TestConnectionQuery>,
) -> HandlerResult<TestConnectionData> {
    let credentials = match (query.api_key, query.property_id) {
        (Some(api_key), Some(property_id)) => Credentials {
            api_key: api_key.trim().to_string(),
            property_id: property_id.trim().to_string(),
        },
        _ => state.config.load().credentials(),
    };

    if credentials.api_key.trim().is_empty() {
        return Err(AppError::MissingCredentials(
            "Please configure your API credentials first.".to_string(),
        ));
    }
    if credentials.property_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please provide a valid Property ID.".to_string(),
        ));
    }

    let start_date = iso_date(-30);
    let end_date = iso_date(60);

    let blocks = state
        .client
        .get_allotment_blocks(&credentials, &start_date, &end_date)
        .await
        .map_err(AppError::Vendor)?;

    let blocks_found = blocks.len();
    let message = if blocks_found > 0 {
        format!(
            "Connection successful! Found {} allotment blocks in your property.",
            blocks_found
        )
    } else {
        "Connection successful! No allotment blocks found in the test period, but API access is working."
            .to_string()
    };

    Ok(Json(Envelope::ok(TestConnectionData {
        message,
        property_id: credentials.property_id,
        blocks_found,
        date_range: format!("{} to {}", start_date, end_date),
    })))
}

// =============================================================================
// Settings
// =============================================================================

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> HandlerResult<SettingsResponse> {
    let config = state.config.load();
    Ok(Json(Envelope::ok(settings_response(&config))))
}

/// POST /api/settings
pub async fn save_settings(
    State(state): State<AppState>,
    Json(request): Json<SaveSettingsRequest>,
) -> HandlerResult<SettingsResponse> {
    let property_id = request.property_id.trim();
    let config = AppConfig {
        api_key: request.api_key.trim().to_string(),
        property_id: if property_id.is_empty() {
            "6000".to_string()
        } else {
            property_id.to_string()
        },
    };

    state.config.save(&config)?;
    info!(path = %state.config.path().display(), "configuration saved");

    Ok(Json(Envelope::ok(settings_response(&config))))
}

fn settings_response(config: &AppConfig) -> SettingsResponse {
    SettingsResponse {
        api_key_masked: mask_key(&config.api_key),
        property_id: config.property_id.clone(),
        configured: config.has_api_key(),
    }
}

/// Mask an API key down to its last four characters.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        "*".repeat(chars.len())
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

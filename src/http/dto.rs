//! Data Transfer Objects for the HTTP API.
//!
//! The report value objects in [`crate::api`] already derive
//! Serialize/Deserialize and go over the wire as-is; this module adds the
//! response envelope, query types, and settings DTOs.

use serde::{Deserialize, Serialize};

pub use crate::api::Report;

/// Uniform response envelope for business routes.
///
/// Always serialized with HTTP 200; `success` tells the frontend which of
/// `data`/`error` is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether an API key is present in the local config.
    pub credentials_configured: bool,
}

/// Query parameters for the group allotment report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Query parameters for the reservations route. The parameter name follows
/// the vendor's camelCase spelling, which the frontend passes through.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReservationsQuery {
    #[serde(default, rename = "allotmentBlockCode")]
    pub allotment_block_code: Option<String>,
}

/// Query parameters for the connection test. When both fields are present
/// the probe uses them instead of the saved credentials, so the settings
/// page can test before saving.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TestConnectionQuery {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub property_id: Option<String>,
}

/// Successful connection-test payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConnectionData {
    pub message: String,
    pub property_id: String,
    pub blocks_found: usize,
    pub date_range: String,
}

/// Stored settings as returned to the UI. The API key is masked; only its
/// tail is shown so the user can recognize which key is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub api_key_masked: String,
    pub property_id: String,
    pub configured: bool,
}

/// Request body for saving settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub property_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ok_omits_error_field() {
        let value = serde_json::to_value(Envelope::ok(42)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_envelope_err_omits_data_field() {
        let value = serde_json::to_value(Envelope::<()>::err("nope")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "nope");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_reservations_query_uses_vendor_spelling() {
        let q: ReservationsQuery =
            serde_json::from_str(r#"{"allotmentBlockCode": "GRP-1"}"#).unwrap();
        assert_eq!(q.allotment_block_code.as_deref(), Some("GRP-1"));
    }
}

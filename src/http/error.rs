//! HTTP error handling and response types.
//!
//! Business failures are rendered as the frontend envelope with HTTP 200,
//! matching the contract of the original app: the UI switches on the
//! `success` flag, not the status code.

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use super::dto::Envelope;
use crate::cloudbeds::ApiClientError;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid or missing request parameter.
    BadRequest(String),
    /// Credentials absent or blank in the local config.
    MissingCredentials(String),
    /// Vendor API call failed; the classified message goes out as-is.
    Vendor(ApiClientError),
    /// Vendor API call failed; `context` says which fetch.
    Upstream {
        context: String,
        source: ApiClientError,
    },
    /// Anything else (config persistence, serialization).
    Internal(String),
}

impl AppError {
    pub fn upstream(context: impl Into<String>, source: ApiClientError) -> Self {
        AppError::Upstream {
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::MissingCredentials(msg) => msg,
            AppError::Vendor(source) => source.to_string(),
            AppError::Upstream { context, source } => format!("{}: {}", context, source),
            AppError::Internal(msg) => msg,
        };
        Json(Envelope::<()>::err(message)).into_response()
    }
}

impl From<ApiClientError> for AppError {
    fn from(err: ApiClientError) -> Self {
        AppError::Vendor(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

//! HTTP server module.
//!
//! Axum-based REST layer consumed by the local web UI. Handlers parse the
//! request, delegate to the report pipeline and the Cloudbeds client, and
//! wrap every business response in the `{"success": ...}` envelope the
//! frontend expects. No report state lives here: each request builds its
//! report fresh from the vendor API.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

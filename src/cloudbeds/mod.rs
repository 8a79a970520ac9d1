//! Cloudbeds vendor API access.
//!
//! One authenticated GET per logical fetch, no retries. Every transport and
//! HTTP failure maps onto the fixed [`ApiClientError`] taxonomy so callers can
//! render a user-facing message instead of seeing a raw transport error.

pub mod client;

pub use client::{ApiClientError, CloudbedsClient, Credentials};

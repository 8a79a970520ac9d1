//! # Allotment Report Backend
//!
//! Backend for the group allotment report: fetches hotel allotment-block data
//! from the Cloudbeds REST API, reshapes the nested vendor payloads into a
//! grouped per-date/per-room-type report, and exposes the result through a
//! small REST API consumed by the local web UI.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Report value objects serialized to the frontend
//! - [`cloudbeds`]: Authenticated client for the vendor API
//! - [`report`]: Normalization and aggregation pipeline
//! - [`config`]: Local credentials store
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Error handling
//!
//! Two tiers, deliberately asymmetric. Transport and HTTP failures from the
//! vendor API are classified into a fixed taxonomy and returned as data
//! ([`cloudbeds::ApiClientError`]) so the UI can render an actionable message.
//! The transform pipeline never fails: malformed or missing vendor fields
//! degrade to documented defaults or skip the affected entry, so one bad
//! record cannot abort a report covering hundreds of valid ones.

pub mod api;

pub mod cloudbeds;

pub mod config;

pub mod report;

#[cfg(feature = "http-server")]
pub mod http;

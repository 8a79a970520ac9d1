//! Report transform pipeline.
//!
//! Two stages: [`normalize::normalize_block`] turns one raw vendor block
//! (block -> interval list -> room-type map -> availability-by-date map) into
//! a flat per-date/per-room-type structure, and
//! [`aggregate::generate_group_report`] buckets normalized blocks by sales
//! group and computes the report totals.
//!
//! Both stages are total functions over `serde_json::Value`: malformed vendor
//! data degrades to defaults or skips the affected entry, never an error. A
//! report covering hundreds of valid records must not abort over one noisy
//! one.

pub mod aggregate;
pub mod normalize;

pub use aggregate::generate_group_report;
pub use normalize::normalize_block;

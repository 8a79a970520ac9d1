//! Public API surface for the report backend.
//!
//! This file consolidates the value objects that make up a group allotment
//! report. All types derive Serialize/Deserialize for JSON serialization and
//! are constructed fresh per report request; nothing here is shared across
//! requests.

use serde::{Deserialize, Serialize};

/// Fallback block name when the vendor omits `allotmentBlockName`.
pub const UNKNOWN_ALLOTMENT_NAME: &str = "Unknown Allotment";

/// Fallback group name when neither `groupName` nor `groupCode` is present.
pub const UNKNOWN_GROUP_NAME: &str = "Unknown Group";

/// Fallback group code when neither `groupCode` nor `groupName` is present.
pub const UNKNOWN_GROUP_CODE: &str = "Unknown Code";

/// Per-date, per-room-type inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDateEntry {
    /// Vendor room-type identifier (compared as a string).
    pub room_type_id: String,
    /// Rooms set aside for the block on this date. Always >= 1 for retained
    /// entries; zero-allotted entries are skipped during normalization.
    pub block_allotted: i64,
    /// Confirmed rooms: the explicit vendor value when present, otherwise
    /// `block_allotted - block_remaining`.
    pub block_confirmed: i64,
    /// Unconfirmed rooms still held.
    pub block_remaining: i64,
    /// `block_confirmed / block_allotted` as a percentage, rounded to one
    /// decimal. Zero when nothing is allotted.
    pub pickup_percentage: f64,
    /// Nightly rate for this room type on this date.
    pub rate: f64,
}

/// All room-type entries for a single date, sorted by `room_type_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateBucket {
    /// ISO `YYYY-MM-DD` date string, taken verbatim from the vendor payload.
    pub date: String,
    pub room_types: Vec<RoomDateEntry>,
}

/// One allotment block after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBlock {
    pub id: Option<String>,
    pub code: Option<String>,
    /// Block name, falling back to [`UNKNOWN_ALLOTMENT_NAME`].
    pub name: String,
    pub status: Option<String>,
    /// Date buckets sorted ascending by date.
    pub dates_data: Vec<DateBucket>,
    /// Sum of `block_allotted * rate` over every retained room-date entry.
    /// A ceiling estimate: confirmation status is ignored.
    pub forecasted_revenue: f64,
}

impl NormalizedBlock {
    /// The minimal fallback shape: identity fields only, no date detail, zero
    /// revenue. Used when a block's interval data is missing or unusable so
    /// the block still appears in the report.
    pub fn minimal(
        id: Option<String>,
        code: Option<String>,
        name: String,
        status: Option<String>,
    ) -> Self {
        Self {
            id,
            code,
            name,
            status,
            dates_data: Vec::new(),
            forecasted_revenue: 0.0,
        }
    }
}

/// A sales group and the allotment blocks assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub code: String,
    pub name: String,
    /// Combined label shown in the UI: `"{name} ({code})"`.
    pub display_name: String,
    /// Blocks in the order they appeared in the vendor response.
    pub allotment_blocks: Vec<NormalizedBlock>,
    pub total_blocks: usize,
    pub total_forecasted_revenue: f64,
}

/// The report's requested date window. Opaque ISO strings echoed from the
/// request; the core never parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// Roll-up totals across all groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_groups: usize,
    pub total_allotment_blocks: usize,
    pub total_forecasted_revenue: f64,
}

/// Complete group allotment report as served to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub date_range: DateRange,
    pub summary: ReportSummary,
    /// Groups sorted ascending by name.
    pub groups: Vec<Group>,
}

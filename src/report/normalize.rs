//! Allotment-block normalization.
//!
//! The vendor payload is deeply nested and inconsistently populated: any
//! field may be absent, null, or wrong-typed, and numeric fields arrive as
//! either JSON numbers or numeric strings. The accessors here treat "wrong
//! type at this key" the same as "absent" at every nesting level, so a single
//! malformed entry skips that entry instead of failing the block.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::api::{DateBucket, NormalizedBlock, RoomDateEntry, UNKNOWN_ALLOTMENT_NAME};

/// Normalize one raw allotment block. Total: never fails.
///
/// When the block carries no usable interval data the identity fields are
/// still extracted and the block degrades to the minimal shape (empty
/// `dates_data`, zero revenue) so it is never dropped from the report.
pub fn normalize_block(raw: &Value) -> NormalizedBlock {
    let id = lenient_string(raw.get("allotmentBlockId"));
    let code = lenient_string(raw.get("allotmentBlockCode"));
    let name = lenient_string(raw.get("allotmentBlockName"))
        .unwrap_or_else(|| UNKNOWN_ALLOTMENT_NAME.to_string());
    let status = lenient_string(raw.get("allotmentBlockStatus"));

    match collect_dates(raw) {
        Some((dates_data, forecasted_revenue)) => NormalizedBlock {
            id,
            code,
            name,
            status,
            dates_data,
            forecasted_revenue,
        },
        None => {
            debug!(block_id = ?id, "no allotment intervals found for block");
            NormalizedBlock::minimal(id, code, name, status)
        }
    }
}

/// Walk the interval list and build the per-date detail.
///
/// `None` when `allotmentIntervals` is absent or not an array; the caller
/// substitutes the minimal fallback. Everything below that level degrades
/// per entry instead.
fn collect_dates(raw: &Value) -> Option<(Vec<DateBucket>, f64)> {
    let intervals = raw.get("allotmentIntervals")?.as_array()?;

    // Keyed accumulator instead of relying on source-map iteration order.
    let mut dates: BTreeMap<String, Vec<RoomDateEntry>> = BTreeMap::new();
    let mut revenue = 0.0;

    for interval in intervals {
        let Some(rooms) = interval.as_object() else {
            debug!("skipping non-object interval entry");
            continue;
        };

        for (room_type_id, room_data) in rooms {
            let Some(room) = room_data.as_object().filter(|m| !m.is_empty()) else {
                continue;
            };
            let Some(availability) = room.get("availability").and_then(Value::as_object) else {
                continue;
            };

            for (date, record) in availability {
                let Some(record) = record.as_object().filter(|m| !m.is_empty()) else {
                    continue;
                };
                if let Some(entry) = build_entry(room_type_id, record) {
                    revenue += entry.block_allotted as f64 * entry.rate;
                    dates.entry(date.clone()).or_default().push(entry);
                } else {
                    debug!(%room_type_id, %date, "skipping unusable room-date record");
                }
            }
        }
    }

    // BTreeMap iterates dates in ascending (ISO lexicographic) order already;
    // room entries within a date still need sorting.
    let dates_data = dates
        .into_iter()
        .map(|(date, mut room_types)| {
            room_types.sort_by(|a, b| a.room_type_id.cmp(&b.room_type_id));
            DateBucket { date, room_types }
        })
        .collect();

    Some((dates_data, revenue))
}

/// Build one room-date entry, or `None` when the record contributes nothing:
/// `blockAllotted` absent/falsy/non-positive, or a present numeric field that
/// does not parse.
fn build_entry(
    room_type_id: &str,
    record: &serde_json::Map<String, Value>,
) -> Option<RoomDateEntry> {
    let block_allotted = lenient_int(record.get("blockAllotted")?)?;
    if block_allotted <= 0 {
        return None;
    }

    let block_remaining = match record.get("blockRemaining") {
        None | Some(Value::Null) => 0,
        Some(v) => lenient_int(v)?,
    };

    // Explicit confirmed count wins; otherwise derive it from what is left.
    let block_confirmed = match record.get("blockConfirmed") {
        None | Some(Value::Null) => block_allotted - block_remaining,
        Some(v) => lenient_int(v)?,
    };

    let pickup_percentage = round1(block_confirmed as f64 / block_allotted as f64 * 100.0)
        .clamp(0.0, 100.0);

    let rate = match record.get("rate") {
        None | Some(Value::Null) => 0.0,
        Some(v) => lenient_float(v)?,
    };

    Some(RoomDateEntry {
        room_type_id: room_type_id.to_string(),
        block_allotted,
        block_confirmed,
        block_remaining,
        pickup_percentage,
        rate,
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// String-ish extraction: strings pass through, numbers are rendered, any
/// other type counts as absent.
pub(crate) fn lenient_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer extraction tolerating numeric strings. Fractional JSON numbers
/// truncate toward zero; anything else counts as absent.
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Float extraction tolerating numeric strings.
fn lenient_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

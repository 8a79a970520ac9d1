//! Group aggregation across allotment blocks.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::api::{
    DateRange, Group, Report, ReportSummary, UNKNOWN_GROUP_CODE, UNKNOWN_GROUP_NAME,
};

use super::normalize::{lenient_string, normalize_block};

/// Build the complete group allotment report from raw vendor blocks.
///
/// `start_date`/`end_date` are opaque ISO strings echoed into
/// `Report.date_range`; they are never parsed here. The whole pass is a
/// single sequential walk over `raw_blocks` with no shared state, so
/// concurrent report requests cannot interfere.
pub fn generate_group_report(raw_blocks: &[Value], start_date: &str, end_date: &str) -> Report {
    debug!(block_count = raw_blocks.len(), "building group allotment report");

    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for raw in raw_blocks {
        let (group_name, group_code) = grouping_key(raw);

        // First-seen name/code define the group's display identity for every
        // later block sharing the key.
        let idx = *index
            .entry((group_name.clone(), group_code.clone()))
            .or_insert_with(|| {
                groups.push(Group {
                    code: group_code.clone(),
                    name: group_name.clone(),
                    display_name: format!("{} ({})", group_name, group_code),
                    allotment_blocks: Vec::new(),
                    total_blocks: 0,
                    total_forecasted_revenue: 0.0,
                });
                groups.len() - 1
            });

        let block = normalize_block(raw);
        let group = &mut groups[idx];
        group.total_blocks += 1;
        group.total_forecasted_revenue += block.forecasted_revenue;
        group.allotment_blocks.push(block);
    }

    // Stable sort: groups with equal names keep first-seen order.
    groups.sort_by(|a, b| a.name.cmp(&b.name));

    let summary = ReportSummary {
        total_groups: groups.len(),
        total_allotment_blocks: groups.iter().map(|g| g.total_blocks).sum(),
        total_forecasted_revenue: groups.iter().map(|g| g.total_forecasted_revenue).sum(),
    };

    Report {
        date_range: DateRange {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        },
        summary,
        groups,
    }
}

/// Derive the grouping key with cross-fallbacks: name falls back to the code,
/// code falls back to the name, and fixed sentinels cover blocks with
/// neither. Empty strings count as absent; the vendor sends "" for
/// unassigned groups.
fn grouping_key(raw: &Value) -> (String, String) {
    let name = group_field(raw, "groupName");
    let code = group_field(raw, "groupCode");

    let group_name = name
        .clone()
        .or_else(|| code.clone())
        .unwrap_or_else(|| UNKNOWN_GROUP_NAME.to_string());
    let group_code = code
        .or(name)
        .unwrap_or_else(|| UNKNOWN_GROUP_CODE.to_string());

    (group_name, group_code)
}

fn group_field(raw: &Value, key: &str) -> Option<String> {
    lenient_string(raw.get(key)).filter(|s| !s.is_empty())
}

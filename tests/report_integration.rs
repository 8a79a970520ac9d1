//! End-to-end tests for the report pipeline.
//!
//! These exercise realistic multi-block vendor payloads through the full
//! normalize/aggregate stack, validating the report structure the frontend
//! renders.

use serde_json::{json, Value};

use allotment_report::report::{generate_group_report, normalize_block};

/// A realistic vendor response: two groups, one block with two room types
/// over three dates, one sharing a group, one with no group metadata, and
/// one with a broken interval payload.
fn sample_blocks() -> Vec<Value> {
    vec![
        json!({
            "allotmentBlockId": "12001",
            "allotmentBlockCode": "CONF-2025",
            "allotmentBlockName": "Tech Conference",
            "allotmentBlockStatus": "confirmed",
            "groupName": "Conferences",
            "groupCode": "CONF",
            "allotmentIntervals": [
                {
                    "STD": {
                        "availability": {
                            "2025-06-02": {"blockAllotted": 20, "blockRemaining": 5, "rate": 120.0},
                            "2025-06-01": {"blockAllotted": 20, "blockRemaining": 8, "rate": 120.0}
                        }
                    },
                    "DLX": {
                        "availability": {
                            "2025-06-01": {"blockAllotted": 5, "blockRemaining": 1, "blockConfirmed": 3, "rate": "199.50"}
                        }
                    }
                }
            ]
        }),
        json!({
            "allotmentBlockId": "12002",
            "allotmentBlockCode": "CONF-OVFL",
            "allotmentBlockName": "Conference Overflow",
            "allotmentBlockStatus": "tentative",
            "groupName": "Conferences",
            "groupCode": "CONF",
            "allotmentIntervals": [
                {"STD": {"availability": {"2025-06-02": {"blockAllotted": 10, "rate": 110}}}}
            ]
        }),
        json!({
            "allotmentBlockId": "12003",
            "allotmentBlockName": "Walk-in Block",
            "allotmentIntervals": [
                {"STD": {"availability": {"2025-06-05": {"blockAllotted": 2, "blockRemaining": 2, "rate": 90}}}}
            ]
        }),
        json!({
            "allotmentBlockId": "12004",
            "allotmentBlockCode": "WED-77",
            "allotmentBlockName": "Wedding Party",
            "groupName": "Weddings",
            "groupCode": "WED",
            "allotmentIntervals": "corrupted"
        }),
    ]
}

#[test]
fn full_report_structure() {
    let blocks = sample_blocks();
    let report = generate_group_report(&blocks, "2025-06-01", "2025-06-30");

    assert_eq!(report.date_range.start_date, "2025-06-01");
    assert_eq!(report.date_range.end_date, "2025-06-30");

    // Groups sorted by name: Conferences, Unknown Group, Weddings.
    let names: Vec<&str> = report.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Conferences", "Unknown Group", "Weddings"]);

    let conferences = &report.groups[0];
    assert_eq!(conferences.display_name, "Conferences (CONF)");
    assert_eq!(conferences.total_blocks, 2);
    assert_eq!(conferences.allotment_blocks[0].name, "Tech Conference");
    assert_eq!(conferences.allotment_blocks[1].name, "Conference Overflow");

    // Tech Conference: 20*120 + 20*120 + 5*199.50 = 5797.5
    let tech = &conferences.allotment_blocks[0];
    assert!((tech.forecasted_revenue - 5797.5).abs() < 1e-9);

    // Dates ascending, room types ascending within each date.
    let dates: Vec<&str> = tech.dates_data.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-02"]);
    let june1_rooms: Vec<&str> = tech.dates_data[0]
        .room_types
        .iter()
        .map(|r| r.room_type_id.as_str())
        .collect();
    assert_eq!(june1_rooms, vec!["DLX", "STD"]);

    // Explicit blockConfirmed wins; derived otherwise.
    let dlx = &tech.dates_data[0].room_types[0];
    assert_eq!(dlx.block_confirmed, 3);
    assert_eq!(dlx.pickup_percentage, 60.0);
    let std_room = &tech.dates_data[0].room_types[1];
    assert_eq!(std_room.block_confirmed, 12); // 20 - 8
    assert_eq!(std_room.pickup_percentage, 60.0);

    // Walk-in block has no group metadata; nothing picked up yet.
    let unknown = &report.groups[1];
    assert_eq!(unknown.display_name, "Unknown Group (Unknown Code)");
    let walk_in = &unknown.allotment_blocks[0];
    assert_eq!(walk_in.dates_data[0].room_types[0].pickup_percentage, 0.0);

    // The corrupted block still appears, degraded to the minimal shape.
    let weddings = &report.groups[2];
    assert_eq!(weddings.total_blocks, 1);
    assert_eq!(weddings.total_forecasted_revenue, 0.0);
    assert_eq!(weddings.allotment_blocks[0].name, "Wedding Party");
    assert!(weddings.allotment_blocks[0].dates_data.is_empty());
}

#[test]
fn summary_totals_match_across_levels() {
    let blocks = sample_blocks();
    let report = generate_group_report(&blocks, "2025-06-01", "2025-06-30");

    assert_eq!(report.summary.total_groups, report.groups.len());
    assert_eq!(
        report.summary.total_allotment_blocks,
        report.groups.iter().map(|g| g.total_blocks).sum::<usize>()
    );

    let group_total: f64 = report
        .groups
        .iter()
        .map(|g| g.total_forecasted_revenue)
        .sum();
    let block_total: f64 = report
        .groups
        .iter()
        .flat_map(|g| g.allotment_blocks.iter())
        .map(|b| b.forecasted_revenue)
        .sum();
    assert!((report.summary.total_forecasted_revenue - group_total).abs() < 1e-9);
    assert!((group_total - block_total).abs() < 1e-9);
}

#[test]
fn report_is_deterministic_for_identical_input() {
    let blocks = sample_blocks();
    let a = generate_group_report(&blocks, "2025-06-01", "2025-06-30");
    let b = generate_group_report(&blocks, "2025-06-01", "2025-06-30");
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn normalizer_accepts_every_sample_block() {
    for raw in sample_blocks() {
        let block = normalize_block(&raw);
        assert!(!block.name.is_empty());
        for bucket in &block.dates_data {
            for entry in &bucket.room_types {
                assert!(entry.block_allotted > 0);
                assert!((0.0..=100.0).contains(&entry.pickup_percentage));
            }
        }
    }
}

use super::*;
use crate::keys::assign_keys;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use history_models::DayBoundary;
use std::collections::HashSet;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_record(subject_id: i64, episode_id: i64, viewed_at: DateTime<Utc>) -> HistoryRecord {
    HistoryRecord::new(subject_id * 1000 + episode_id, subject_id, episode_id, format!("Show {}", subject_id))
        .with_viewed_at(viewed_at)
        .with_episode_number(episode_id as f64)
}

fn header(node: &DisplayNode) -> Option<NaiveDate> {
    match node {
        DisplayNode::Header { day } => Some(*day),
        DisplayNode::Item { .. } => None,
    }
}

fn item(node: &DisplayNode) -> Option<&HistoryRecord> {
    match node {
        DisplayNode::Header { .. } => None,
        DisplayNode::Item { record } => Some(record),
    }
}

/// Deterministic pseudo-random history, most-recent-first with occasional out-of-order entries
fn generated_history(len: usize, seed: u64) -> Vec<HistoryRecord> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };

    let mut viewed_at = at(2024, 6, 30, 22);
    (0..len)
        .map(|i| {
            let step_hours = (next() % 30) as i64;
            viewed_at = viewed_at - chrono::Duration::hours(step_hours);
            let mut when = viewed_at;
            if next() % 10 == 0 {
                when = when + chrono::Duration::days(3);
            }
            create_record((next() % 7) as i64, i as i64, when)
        })
        .collect()
}

#[test]
fn test_group_empty_input() {
    let nodes = group_by_day(&[], &Utc).unwrap();
    assert!(nodes.is_empty());
}

#[test]
fn test_group_single_record() {
    let r = create_record(1, 1, at(2024, 1, 1, 10));
    let nodes = group_by_day(&[r.clone()], &Utc).unwrap();

    assert_eq!(
        nodes,
        vec![
            DisplayNode::Header { day: day(2024, 1, 1) },
            DisplayNode::Item { record: r },
        ]
    );
}

#[test]
fn test_group_same_day_keeps_order() {
    let r1 = create_record(1, 1, at(2024, 1, 1, 20));
    let r2 = create_record(2, 1, at(2024, 1, 1, 8));
    let nodes = group_by_day(&[r1.clone(), r2.clone()], &Utc).unwrap();

    assert_eq!(
        nodes,
        vec![
            DisplayNode::Header { day: day(2024, 1, 1) },
            DisplayNode::Item { record: r1 },
            DisplayNode::Item { record: r2 },
        ]
    );
}

#[test]
fn test_group_different_days() {
    let r1 = create_record(1, 1, at(2024, 1, 2, 9));
    let r2 = create_record(1, 2, at(2024, 1, 1, 9));
    let nodes = group_by_day(&[r1.clone(), r2.clone()], &Utc).unwrap();

    assert_eq!(
        nodes,
        vec![
            DisplayNode::Header { day: day(2024, 1, 2) },
            DisplayNode::Item { record: r1 },
            DisplayNode::Header { day: day(2024, 1, 1) },
            DisplayNode::Item { record: r2 },
        ]
    );
}

#[test]
fn test_group_does_not_merge_non_contiguous_days() {
    let r1 = create_record(1, 1, at(2024, 1, 1, 9));
    let r2 = create_record(2, 1, at(2024, 1, 2, 9));
    let r3 = create_record(3, 1, at(2024, 1, 1, 7));
    let nodes = group_by_day(&[r1, r2, r3], &Utc).unwrap();

    let headers: Vec<NaiveDate> = nodes.iter().filter_map(header).collect();
    assert_eq!(headers, vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 1)]);
    assert_eq!(nodes.len(), 6);
}

#[test]
fn test_group_uses_caller_calendar() {
    // 23:30 UTC and 00:30 UTC the next day are the same day in New York
    let late = Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap();
    let after_midnight = Utc.with_ymd_and_hms(2024, 3, 2, 0, 30, 0).unwrap();
    let records = vec![create_record(1, 2, after_midnight), create_record(1, 1, late)];

    let utc_nodes = group_by_day(&records, &Utc).unwrap();
    assert_eq!(utc_nodes.iter().filter(|n| n.is_header()).count(), 2);

    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    let ny_nodes = group_by_day(&records, &new_york).unwrap();
    let headers: Vec<NaiveDate> = ny_nodes.iter().filter_map(header).collect();
    assert_eq!(headers, vec![day(2024, 3, 1)]);

    let boundary = DayBoundary::Fixed(-5 * 3600);
    assert_eq!(group_by_day(&records, &boundary).unwrap(), ny_nodes);
}

#[test]
fn test_group_rejects_record_without_timestamp() {
    let good = create_record(1, 1, at(2024, 1, 1, 9));
    let mut missing = create_record(4, 2, at(2024, 1, 1, 9));
    missing.viewed_at = None;

    let err = group_by_day(&[good, missing], &Utc).unwrap_err();
    assert_eq!(
        err,
        HistoryError::InvalidRecord {
            index: 1,
            subject_id: 4,
            episode_id: 2,
        }
    );
}

#[test]
fn test_header_count_matches_day_runs() {
    for seed in 1..20 {
        let records = generated_history(60, seed);
        let nodes = group_by_day(&records, &Utc).unwrap();
        let headers = nodes.iter().filter(|n| n.is_header()).count();
        assert_eq!(headers, count_day_runs(&records, &Utc).unwrap(), "seed {}", seed);
    }
}

#[test]
fn test_grouping_invariants_on_generated_history() {
    for seed in 1..20 {
        let records = generated_history(80, seed);
        let nodes = group_by_day(&records, &Utc).unwrap();

        // Items come out in input order
        let items: Vec<&HistoryRecord> = nodes.iter().filter_map(item).collect();
        assert_eq!(items.len(), records.len());
        assert!(items.iter().zip(records.iter()).all(|(a, b)| *a == b));

        // No two headers in a row, never a trailing header, each header matches its next item
        for (i, node) in nodes.iter().enumerate() {
            if let Some(header_day) = header(node) {
                let next = nodes.get(i + 1).and_then(item).expect("header followed by item");
                assert_eq!(Utc.day_of(next.viewed_at.as_ref().unwrap()), header_day);
            }
        }
        assert!(nodes.first().map(|n| n.is_header()).unwrap_or(true));
    }
}

#[test]
fn test_grouping_is_deterministic() {
    let records = generated_history(50, 7);
    let first = group_by_day(&records, &Utc).unwrap();
    let second = group_by_day(&records, &Utc).unwrap();
    assert_eq!(first, second);
    assert_eq!(assign_keys(&first).unwrap(), assign_keys(&second).unwrap());
}

#[test]
fn test_keys_unique_on_generated_history() {
    for seed in 1..20 {
        let records = generated_history(80, seed);
        let nodes = group_by_day(&records, &Utc).unwrap();
        let keyed = assign_keys(&nodes).unwrap();

        let distinct: HashSet<_> = keyed.iter().map(|k| k.key.clone()).collect();
        assert_eq!(distinct.len(), nodes.len(), "seed {}", seed);
    }
}

// Upstream filtering applied before grouping: never-viewed entries, search, per-subject collapse

use history_models::HistoryRecord;
use std::collections::HashSet;
use tracing::debug;

/// Remove records that were never viewed; they cannot be placed on a day
pub fn drop_unviewed(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let before = records.len();
    let viewed: Vec<HistoryRecord> = records.into_iter().filter(|r| r.is_viewed()).collect();

    if viewed.len() != before {
        debug!("drop_unviewed: removed {} never-viewed records", before - viewed.len());
    }

    viewed
}

/// Case-insensitive title match; an empty or blank query matches everything
pub fn matches_query(record: &HistoryRecord, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(&query.to_lowercase())
}

/// Stable sort, newest `viewed_at` first, records without a timestamp last
pub fn sort_most_recent_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| b.viewed_at.cmp(&a.viewed_at));
}

/// Keep only the first record seen for each subject.
///
/// Run on most-recent-first input this leaves the latest viewed episode per subject.
pub fn latest_per_subject(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.subject_id))
        .collect()
}

/// Full upstream pipeline: drop never-viewed, apply the search query, order, optionally collapse
pub fn prepare_records(
    records: Vec<HistoryRecord>,
    query: Option<&str>,
    collapse_by_subject: bool,
) -> Vec<HistoryRecord> {
    let mut records: Vec<HistoryRecord> = drop_unviewed(records)
        .into_iter()
        .filter(|r| query.map(|q| matches_query(r, q)).unwrap_or(true))
        .collect();

    sort_most_recent_first(&mut records);

    if collapse_by_subject {
        records = latest_per_subject(records);
    }

    records
}

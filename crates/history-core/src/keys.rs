// Stable display keys for incremental list rendering

use crate::error::{HistoryError, Result};
use chrono::NaiveDate;
use history_models::{DisplayKey, DisplayNode, HistoryRecord, KeyedNode};
use std::collections::{HashMap, HashSet};

/// Key of a single node, derived from its content only.
///
/// Items are keyed by `(subject_id, episode_id, viewed_at)`, headers by their
/// day. Use [`assign_keys`] for whole sequences: a day that appears in several
/// non-adjacent runs needs an occurrence suffix there.
pub fn display_key(node: &DisplayNode) -> DisplayKey {
    match node {
        DisplayNode::Header { day } => header_key(day, 1),
        DisplayNode::Item { record } => item_key(record),
    }
}

/// Pair every node with its key, failing if two keys coincide.
///
/// Repeated headers for the same day get `#2`, `#3`, ... in order of
/// appearance. The suffix counts earlier runs of that day, so removing every
/// record of the first run renames `header-D#2` to `header-D`. Item keys and
/// the keys of days seen only once are unaffected.
///
/// A collision means the input held two records with the same subject,
/// episode and view time.
pub fn assign_keys(nodes: &[DisplayNode]) -> Result<Vec<KeyedNode>> {
    let mut header_occurrences: HashMap<NaiveDate, usize> = HashMap::new();
    let mut seen: HashSet<DisplayKey> = HashSet::with_capacity(nodes.len());
    let mut keyed = Vec::with_capacity(nodes.len());

    for node in nodes {
        let key = match node {
            DisplayNode::Header { day } => {
                let occurrence = header_occurrences.entry(*day).or_insert(0);
                *occurrence += 1;
                header_key(day, *occurrence)
            }
            DisplayNode::Item { record } => item_key(record),
        };

        if !seen.insert(key.clone()) {
            return Err(HistoryError::KeyCollision { key: key.to_string() });
        }

        keyed.push(KeyedNode {
            key,
            node: node.clone(),
        });
    }

    Ok(keyed)
}

pub fn find_by_key<'a>(keyed: &'a [KeyedNode], key: &str) -> Option<&'a KeyedNode> {
    keyed.iter().find(|k| k.key.as_str() == key)
}

fn header_key(day: &NaiveDate, occurrence: usize) -> DisplayKey {
    if occurrence <= 1 {
        DisplayKey::new(format!("header-{}", day.format("%Y-%m-%d")))
    } else {
        DisplayKey::new(format!("header-{}#{}", day.format("%Y-%m-%d"), occurrence))
    }
}

/// Millisecond timestamp, with the sub-millisecond remainder appended when
/// there is one so distinct view times never share a key.
fn item_key(record: &HistoryRecord) -> DisplayKey {
    let viewed_at = record
        .viewed_at
        .map(|at| match at.timestamp_subsec_nanos() % 1_000_000 {
            0 => at.timestamp_millis().to_string(),
            rest => format!("{}.{:06}", at.timestamp_millis(), rest),
        })
        .unwrap_or_else(|| "unviewed".to_string());
    DisplayKey::new(format!(
        "history-{}-{}-{}",
        record.subject_id, record.episode_id, viewed_at
    ))
}

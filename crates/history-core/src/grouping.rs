// Date grouping of history records into header/item display nodes

use crate::error::{HistoryError, Result};
use chrono::NaiveDate;
use history_models::{Calendar, DisplayNode, HistoryRecord};
use tracing::debug;

/// Interleave day headers into an ordered list of history records.
///
/// Records are split into contiguous runs sharing a calendar day (as decided by
/// `calendar`) and each run is preceded by one `Header`. Input order is kept as
/// is: nothing is sorted and runs of the same day that are not adjacent are not
/// merged, so such a day gets one header per run.
///
/// Every record must carry `viewed_at`. The first one that doesn't fails the
/// whole call with [`HistoryError::InvalidRecord`].
pub fn group_by_day<C>(records: &[HistoryRecord], calendar: &C) -> Result<Vec<DisplayNode>>
where
    C: Calendar + ?Sized,
{
    let mut nodes = Vec::with_capacity(records.len() + records.len().min(32));
    let mut current_day: Option<NaiveDate> = None;
    let mut headers = 0usize;

    for (index, record) in records.iter().enumerate() {
        let day = record_day(index, record, calendar)?;

        if current_day != Some(day) {
            nodes.push(DisplayNode::Header { day });
            current_day = Some(day);
            headers += 1;
        }

        nodes.push(DisplayNode::Item { record: record.clone() });
    }

    debug!(
        "group_by_day: records={}, headers={}, nodes={}",
        records.len(),
        headers,
        nodes.len()
    );

    Ok(nodes)
}

/// Number of maximal contiguous same-day runs in `records`
pub fn count_day_runs<C>(records: &[HistoryRecord], calendar: &C) -> Result<usize>
where
    C: Calendar + ?Sized,
{
    let mut runs = 0;
    let mut previous: Option<NaiveDate> = None;

    for (index, record) in records.iter().enumerate() {
        let day = record_day(index, record, calendar)?;
        if previous != Some(day) {
            runs += 1;
            previous = Some(day);
        }
    }

    Ok(runs)
}

fn record_day<C>(index: usize, record: &HistoryRecord, calendar: &C) -> Result<NaiveDate>
where
    C: Calendar + ?Sized,
{
    record
        .viewed_at
        .as_ref()
        .map(|at| calendar.day_of(at))
        .ok_or(HistoryError::InvalidRecord {
            index,
            subject_id: record.subject_id,
            episode_id: record.episode_id,
        })
}

#[cfg(test)]
mod tests;

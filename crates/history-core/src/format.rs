// Text shown for header days and history entries

use chrono::{DateTime, NaiveDate, Utc};
use history_models::{Calendar, DisplayOptions, HistoryRecord};

/// Days within this window are shown relative to today when relative time is on
const RELATIVE_WINDOW_DAYS: i64 = 7;

/// Label for a day header.
///
/// With relative time enabled, days in the past week read "Today", "Yesterday"
/// or "N days ago"; anything else uses the configured date format.
pub fn header_label(day: NaiveDate, today: NaiveDate, options: &DisplayOptions) -> String {
    if options.relative_time {
        let days_ago = (today - day).num_days();
        match days_ago {
            0 => return "Today".to_string(),
            1 => return "Yesterday".to_string(),
            n if (2..RELATIVE_WINDOW_DAYS).contains(&n) => return format!("{} days ago", n),
            _ => {}
        }
    }
    day.format(options.date_format.chrono_pattern()).to_string()
}

/// "Ep. 12 - 21:05", with the time shown on the configured day boundary
pub fn item_detail(record: &HistoryRecord, options: &DisplayOptions) -> String {
    let episode = format!("Ep. {}", record.episode_label());
    match record.viewed_at {
        Some(at) => {
            let offset = options.day_boundary.local_offset(&at);
            format!("{} - {}", episode, at.with_timezone(&offset).format("%H:%M"))
        }
        None => episode,
    }
}

/// Current day on the configured boundary
pub fn today(options: &DisplayOptions, now: DateTime<Utc>) -> NaiveDate {
    options.day_boundary.day_of(&now)
}

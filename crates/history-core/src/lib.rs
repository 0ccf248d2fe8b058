pub mod error;
pub mod filter;
pub mod format;
pub mod grouping;
pub mod keys;
pub mod screen_model;
pub mod shell;

pub use error::{HistoryError, Result};
pub use filter::{drop_unviewed, latest_per_subject, matches_query, prepare_records, sort_most_recent_first};
pub use grouping::{count_day_runs, group_by_day};
pub use keys::{assign_keys, display_key, find_by_key};
pub use screen_model::{HistoryScreenModel, HistoryState, LoadTicket};
pub use shell::{dispatch, render, EmptyMessage, HistoryActions, Row, RowContent, Screen, UserAction};

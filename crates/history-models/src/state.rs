use crate::record::HistoryRecord;
use serde::{Deserialize, Serialize};

/// Where the history screen is in its load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    NotYetLoaded,
    LoadedEmpty,
    LoadedNonEmpty,
}

impl LoadPhase {
    pub fn of<T>(list: Option<&[T]>) -> Self {
        match list {
            None => LoadPhase::NotYetLoaded,
            Some([]) => LoadPhase::LoadedEmpty,
            Some(_) => LoadPhase::LoadedNonEmpty,
        }
    }
}

/// Dialog the history screen is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Confirm removal of a history entry
    Delete(HistoryRecord),
}

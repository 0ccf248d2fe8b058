use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// A record without a view timestamp reached grouping; callers must filter those first
    #[error("history record at index {index} (subject {subject_id}, episode {episode_id}) has no viewed_at timestamp")]
    InvalidRecord {
        index: usize,
        subject_id: i64,
        episode_id: i64,
    },

    #[error("duplicate display key: {key}")]
    KeyCollision { key: String },
}

pub type Result<T> = std::result::Result<T, HistoryError>;

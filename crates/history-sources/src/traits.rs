use async_trait::async_trait;
use history_models::HistoryRecord;

#[async_trait]
pub trait HistorySource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static + std::fmt::Display;

    fn source_name(&self) -> &str;

    /// Load history, most recent first.
    ///
    /// `filter` is a case-insensitive title search. `Ok(None)` means the
    /// source has not loaded anything yet (as opposed to an empty history).
    async fn load_history(&self, filter: Option<&str>) -> Result<Option<Vec<HistoryRecord>>, Self::Error>;

    /// Remove one history entry
    async fn delete_record(&self, record: &HistoryRecord) -> Result<(), Self::Error>;

    /// Remove every history entry of a subject, returning how many were removed
    async fn delete_subject(&self, subject_id: i64) -> Result<usize, Self::Error>;
}

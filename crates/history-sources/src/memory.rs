use crate::error::SourceError;
use crate::traits::HistorySource;
use async_trait::async_trait;
use history_core::filter::{matches_query, sort_most_recent_first};
use history_models::HistoryRecord;
use tokio::sync::RwLock;

/// History held in memory; reports "not loaded" until populated
#[derive(Default)]
pub struct InMemorySource {
    records: RwLock<Option<Vec<HistoryRecord>>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            records: RwLock::new(Some(records)),
        }
    }

    pub async fn populate(&self, records: Vec<HistoryRecord>) {
        *self.records.write().await = Some(records);
    }
}

#[async_trait]
impl HistorySource for InMemorySource {
    type Error = SourceError;

    fn source_name(&self) -> &str {
        "memory"
    }

    async fn load_history(&self, filter: Option<&str>) -> Result<Option<Vec<HistoryRecord>>, Self::Error> {
        let guard = self.records.read().await;
        Ok(guard.as_ref().map(|records| {
            let mut matching: Vec<HistoryRecord> = records
                .iter()
                .filter(|r| filter.map(|q| matches_query(r, q)).unwrap_or(true))
                .cloned()
                .collect();
            sort_most_recent_first(&mut matching);
            matching
        }))
    }

    async fn delete_record(&self, record: &HistoryRecord) -> Result<(), Self::Error> {
        let mut guard = self.records.write().await;
        let records = guard
            .as_mut()
            .ok_or_else(|| SourceError::new("History is not loaded".to_string()))?;
        let before = records.len();
        records.retain(|r| r.id != record.id);
        if records.len() == before {
            return Err(SourceError::new(format!("History entry {} not found", record.id)));
        }
        Ok(())
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<usize, Self::Error> {
        let mut guard = self.records.write().await;
        let records = guard
            .as_mut()
            .ok_or_else(|| SourceError::new("History is not loaded".to_string()))?;
        let before = records.len();
        records.retain(|r| r.subject_id != subject_id);
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_record(id: i64, subject_id: i64, title: &str, hour: u32) -> HistoryRecord {
        HistoryRecord::new(id, subject_id, id, title)
            .with_viewed_at(Utc.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_not_loaded_until_populated() {
        let source = InMemorySource::new();
        assert_eq!(source.load_history(None).await.unwrap(), None);

        source.populate(vec![]).await;
        assert_eq!(source.load_history(None).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_load_filters_and_orders() {
        let source = InMemorySource::with_records(vec![
            create_record(1, 1, "Serial Experiments Lain", 8),
            create_record(2, 2, "Boogiepop Phantom", 9),
            create_record(3, 1, "Serial Experiments Lain", 10),
        ]);

        let all = source.load_history(None).await.unwrap().unwrap();
        let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let lain = source.load_history(Some("LAIN")).await.unwrap().unwrap();
        assert_eq!(lain.len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let doomed = create_record(1, 1, "A", 8);
        let source = InMemorySource::with_records(vec![
            doomed.clone(),
            create_record(2, 2, "B", 9),
            create_record(3, 2, "B", 10),
        ]);

        source.delete_record(&doomed).await.unwrap();
        assert!(source.delete_record(&doomed).await.is_err());
        assert_eq!(source.delete_subject(2).await.unwrap(), 2);
        assert_eq!(source.load_history(None).await.unwrap(), Some(vec![]));
    }
}

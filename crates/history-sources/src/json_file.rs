use crate::error::SourceError;
use crate::traits::HistorySource;
use async_trait::async_trait;
use history_core::filter::{matches_query, sort_most_recent_first};
use history_models::HistoryRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// History stored as a JSON array of records.
///
/// A missing file is an empty history. Writes are serialized so concurrent
/// deletes don't lose each other's changes.
pub struct JsonFileSource {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<HistoryRecord>, SourceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("History file {} does not exist, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(SourceError::io(
                    &format!("Failed to read history file {}", self.path.display()),
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            SourceError::parse(&format!("Failed to parse history file {}", self.path.display()), e)
        })
    }

    pub async fn save_all(&self, records: &[HistoryRecord]) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    SourceError::io(&format!("Failed to create directory {}", parent.display()), e)
                })?;
            }
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| SourceError::parse("Failed to serialize history", e))?;
        tokio::fs::write(&self.path, content).await.map_err(|e| {
            SourceError::io(&format!("Failed to write history file {}", self.path.display()), e)
        })
    }
}

#[async_trait]
impl HistorySource for JsonFileSource {
    type Error = SourceError;

    fn source_name(&self) -> &str {
        "json"
    }

    async fn load_history(&self, filter: Option<&str>) -> Result<Option<Vec<HistoryRecord>>, Self::Error> {
        let mut records: Vec<HistoryRecord> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| filter.map(|q| matches_query(r, q)).unwrap_or(true))
            .collect();
        sort_most_recent_first(&mut records);

        info!("Loaded {} history records from {}", records.len(), self.path.display());
        Ok(Some(records))
    }

    async fn delete_record(&self, record: &HistoryRecord) -> Result<(), Self::Error> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.id != record.id);
        if records.len() == before {
            return Err(SourceError::new(format!("History entry {} not found", record.id)));
        }
        self.save_all(&records).await?;
        info!("Deleted history entry {} ({})", record.id, record.title);
        Ok(())
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<usize, Self::Error> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.subject_id != subject_id);
        let removed = before - records.len();
        if removed > 0 {
            self.save_all(&records).await?;
        }
        info!("Deleted {} history entries of subject {}", removed, subject_id);
        Ok(removed)
    }
}

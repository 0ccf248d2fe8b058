use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged viewing event for an episode of a subject (anime, show, ...).
///
/// Only `subject_id`, `episode_id` and `viewed_at` carry identity; the rest is
/// display payload that grouping passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id: i64,
    pub subject_id: i64,
    pub episode_id: i64,
    /// `None` means the episode was never actually viewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_at: Option<DateTime<Utc>>,
    pub title: String,
    #[serde(default)]
    pub episode_number: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_secs: Option<u64>,
}

impl HistoryRecord {
    pub fn new(id: i64, subject_id: i64, episode_id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            subject_id,
            episode_id,
            viewed_at: None,
            title: title.into(),
            episode_number: 0.0,
            cover_url: None,
            progress_secs: None,
        }
    }

    pub fn with_viewed_at(mut self, viewed_at: DateTime<Utc>) -> Self {
        self.viewed_at = Some(viewed_at);
        self
    }

    pub fn with_episode_number(mut self, episode_number: f64) -> Self {
        self.episode_number = episode_number;
        self
    }

    pub fn is_viewed(&self) -> bool {
        self.viewed_at.is_some()
    }

    /// Episode number without a trailing ".0" for whole episodes (12.0 -> "12", 12.5 -> "12.5")
    pub fn episode_label(&self) -> String {
        if self.episode_number.fract() == 0.0 {
            format!("{}", self.episode_number as i64)
        } else {
            format!("{}", self.episode_number)
        }
    }
}

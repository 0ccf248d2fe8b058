use crate::record::HistoryRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of the grouped history list: either a day header or a history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayNode {
    Header { day: NaiveDate },
    Item { record: HistoryRecord },
}

impl DisplayNode {
    pub fn content_type(&self) -> ContentType {
        match self {
            DisplayNode::Header { .. } => ContentType::Header,
            DisplayNode::Item { .. } => ContentType::Item,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, DisplayNode::Header { .. })
    }

    pub fn record(&self) -> Option<&HistoryRecord> {
        match self {
            DisplayNode::Header { .. } => None,
            DisplayNode::Item { record } => Some(record),
        }
    }
}

/// Recycling class for a virtualized list; rows only reuse views of the same type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Header,
    Item,
}

/// Value-derived identifier of a display node, used only for render diffing
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayKey(String);

impl DisplayKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedNode {
    pub key: DisplayKey,
    pub node: DisplayNode,
}

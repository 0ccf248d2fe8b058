// Presentation shell: turns screen state into rows and routes user actions

use crate::error::Result;
use crate::format::{header_label, item_detail};
use crate::keys::assign_keys;
use crate::screen_model::HistoryState;
use chrono::NaiveDate;
use history_models::{ContentType, DisplayKey, DisplayNode, DisplayOptions, HistoryRecord, LoadPhase};
use serde::Serialize;

/// Callbacks the owning controller handles on user interaction
pub trait HistoryActions {
    fn open_subject(&mut self, subject_id: i64);
    fn resume(&mut self, subject_id: i64, episode_id: i64);
    fn request_delete(&mut self, record: &HistoryRecord);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Tap on the cover: open the subject
    OpenCover,
    Resume,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyMessage {
    /// A search is active and nothing matched
    NoResultsFound,
    NoRecentHistory,
}

impl EmptyMessage {
    pub fn text(&self) -> &'static str {
        match self {
            EmptyMessage::NoResultsFound => "No results found",
            EmptyMessage::NoRecentHistory => "Nothing watched recently",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "content", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    Empty(EmptyMessage),
    List(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub key: DisplayKey,
    pub content_type: ContentType,
    pub content: RowContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowContent {
    Header {
        day: NaiveDate,
        label: String,
    },
    Item {
        subject_id: i64,
        episode_id: i64,
        title: String,
        detail: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cover_url: Option<String>,
    },
}

/// Pick the screen for the current state.
///
/// Not loaded yet shows the loading indicator; an empty list shows a message
/// that depends on whether a search is active; otherwise every display node
/// becomes a keyed row.
pub fn render(state: &HistoryState, options: &DisplayOptions, today: NaiveDate) -> Result<Screen> {
    let nodes = match (state.phase(), state.nodes()) {
        (LoadPhase::NotYetLoaded, _) | (_, None) => return Ok(Screen::Loading),
        (LoadPhase::LoadedEmpty, _) => {
            let searching = state
                .search_query()
                .map(|q| !q.trim().is_empty())
                .unwrap_or(false);
            let message = if searching {
                EmptyMessage::NoResultsFound
            } else {
                EmptyMessage::NoRecentHistory
            };
            return Ok(Screen::Empty(message));
        }
        (LoadPhase::LoadedNonEmpty, Some(nodes)) => nodes,
    };

    let rows = assign_keys(nodes)?
        .into_iter()
        .map(|keyed| {
            let content_type = keyed.node.content_type();
            let content = match keyed.node {
                DisplayNode::Header { day } => RowContent::Header {
                    day,
                    label: header_label(day, today, options),
                },
                DisplayNode::Item { record } => RowContent::Item {
                    subject_id: record.subject_id,
                    episode_id: record.episode_id,
                    detail: item_detail(&record, options),
                    title: record.title,
                    cover_url: record.cover_url,
                },
            };
            Row {
                key: keyed.key,
                content_type,
                content,
            }
        })
        .collect();

    Ok(Screen::List(rows))
}

/// Route a user action on a node to the controller.
///
/// Headers are not interactive; returns whether a callback fired.
pub fn dispatch<A>(node: &DisplayNode, action: UserAction, actions: &mut A) -> bool
where
    A: HistoryActions + ?Sized,
{
    let record = match node {
        DisplayNode::Header { .. } => return false,
        DisplayNode::Item { record } => record,
    };

    match action {
        UserAction::OpenCover => actions.open_subject(record.subject_id),
        UserAction::Resume => actions.resume(record.subject_id, record.episode_id),
        UserAction::Delete => actions.request_delete(record),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen_model::HistoryScreenModel;
    use chrono::{TimeZone, Utc};
    use history_models::{DateFormat, DayBoundary};

    #[derive(Default)]
    struct RecordingActions {
        calls: Vec<String>,
    }

    impl HistoryActions for RecordingActions {
        fn open_subject(&mut self, subject_id: i64) {
            self.calls.push(format!("open {}", subject_id));
        }

        fn resume(&mut self, subject_id: i64, episode_id: i64) {
            self.calls.push(format!("resume {} {}", subject_id, episode_id));
        }

        fn request_delete(&mut self, record: &HistoryRecord) {
            self.calls.push(format!("delete {}", record.id));
        }
    }

    fn options() -> DisplayOptions {
        DisplayOptions {
            relative_time: true,
            date_format: DateFormat::Iso,
            day_boundary: DayBoundary::Utc,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn create_record(id: i64, subject_id: i64, day: u32) -> HistoryRecord {
        HistoryRecord::new(id, subject_id, id * 10, format!("Subject {}", subject_id))
            .with_episode_number(id as f64)
            .with_viewed_at(Utc.with_ymd_and_hms(2024, 4, day, 18, 30, 0).unwrap())
    }

    fn loaded_model(records: Vec<HistoryRecord>) -> HistoryScreenModel<DayBoundary> {
        let mut model = HistoryScreenModel::new(DayBoundary::Utc, false);
        let ticket = model.begin_load();
        model.apply_snapshot(ticket, Some(records)).unwrap();
        model
    }

    #[test]
    fn test_render_loading() {
        let model = HistoryScreenModel::new(DayBoundary::Utc, false);
        assert_eq!(render(model.state(), &options(), today()).unwrap(), Screen::Loading);
    }

    #[test]
    fn test_render_empty_messages() {
        let mut model = loaded_model(vec![]);
        assert_eq!(
            render(model.state(), &options(), today()).unwrap(),
            Screen::Empty(EmptyMessage::NoRecentHistory)
        );

        model.set_search_query(Some("haruhi".to_string()));
        let ticket = model.begin_load();
        model.apply_snapshot(ticket, Some(vec![create_record(1, 1, 2)])).unwrap();
        assert_eq!(
            render(model.state(), &options(), today()).unwrap(),
            Screen::Empty(EmptyMessage::NoResultsFound)
        );
    }

    #[test]
    fn test_render_rows() {
        let model = loaded_model(vec![create_record(1, 7, 2), create_record(2, 8, 1)]);
        let screen = render(model.state(), &options(), today()).unwrap();

        let rows = match screen {
            Screen::List(rows) => rows,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].key.as_str(), "header-2024-04-02");
        assert_eq!(rows[0].content_type, ContentType::Header);
        assert_eq!(
            rows[0].content,
            RowContent::Header {
                day: today(),
                label: "Today".to_string(),
            }
        );
        assert_eq!(
            rows[1].content,
            RowContent::Item {
                subject_id: 7,
                episode_id: 10,
                title: "Subject 7".to_string(),
                detail: "Ep. 1 - 18:30".to_string(),
                cover_url: None,
            }
        );
        match &rows[2].content {
            RowContent::Header { label, .. } => assert_eq!(label, "Yesterday"),
            other => panic!("expected header, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_actions() {
        let record = create_record(3, 9, 1);
        let item = DisplayNode::Item { record: record.clone() };
        let header = DisplayNode::Header { day: today() };
        let mut actions = RecordingActions::default();

        assert!(dispatch(&item, UserAction::OpenCover, &mut actions));
        assert!(dispatch(&item, UserAction::Resume, &mut actions));
        assert!(dispatch(&item, UserAction::Delete, &mut actions));
        assert!(!dispatch(&header, UserAction::Resume, &mut actions));

        assert_eq!(actions.calls, vec!["open 9", "resume 9 30", "delete 3"]);
    }

    #[test]
    fn test_render_json_shape() {
        let model = loaded_model(vec![create_record(1, 7, 2)]);
        let screen = render(model.state(), &options(), today()).unwrap();
        let json = serde_json::to_value(&screen).unwrap();

        assert_eq!(json["screen"], "list");
        assert_eq!(json["content"][0]["content_type"], "header");
        assert_eq!(json["content"][1]["content"]["type"], "item");
        assert_eq!(json["content"][1]["key"], "history-7-10-1712082600000");
    }
}

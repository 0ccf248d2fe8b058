// Screen model owning history load state, search query and pending dialog

use crate::error::Result;
use crate::filter::prepare_records;
use crate::grouping::group_by_day;
use history_models::{Calendar, Dialog, DisplayNode, HistoryRecord, LoadPhase};
use tracing::{debug, info, warn};

/// Handle for one load request; only the newest applied load wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    list: Option<Vec<DisplayNode>>,
    search_query: Option<String>,
    dialog: Option<Dialog>,
}

impl HistoryState {
    pub fn phase(&self) -> LoadPhase {
        LoadPhase::of(self.list.as_deref())
    }

    /// Grouped display nodes, `None` until the first snapshot arrives
    pub fn nodes(&self) -> Option<&[DisplayNode]> {
        self.list.as_deref()
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }
}

pub struct HistoryScreenModel<C: Calendar> {
    calendar: C,
    collapse_by_subject: bool,
    state: HistoryState,
    /// Last raw snapshot, kept so search changes can regroup without reloading
    records: Option<Vec<HistoryRecord>>,
    next_ticket: u64,
    applied: Option<LoadTicket>,
}

impl<C: Calendar> HistoryScreenModel<C> {
    pub fn new(calendar: C, collapse_by_subject: bool) -> Self {
        Self {
            calendar,
            collapse_by_subject,
            state: HistoryState::default(),
            records: None,
            next_ticket: 0,
            applied: None,
        }
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        LoadTicket(self.next_ticket)
    }

    /// Apply a completed load.
    ///
    /// Returns `Ok(false)` when a newer load has already been applied and this
    /// snapshot was discarded. `None` means the source has nothing loaded yet.
    pub fn apply_snapshot(&mut self, ticket: LoadTicket, snapshot: Option<Vec<HistoryRecord>>) -> Result<bool> {
        if let Some(applied) = self.applied {
            if ticket < applied {
                debug!("Discarding stale history snapshot {:?} (applied {:?})", ticket, applied);
                return Ok(false);
            }
        }

        let list = match &snapshot {
            Some(records) => Some(self.build(records.clone())?),
            None => None,
        };

        info!(
            "Applied history snapshot {:?}: {} records, {} display nodes",
            ticket,
            snapshot.as_ref().map(|r| r.len()).unwrap_or(0),
            list.as_ref().map(|l| l.len()).unwrap_or(0)
        );

        self.records = snapshot;
        self.state.list = list;
        self.applied = Some(ticket);
        Ok(true)
    }

    /// Change the search query and regroup the current snapshot
    pub fn set_search_query(&mut self, query: Option<String>) {
        self.state.search_query = query.filter(|q| !q.trim().is_empty());
        if let Err(e) = self.regroup() {
            // Records in a snapshot already passed grouping once, so this only fires on a bug
            warn!("Failed to regroup history after search change: {}", e);
        }
    }

    pub fn search_query(&self) -> Option<&str> {
        self.state.search_query()
    }

    /// Raise the delete confirmation for `record`
    pub fn request_delete(&mut self, record: &HistoryRecord) {
        self.state.dialog = Some(Dialog::Delete(record.clone()));
    }

    pub fn set_dialog(&mut self, dialog: Option<Dialog>) {
        self.state.dialog = dialog;
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.state.dialog()
    }

    /// Drop a deleted record locally without waiting for a reload
    pub fn remove_record(&mut self, record: &HistoryRecord) -> Result<()> {
        if let Some(records) = self.records.as_mut() {
            records.retain(|r| r.id != record.id);
        }
        if matches!(&self.state.dialog, Some(Dialog::Delete(pending)) if pending.id == record.id) {
            self.state.dialog = None;
        }
        self.regroup()
    }

    fn regroup(&mut self) -> Result<()> {
        if let Some(records) = self.records.clone() {
            self.state.list = Some(self.build(records)?);
        }
        Ok(())
    }

    fn build(&self, records: Vec<HistoryRecord>) -> Result<Vec<DisplayNode>> {
        let prepared = prepare_records(records, self.state.search_query(), self.collapse_by_subject);
        group_by_day(&prepared, &self.calendar)
    }
}

use super::context::AppContext;
use super::prompts;
use crate::output::Output;
use crate::SourceArgs;
use chrono::Utc;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use history_core::format::{item_detail, today};
use history_core::{assign_keys, dispatch, find_by_key, render, HistoryActions, HistoryScreenModel, RowContent, Screen, UserAction};
use history_models::{DayBoundary, Dialog, DisplayNode, DisplayOptions, HistoryRecord};
use history_sources::{HistorySource, JsonFileSource};
use serde_json::json;

#[derive(Debug, Clone, Copy)]
pub enum EntryAction {
    Open,
    Resume,
}

pub async fn run_history(
    config_path: Option<std::path::PathBuf>,
    args: SourceArgs,
    search: Option<String>,
    show_keys: bool,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let options = ctx.display_options()?;
    let source = ctx.history_source(&args);

    let (model, _) = load_model(&source, &options, ctx.collapse_by_subject(&args), search).await?;
    let screen = render(model.state(), &options, today(&options, Utc::now()))
        .map_err(|e| eyre!("Failed to build history list: {}", e))?;

    if !output.is_human() {
        output.json(&serde_json::to_value(&screen)?);
        return Ok(());
    }

    match screen {
        Screen::Loading => output.info("History is still loading"),
        Screen::Empty(message) => output.info(message.text()),
        Screen::List(rows) => {
            for row in &rows {
                match &row.content {
                    RowContent::Header { label, .. } => output.header(label),
                    RowContent::Item { title, detail, .. } => {
                        output.entry(title, detail, show_keys.then(|| row.key.as_str()))
                    }
                }
            }
        }
    }

    Ok(())
}

pub async fn run_action(
    config_path: Option<std::path::PathBuf>,
    args: SourceArgs,
    key: &str,
    action: EntryAction,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let options = ctx.display_options()?;
    let source = ctx.history_source(&args);

    let (mut model, records) = load_model(&source, &options, false, None).await?;
    let node = find_entry(&model, key)?;

    let mut actions = CliActions {
        output,
        options: &options,
        model: &mut model,
        records: &records,
    };
    let user_action = match action {
        EntryAction::Open => UserAction::OpenCover,
        EntryAction::Resume => UserAction::Resume,
    };
    dispatch(&node, user_action, &mut actions);

    Ok(())
}

pub async fn run_delete(
    config_path: Option<std::path::PathBuf>,
    args: SourceArgs,
    key: &str,
    all_for_subject: bool,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let options = ctx.display_options()?;
    let source = ctx.history_source(&args);

    let (mut model, records) = load_model(&source, &options, false, None).await?;
    let node = find_entry(&model, key)?;

    {
        let mut actions = CliActions {
            output,
            options: &options,
            model: &mut model,
            records: &records,
        };
        dispatch(&node, UserAction::Delete, &mut actions);
    }

    let record = match model.dialog() {
        Some(Dialog::Delete(record)) => record.clone(),
        None => return Err(eyre!("No history entry selected for deletion")),
    };

    let prompt = if all_for_subject {
        format!("Remove all history of {}?", record.title)
    } else {
        format!("Remove {} episode {} from history?", record.title, record.episode_label())
    };
    let confirmed = yes || prompts::prompt_yes_no(&prompt, Some(false), output)?;
    if !confirmed {
        model.set_dialog(None);
        output.info("Nothing removed");
        return Ok(());
    }

    if all_for_subject {
        let removed = source
            .delete_subject(record.subject_id)
            .await
            .map_err(|e| eyre!("Failed to delete history of {}: {}", record.title, e))?;
        output.success(format!("Removed {} history entries of {}", removed, record.title));
    } else {
        source
            .delete_record(&record)
            .await
            .map_err(|e| eyre!("Failed to delete history entry: {}", e))?;
        output.success(format!("Removed {} episode {} from history", record.title, record.episode_label()));
    }

    Ok(())
}

/// Load a snapshot into a fresh screen model, returning the raw records alongside
async fn load_model(
    source: &JsonFileSource,
    options: &DisplayOptions,
    collapse_by_subject: bool,
    search: Option<String>,
) -> Result<(HistoryScreenModel<DayBoundary>, Vec<HistoryRecord>)> {
    let mut model = HistoryScreenModel::new(options.day_boundary, collapse_by_subject);
    model.set_search_query(search);

    let ticket = model.begin_load();
    tracing::debug!("Loading history from {} source {:?}", source.source_name(), ticket);
    let snapshot = source.load_history(model.search_query()).await.map_err(|e| {
        eyre!(
            "Failed to load history from {} source {}: {}",
            source.source_name(),
            source.path().display(),
            e
        )
    })?;
    let records = snapshot.clone().unwrap_or_default();

    model
        .apply_snapshot(ticket, snapshot)
        .map_err(|e| eyre!("Failed to group history: {}", e))?;

    Ok((model, records))
}

fn find_entry(model: &HistoryScreenModel<DayBoundary>, key: &str) -> Result<DisplayNode> {
    let keyed = assign_keys(model.state().nodes().unwrap_or(&[]))
        .map_err(|e| eyre!("Failed to key history list: {}", e))?;
    let found = find_by_key(&keyed, key)
        .ok_or_else(|| eyre!("No history entry with key {}. Run 'watchlog history --keys --all-episodes' to list keys", key))?;

    if found.node.is_header() {
        return Err(eyre!("{} is a day header, not a history entry", key));
    }
    Ok(found.node.clone())
}

/// Handles history actions from the command line
struct CliActions<'a> {
    output: &'a Output,
    options: &'a DisplayOptions,
    model: &'a mut HistoryScreenModel<DayBoundary>,
    records: &'a [HistoryRecord],
}

impl HistoryActions for CliActions<'_> {
    fn open_subject(&mut self, subject_id: i64) {
        let entries: Vec<&HistoryRecord> = self
            .records
            .iter()
            .filter(|r| r.subject_id == subject_id && r.is_viewed())
            .collect();
        let title = entries
            .first()
            .map(|r| r.title.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        if !self.output.is_human() {
            self.output.json(&json!({
                "type": "open",
                "subject_id": subject_id,
                "title": title,
                "episodes": entries.iter().map(|r| json!({
                    "episode_id": r.episode_id,
                    "episode": r.episode_label(),
                    "viewed_at": r.viewed_at,
                })).collect::<Vec<_>>(),
            }));
            return;
        }

        self.output.header(&title);
        for record in entries {
            self.output.entry(&format!("#{}", record.episode_id), &item_detail(record, self.options), None);
        }
    }

    fn resume(&mut self, subject_id: i64, episode_id: i64) {
        let record = self
            .records
            .iter()
            .find(|r| r.subject_id == subject_id && r.episode_id == episode_id);

        let Some(record) = record else {
            self.output.warn(format!("Episode {} of subject {} is no longer in history", episode_id, subject_id));
            return;
        };

        let position = record
            .progress_secs
            .map(|secs| format!(" at {:02}:{:02}", secs / 60, secs % 60))
            .unwrap_or_default();

        if self.output.is_human() {
            self.output.success(format!(
                "Resuming {} episode {}{}",
                record.title,
                record.episode_label(),
                position
            ));
        } else {
            self.output.json(&json!({
                "type": "resume",
                "subject_id": subject_id,
                "episode_id": episode_id,
                "title": record.title,
                "progress_secs": record.progress_secs,
            }));
        }
    }

    fn request_delete(&mut self, record: &HistoryRecord) {
        tracing::debug!("Delete requested for history entry {}", record.id);
        self.model.request_delete(record);
    }
}

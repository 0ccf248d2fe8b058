use super::context::AppContext;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use history_models::{DateFormat, DayBoundary};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub fn run_config(config_path: Option<PathBuf>, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config_path, output),
        ConfigCommands::Ui {
            relative_time,
            date_format,
            timezone,
        } => configure_ui(config_path, relative_time, date_format, timezone, output),
    }
}

fn show_config(config_path: Option<PathBuf>, output: &Output) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let config = &ctx.config;
    let history_file = config
        .history
        .file
        .clone()
        .unwrap_or_else(|| ctx.paths.history_file());

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": ctx.config_path.display().to_string(),
                "ui": {
                    "relative_time": config.ui.relative_time,
                    "date_format": config.ui.date_format.pattern(),
                    "timezone": config.ui.timezone,
                },
                "browse": {
                    "hide_in_anime_library_items": config.browse.hide_in_anime_library_items,
                    "hide_in_manga_library_items": config.browse.hide_in_manga_library_items,
                },
                "history": {
                    "file": history_file.display().to_string(),
                    "collapse_by_subject": config.history.collapse_by_subject,
                },
            }));
        }
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            if !ctx.config_path.exists() {
                output.warn(format!(
                    "No config file at {}, showing defaults",
                    ctx.config_path.display()
                ));
            }

            let date_format = match config.ui.date_format {
                DateFormat::Default => "default".to_string(),
                other => other.pattern().to_string(),
            };

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.add_row(vec![Cell::new("Config file"), Cell::new(ctx.config_path.display().to_string())]);
            table.add_row(vec![Cell::new("Relative time"), Cell::new(config.ui.relative_time.to_string())]);
            table.add_row(vec![Cell::new("Date format"), Cell::new(date_format)]);
            table.add_row(vec![Cell::new("Timezone"), Cell::new(&config.ui.timezone)]);
            table.add_row(vec![Cell::new("History file"), Cell::new(history_file.display().to_string())]);
            table.add_row(vec![
                Cell::new("Latest episode per subject"),
                Cell::new(config.history.collapse_by_subject.to_string()),
            ]);
            println!("{}", table);
        }
    }

    Ok(())
}

fn configure_ui(
    config_path: Option<PathBuf>,
    relative_time: Option<bool>,
    date_format: Option<String>,
    timezone: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut ctx = AppContext::load(config_path)?;

    if relative_time.is_none() && date_format.is_none() && timezone.is_none() {
        output.warn("No UI option specified. Use --relative-time, --date-format or --timezone");
        return Ok(());
    }

    if let Some(relative_time) = relative_time {
        ctx.config.ui.relative_time = relative_time;
    }

    if let Some(date_format) = date_format {
        ctx.config.ui.date_format = date_format.parse::<DateFormat>().map_err(|e| eyre!(e))?;
    }

    if let Some(timezone) = timezone {
        let boundary = timezone.parse::<DayBoundary>().map_err(|e| eyre!(e))?;
        ctx.config.ui.timezone = boundary.to_string();
    }

    ctx.save()?;
    output.success(format!("Display settings saved to {}", ctx.config_path.display()));
    Ok(())
}

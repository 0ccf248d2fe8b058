use super::context::AppContext;
use crate::output::Output;
use crate::SettingsCommands;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use history_config::{browse_preferences, preferences::BROWSE_TITLE};
use history_models::PreferenceItem;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub fn run_settings(config_path: Option<PathBuf>, cmd: SettingsCommands, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load(config_path)?;

    match cmd {
        SettingsCommands::Show => show_settings(&ctx, output),
        SettingsCommands::Set { key, value } => {
            ctx.config.browse.set(key, value);
            ctx.save()?;
            tracing::info!("Set {} = {}", key, value);
            output.success(format!("{} {}", key.title(), if value { "enabled" } else { "disabled" }));
            Ok(())
        }
    }
}

fn show_settings(ctx: &AppContext, output: &Output) -> Result<()> {
    let groups = browse_preferences(&ctx.config.browse);

    if !output.is_human() {
        output.json(&json!({
            "title": BROWSE_TITLE,
            "groups": groups,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", BROWSE_TITLE.bright_cyan().bold());
    for group in &groups {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new(&group.title).fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Key"),
            Cell::new("Enabled"),
        ]);
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

        for item in &group.items {
            match item {
                PreferenceItem::Switch { key, title, value } => {
                    table.add_row(vec![
                        Cell::new(title),
                        Cell::new(key.as_str()),
                        Cell::new(if *value { "yes" } else { "no" }),
                    ]);
                }
            }
        }
        println!("{}", table);
    }

    Ok(())
}

use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{config, history, settings};
use history_config::PathManager;
use history_models::PreferenceKey;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "Watchlog - browse and manage your watch history grouped by day")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr (defaults to the log directory)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, default_missing_value = "default")]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Where history is read from
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// History file (JSON array of records); overrides the configured file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Show every viewed episode instead of only the latest one per subject
    #[arg(long, action = ArgAction::SetTrue)]
    pub all_episodes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show watch history grouped by day
    #[command(long_about = "Show watch history, most recent first, with a header for each day. Use --search to filter by title and --keys to print the display key of every row for use with open, resume and delete.")]
    History {
        /// Only show entries whose title contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Print the display key of every row
        #[arg(long, action = ArgAction::SetTrue)]
        keys: bool,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Open the subject of a history entry
    Open {
        /// Display key of the entry (see `watchlog history --keys`)
        key: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Resume the episode of a history entry
    Resume {
        /// Display key of the entry (see `watchlog history --keys`)
        key: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Remove a history entry
    Delete {
        /// Display key of the entry (see `watchlog history --keys`)
        key: String,

        /// Remove every history entry of the entry's subject
        #[arg(long, action = ArgAction::SetTrue)]
        all_for_subject: bool,

        /// Don't ask for confirmation
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show or change browse settings
    Settings {
        #[command(subcommand)]
        cmd: Option<SettingsCommands>,
    },
    /// Show or change display configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// List browse settings with their current values
    Show,
    /// Turn a browse setting on or off
    Set {
        /// Setting key, e.g. hide_in_anime_library_items
        key: PreferenceKey,
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Configure how history dates are displayed
    #[command(long_about = "Configure relative dates (Today, Yesterday, N days ago), the date format used for older days, and the timezone that decides where one day ends and the next begins.")]
    Ui {
        /// Show recent days relative to today
        #[arg(long)]
        relative_time: Option<bool>,

        /// Date format: default, MM/dd/yy, dd/MM/yy, yyyy-MM-dd, dd MMM yyyy, MMM dd, yyyy
        #[arg(long)]
        date_format: Option<String>,

        /// Day boundary timezone: local, UTC or an offset like +09:00
        #[arg(long, allow_hyphen_values = true)]
        timezone: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli.log_file.as_deref().map(|path| match path {
        "default" => PathManager::default().log_file(),
        other => PathBuf::from(other),
    });
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.clone();

    match cli.command {
        Commands::History { search, keys, source } => {
            history::run_history(config_path, source, search, keys, &output).await
        }
        Commands::Open { key, source } => {
            history::run_action(config_path, source, &key, history::EntryAction::Open, &output).await
        }
        Commands::Resume { key, source } => {
            history::run_action(config_path, source, &key, history::EntryAction::Resume, &output).await
        }
        Commands::Delete { key, all_for_subject, yes, source } => {
            history::run_delete(config_path, source, &key, all_for_subject, yes, &output).await
        }
        Commands::Settings { cmd } => {
            settings::run_settings(config_path, cmd.unwrap_or(SettingsCommands::Show), &output)
        }
        Commands::Config { cmd } => config::run_config(config_path, cmd, &output),
    }
}

use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber.
///
/// Verbosity: 0 = info, 1 = debug, 2+ = trace; `quiet` shows errors only.
/// `RUST_LOG` overrides the level unless quiet. Output is JSON when
/// `RUST_LOG_JSON=true` or stdout is not a terminal.
pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default_level = match verbose_level {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    match log_file {
        Some(log_path) => {
            let log_dir = log_path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
            std::fs::create_dir_all(log_dir)?;

            let log_filename = log_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

            // Rotated files are named watchlog.2026-01-17 etc.
            let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

            if json {
                let layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(layer).try_init()?;
            } else {
                let layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(layer).try_init()?;
            }
        }
        None => {
            if json {
                let layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(layer).try_init()?;
            } else {
                let layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(layer).try_init()?;
            }
        }
    }

    Ok(())
}

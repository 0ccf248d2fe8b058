use crate::SourceArgs;
use color_eyre::Result;
use history_config::{Config, PathManager};
use history_models::DisplayOptions;
use history_sources::JsonFileSource;
use std::path::PathBuf;

/// Loaded configuration plus the paths commands need
pub struct AppContext {
    pub config_path: PathBuf,
    pub config: Config,
    pub paths: PathManager,
}

impl AppContext {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let paths = PathManager::default();
        let config_path = config_override.unwrap_or_else(|| paths.config_file());

        let config = Config::load_or_default(&config_path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid config {}: {}", config_path.display(), e))?;

        tracing::debug!("Using config {}", config_path.display());
        Ok(Self { config_path, config, paths })
    }

    pub fn display_options(&self) -> Result<DisplayOptions> {
        self.config
            .display_options()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid display settings: {}", e))
    }

    /// Command-line file, then configured file, then the data directory default
    pub fn history_source(&self, args: &SourceArgs) -> JsonFileSource {
        let path = args
            .file
            .clone()
            .or_else(|| self.config.history.file.clone())
            .unwrap_or_else(|| self.paths.history_file());
        JsonFileSource::new(path)
    }

    pub fn collapse_by_subject(&self, args: &SourceArgs) -> bool {
        self.config.history.collapse_by_subject && !args.all_episodes
    }

    pub fn save(&self) -> Result<()> {
        self.config
            .save_to_file(&self.config_path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", self.config_path.display(), e))
    }
}

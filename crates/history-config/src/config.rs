use history_models::{DateFormat, DayBoundary, DisplayOptions, PreferenceKey};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// How history dates are presented
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    /// Show "Today", "Yesterday", "N days ago" for the past week
    #[serde(default = "default_true")]
    pub relative_time: bool,
    #[serde(default)]
    pub date_format: DateFormat,
    /// Day boundary for grouping: "local", "UTC" or an offset like "+09:00"
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Toggles of the browse settings screen
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct BrowseConfig {
    #[serde(default)]
    pub hide_in_anime_library_items: bool,
    #[serde(default)]
    pub hide_in_manga_library_items: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryConfig {
    /// History file; defaults to the data directory
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Show only the latest viewed episode of each subject
    #[serde(default = "default_true")]
    pub collapse_by_subject: bool,
}

fn default_true() -> bool {
    true
}

/// `local` follows the system zone, which already honours `TZ`
fn default_timezone() -> String {
    "local".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            relative_time: default_true(),
            date_format: DateFormat::default(),
            timezone: default_timezone(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: None,
            collapse_by_subject: default_true(),
        }
    }
}

impl BrowseConfig {
    pub fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::HideInAnimeLibraryItems => self.hide_in_anime_library_items,
            PreferenceKey::HideInMangaLibraryItems => self.hide_in_manga_library_items,
        }
    }

    pub fn set(&mut self, key: PreferenceKey, value: bool) {
        match key {
            PreferenceKey::HideInAnimeLibraryItems => self.hide_in_anime_library_items = value,
            PreferenceKey::HideInMangaLibraryItems => self.hide_in_manga_library_items = value,
        }
    }
}

impl UiConfig {
    pub fn day_boundary(&self) -> anyhow::Result<DayBoundary> {
        self.timezone
            .parse::<DayBoundary>()
            .map_err(|e| anyhow::anyhow!(e))
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config, falling back to defaults when the file doesn't exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.ui.day_boundary()?;

        if let Some(file) = &self.history.file {
            if file.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("history.file cannot be empty"));
            }
        }

        Ok(())
    }

    /// Resolve the UI flags the history screen renders with
    pub fn display_options(&self) -> anyhow::Result<DisplayOptions> {
        Ok(DisplayOptions {
            relative_time: self.ui.relative_time,
            date_format: self.ui.date_format,
            day_boundary: self.ui.day_boundary()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.ui.relative_time = false;
        config.ui.date_format = DateFormat::DayMonthNameYear;
        config.ui.timezone = "+09:00".to_string();
        config.browse.hide_in_manga_library_items = true;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.ui.relative_time, false);
        assert_eq!(loaded.ui.date_format, DateFormat::DayMonthNameYear);
        assert_eq!(loaded.browse.hide_in_manga_library_items, true);
        assert_eq!(loaded.browse.hide_in_anime_library_items, false);
        assert_eq!(loaded.history.collapse_by_subject, true);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[ui]\ndate_format = \"yyyy-MM-dd\"\ntimezone = \"UTC\"\n").unwrap();
        assert!(config.ui.relative_time);
        assert_eq!(config.ui.date_format, DateFormat::Iso);
        assert!(!config.browse.hide_in_anime_library_items);
        assert!(config.history.file.is_none());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        config.ui.timezone = "Moon/Base".to_string();
        assert!(config.validate().is_err());
        assert!(config.display_options().is_err());

        config.ui.timezone = "-03:00".to_string();
        assert!(config.validate().is_ok());
        let options = config.display_options().unwrap();
        assert_eq!(options.day_boundary, DayBoundary::Fixed(-3 * 3600));
        assert!(options.relative_time);
    }

    #[test]
    fn test_default_config_valid_with_named_tz() {
        std::env::set_var("TZ", "America/New_York");
        let config = Config::default();
        assert_eq!(config.ui.timezone, "local");
        assert!(config.validate().is_ok());
        assert_eq!(config.display_options().unwrap().day_boundary, DayBoundary::Local);
    }

    #[test]
    fn test_browse_get_set() {
        let mut browse = BrowseConfig::default();
        browse.set(PreferenceKey::HideInAnimeLibraryItems, true);
        assert!(browse.get(PreferenceKey::HideInAnimeLibraryItems));
        assert!(!browse.get(PreferenceKey::HideInMangaLibraryItems));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert!(config.history.collapse_by_subject);
    }
}

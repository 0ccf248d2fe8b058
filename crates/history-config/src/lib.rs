pub mod config;
pub mod paths;
pub mod preferences;

pub use config::{BrowseConfig, Config, HistoryConfig, UiConfig};
pub use paths::{container_base_path, PathManager};
pub use preferences::browse_preferences;

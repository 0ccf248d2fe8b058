use anyhow::Result;
use std::path::PathBuf;

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("WATCHLOG_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchlog");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_docker_env() -> Self {
        Self::from_base(container_base_path())
    }

    /// Config files at `base`, data and logs in subdirectories
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("watchlog.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container image creates the base directory, so its presence means we run in Docker
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base(PathBuf::from("/srv/watchlog"));
        assert_eq!(paths.config_file(), PathBuf::from("/srv/watchlog/config.toml"));
        assert_eq!(paths.history_file(), PathBuf::from("/srv/watchlog/data/history.json"));
        assert_eq!(paths.log_file(), PathBuf::from("/srv/watchlog/logs/watchlog.log"));
    }
}

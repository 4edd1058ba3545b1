use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "bookindex";
const CONFIG_FILE: &str = "config.json";

/// Index file used when neither `--file` nor the config names one
pub const FALLBACK_INDEX_FILE: &str = "index.txt";

/// Application configuration stored in the config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Index file used when `--file` is not given
    #[serde(default)]
    pub default_index_file: Option<PathBuf>,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_color() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_index_file: None,
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location, or return defaults if absent
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or return defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Index file to operate on: explicit choice, then config, then fallback
    pub fn index_file(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.default_index_file.clone())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_INDEX_FILE))
    }
}

/// Get the application config directory (XDG on Linux)
pub fn get_app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Get the path to the config file
pub fn get_config_path() -> Option<PathBuf> {
    get_app_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.color);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "color": false }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.color);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_index_file, None);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            default_index_file: Some(PathBuf::from("/books/atlas.txt")),
            color: false,
            log_level: "debug".to_string(),
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_index_file_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(config.index_file(None), PathBuf::from(FALLBACK_INDEX_FILE));

        config.default_index_file = Some(PathBuf::from("book.txt"));
        assert_eq!(config.index_file(None), PathBuf::from("book.txt"));
        assert_eq!(
            config.index_file(Some(PathBuf::from("other.txt"))),
            PathBuf::from("other.txt")
        );
    }
}

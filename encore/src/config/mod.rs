use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::models::UserProfile;
use crate::ui::theme::ThemePreference;

/// Settings persisted between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default)]
    pub profile: UserProfile,
}

/// Simple configuration manager backed by a JSON file.
/// Fields stored:
/// - "theme": preferred color scheme (light or dark)
/// - "profile": the user profile shown on the my-page screen
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager pointing at the default location.
    /// Does not touch the filesystem.
    pub fn new() -> Result<Self, anyhow::Error> {
        Ok(Self::with_path(Self::default_dir()?.join("config.json")))
    }

    /// Create a ConfigManager over an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted config, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load(&self) -> AppConfig {
        match self.read() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(?err, path = %self.path.display(), "Cannot load config, using defaults");
                AppConfig::default()
            }
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.path, data).context("Failed to write config file")?;
        Ok(())
    }

    /// Persist a new theme preference, keeping the rest of the config.
    pub fn set_theme(&self, theme: ThemePreference) -> Result<(), anyhow::Error> {
        let mut config = self.load();
        config.theme = theme;
        self.save(&config)
    }

    /// Persist a new profile, keeping the rest of the config.
    pub fn set_profile(&self, profile: &UserProfile) -> Result<(), anyhow::Error> {
        let mut config = self.load();
        config.profile = profile.clone();
        self.save(&config)
    }

    fn read(&self) -> Result<AppConfig, anyhow::Error> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }
        let data = fs::read_to_string(&self.path).context("Failed to read config file")?;
        let config = serde_json::from_str(&data).context("Failed to parse config file")?;
        Ok(config)
    }

    fn default_dir() -> Result<PathBuf, anyhow::Error> {
        // Check for custom config directory from environment variable
        if let Ok(custom_dir) = std::env::var("ENCORE_CONFIG_DIR") {
            let path = PathBuf::from(custom_dir);
            if path.is_absolute() {
                return Ok(path);
            }
            tracing::warn!("ENCORE_CONFIG_DIR is not an absolute path, using default");
        }
        let base_dir = dirs::config_dir()
            .or_else(|| dirs::data_dir())
            .context("Failed to determine config directory")?;
        Ok(base_dir.join(crate::APP_DIR_NAME))
    }
}

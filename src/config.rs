// Application configuration - `config.ron` in the user's config directory

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "myreps";
pub const CONFIG_FILE_NAME: &str = "config.ron";
/// Overrides the directory `config.ron` is read from
pub const CONFIG_DIR_ENV: &str = "MYREPS_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot determine the configuration directory")]
    CannotDetermineConfigDir,

    #[error("Cannot determine the data directory")]
    CannotDetermineDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Failed to serialize configuration: {0}")]
    Serialization(#[from] ron::Error),
}

/// Cue audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Linear gain applied to every pulse, 0.0 to 1.0
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where sessions are stored; None means `<data_dir>/myreps`
    pub data_dir: Option<PathBuf>,
    pub audio: AudioConfig,
    pub keep_screen_awake: bool,
    /// `tracing` filter directive used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            audio: AudioConfig::default(),
            keep_screen_awake: true,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default location
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_dir()?)
    }

    /// Load `config.ron` from `dir`
    /// A missing file yields the defaults, which are also written to `dir`.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Self::from_ron(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First run: write the defaults out so there is a file to edit
                let config = Self::default();
                match config.save_to(dir) {
                    Ok(()) => tracing::info!(path = %path.display(), "wrote default configuration"),
                    Err(e) => tracing::debug!(error = %e, "could not write default configuration"),
                }
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Write this configuration to `dir/config.ron`
    pub fn save_to(&self, dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(dir)?;
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(dir.join(CONFIG_FILE_NAME), text)?;
        Ok(())
    }

    /// Directory holding the session file
    pub fn resolved_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(ConfigError::CannotDetermineDataDir),
        }
    }
}

/// `$MYREPS_CONFIG_DIR`, or `<config_dir>/myreps`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::CannotDetermineConfigDir)
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::{DEFAULT_GRID_SIZE, GridSize};

pub const SETTINGS_DIR_NAME: &str = "memory-game";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;
const MAX_MISMATCH_DELAY_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub default_grid_size: u8,
    pub mismatch_delay_ms: u64,
    pub lock_solved_cards: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_grid_size: DEFAULT_GRID_SIZE,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            lock_solved_cards: false,
        }
    }
}

impl Settings {
    /// Path of the settings file under the user's config directory.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Settings =
            serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like `load`, but any failure is logged and replaced by the defaults.
    pub fn load_or_default(path: &Path) -> Settings {
        match Settings::load(path) {
            Ok(settings) => {
                log::debug!("settings loaded from {}: {:?}", path.display(), settings);
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Settings::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        GridSize::new(self.default_grid_size as i64).map_err(|err| SettingsError::Invalid {
            field: "default_grid_size",
            message: err.to_string(),
        })?;
        if self.mismatch_delay_ms > MAX_MISMATCH_DELAY_MS {
            return Err(SettingsError::Invalid {
                field: "mismatch_delay_ms",
                message: format!(
                    "{} exceeds {MAX_MISMATCH_DELAY_MS}",
                    self.mismatch_delay_ms
                ),
            });
        }
        Ok(())
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.default_grid_size as i64).unwrap_or_default()
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }
}

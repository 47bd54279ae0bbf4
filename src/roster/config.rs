use crate::error::{Result, RosterError};
use crate::store::persist::DEFAULT_STORAGE_KEY;
use crate::view::DEFAULT_OVERFLOW_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEY_STORAGE_KEY: &str = "storage-key";
pub const KEY_OVERFLOW_THRESHOLD: &str = "overflow-threshold";
pub const KEY_CONFIRM_DELETE: &str = "confirm-delete";

/// Configuration for roster, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    /// Name of the slot the roster is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Table height (in rendered lines for the CLI) above which the table scrolls
    #[serde(default = "default_overflow_threshold")]
    pub overflow_threshold: usize,

    /// Ask before deleting a record
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_overflow_threshold() -> usize {
    DEFAULT_OVERFLOW_THRESHOLD
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            overflow_threshold: default_overflow_threshold(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RosterError::Io)?;
        let config: RosterConfig =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RosterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RosterError::Serialization)?;
        fs::write(config_path, content).map_err(RosterError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_STORAGE_KEY => Some(self.storage_key.clone()),
            KEY_OVERFLOW_THRESHOLD => Some(self.overflow_threshold.to_string()),
            KEY_CONFIRM_DELETE => Some(self.confirm_delete.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            KEY_STORAGE_KEY => {
                let valid = !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if !valid {
                    return Err(RosterError::Config(format!(
                        "{} must be letters, digits, '_' or '-', got '{}'",
                        KEY_STORAGE_KEY, value
                    )));
                }
                self.storage_key = value.to_string();
            }
            KEY_OVERFLOW_THRESHOLD => {
                self.overflow_threshold = value.parse().map_err(|_| {
                    RosterError::Config(format!(
                        "{} must be a non-negative number, got '{}'",
                        KEY_OVERFLOW_THRESHOLD, value
                    ))
                })?;
            }
            KEY_CONFIRM_DELETE => {
                self.confirm_delete = value.parse().map_err(|_| {
                    RosterError::Config(format!(
                        "{} must be true or false, got '{}'",
                        KEY_CONFIRM_DELETE, value
                    ))
                })?;
            }
            other => {
                return Err(RosterError::Config(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_STORAGE_KEY, self.storage_key.clone()),
            (KEY_OVERFLOW_THRESHOLD, self.overflow_threshold.to_string()),
            (KEY_CONFIRM_DELETE, self.confirm_delete.to_string()),
        ]
    }
}

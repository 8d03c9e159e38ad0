//! TOML-based application configuration.
//!
//! Stores client preferences including:
//! - API endpoint and request timeout
//! - Where the bearer token is kept (local store file or OS keyring)
//! - Default calendar view
//! - Day-grid geometry for the visual day timeline
//! - Focus display refresh interval
//!
//! Configuration is stored at `~/.config/focusflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::ViewMode;
use crate::error::{ConfigError, CoreError, Result};
use crate::timeline::MAX_PIXELS_PER_HOUR;

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Backend used to persist the bearer token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// `local_storage.json` in the data directory
    #[default]
    File,
    /// OS keyring
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub token_backend: TokenBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub default_view: ViewMode,
}

/// Geometry of the visual day timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGridConfig {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default = "default_pixels_per_hour")]
    pub pixels_per_hour: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Refresh interval of `focus watch`, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub day_grid: DayGridConfig,
    #[serde(default)]
    pub focus: FocusConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:8000".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_start_hour() -> u32 {
    6
}
fn default_end_hour() -> u32 {
    22
}
fn default_pixels_per_hour() -> u32 {
    60
}
fn default_tick_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Month,
        }
    }
}

impl Default for DayGridConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            pixels_per_hour: default_pixels_per_hour(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of `config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// `FOCUSFLOW_API_URL` overrides `api.base_url` for this process.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&Self::path()?)?;
        if let Ok(url) = std::env::var("FOCUSFLOW_API_URL") {
            if !url.trim().is_empty() {
                cfg.api.base_url = url;
            }
        }
        Ok(cfg)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                CoreError::Config(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if the key is
    /// unknown or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Cross-field checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.day_grid;
        if grid.start_hour >= grid.end_hour || grid.end_hour > 24 {
            return Err(ConfigError::InvalidValue {
                key: "day_grid".into(),
                message: format!(
                    "start_hour ({}) must be before end_hour ({}) within 0..=24",
                    grid.start_hour, grid.end_hour
                ),
            });
        }
        if grid.pixels_per_hour == 0 || grid.pixels_per_hour > MAX_PIXELS_PER_HOUR {
            return Err(ConfigError::InvalidValue {
                key: "day_grid.pixels_per_hour".into(),
                message: format!("must be between 1 and {MAX_PIXELS_PER_HOUR}"),
            });
        }
        if self.focus.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "focus.tick_ms".into(),
                message: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, "http://localhost:8000");
        assert_eq!(parsed.calendar.default_view, ViewMode::Month);
        assert_eq!(parsed.auth.token_backend, TokenBackend::File);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config =
            toml::from_str("[api]\nbase_url = \"https://api.example.com\"\n").unwrap();
        assert_eq!(parsed.api.base_url, "https://api.example.com");
        assert_eq!(parsed.api.timeout_secs, 15);
        assert_eq!(parsed.day_grid.start_hour, 6);
        assert_eq!(parsed.focus.tick_ms, 1000);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("day_grid.end_hour").as_deref(), Some("22"));
        assert_eq!(cfg.get("auth.token_backend").as_deref(), Some("file"));
        assert!(cfg.get("api.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_and_string_fields() {
        let mut cfg = Config::default();
        cfg.set("api.timeout_secs", "30").unwrap();
        cfg.set("api.base_url", "https://planner.example.com").unwrap();
        cfg.set("calendar.default_view", "agenda").unwrap();
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.api.base_url, "https://planner.example.com");
        assert_eq!(cfg.calendar.default_view, ViewMode::Agenda);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("api.nonexistent", "x").is_err());
        assert!(cfg.set("api.timeout_secs", "soon").is_err());
        assert!(cfg.set("auth.token_backend", "floppy").is_err());
        assert!(cfg.set("day_grid.start_hour", "23").is_err());
        assert_eq!(cfg.day_grid.start_hour, 6);
    }

    #[test]
    fn set_rejects_oversized_pixels_per_hour() {
        let mut cfg = Config::default();
        cfg.set("day_grid.start_hour", "0").unwrap();
        assert!(cfg.set("day_grid.pixels_per_hour", "500000000").is_err());
        assert!(cfg.set("day_grid.pixels_per_hour", "0").is_err());
        cfg.set("day_grid.pixels_per_hour", "10000").unwrap();
        assert_eq!(cfg.day_grid.pixels_per_hour, MAX_PIXELS_PER_HOUR);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api.timeout_secs, 15);
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("focus.tick_ms", "500").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().focus.tick_ms, 500);
    }

    #[test]
    fn load_from_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

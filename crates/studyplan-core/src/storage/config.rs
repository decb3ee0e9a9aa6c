//! TOML-based application configuration.
//!
//! Stores the planner preferences the allocation engine is invoked with:
//! daily study-hour budget, preferred start/end times and break duration.
//! Configuration is stored at `~/.config/studyplan/config.toml`.
//!
//! The engine itself never reads this; [`Config::preferences`] is the
//! validation boundary that turns the stored form into an
//! [`engine::Preferences`](crate::engine::Preferences) value.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::engine::{parse_hhmm, Preferences};
use crate::error::{ConfigError, ValidationError};

/// Planner-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_study_hours")]
    pub study_hours_per_day: u32,
    /// HH:MM
    #[serde(default = "default_start_time")]
    pub preferred_start_time: String,
    /// HH:MM, informational: plans running past it produce a warning
    #[serde(default = "default_end_time")]
    pub preferred_end_time: String,
    #[serde(default = "default_break_minutes")]
    pub break_duration_minutes: u32,
}

// Default functions
fn default_study_hours() -> u32 {
    4
}
fn default_start_time() -> String {
    "09:00".into()
}
fn default_end_time() -> String {
    "21:00".into()
}
fn default_break_minutes() -> u32 {
    15
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            study_hours_per_day: default_study_hours(),
            preferred_start_time: default_start_time(),
            preferred_end_time: default_end_time(),
            break_duration_minutes: default_break_minutes(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl Config {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/studyplan"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/studyplan"),
            message: e.to_string(),
        })?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error for unknown
    /// keys or unparseable values.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "planner.study_hours_per_day" => {
                self.planner.study_hours_per_day = parse_value(key, value)?;
            }
            "planner.preferred_start_time" => {
                parse_hhmm("preferred_start_time", value).map_err(|e| {
                    ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    }
                })?;
                self.planner.preferred_start_time = value.to_string();
            }
            "planner.preferred_end_time" => {
                parse_hhmm("preferred_end_time", value).map_err(|e| {
                    ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    }
                })?;
                self.planner.preferred_end_time = value.to_string();
            }
            "planner.break_duration_minutes" => {
                self.planner.break_duration_minutes = parse_value(key, value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }

    /// Parse and validate the stored planner preferences into the engine's
    /// input form.
    ///
    /// # Errors
    ///
    /// Returns an error if a time string is malformed or the study-hour
    /// budget is out of range.
    pub fn preferences(&self) -> Result<Preferences, ValidationError> {
        let prefs = Preferences {
            study_hours_per_day: self.planner.study_hours_per_day,
            preferred_start: parse_hhmm("preferred_start_time", &self.planner.preferred_start_time)?,
            preferred_end: parse_hhmm("preferred_end_time", &self.planner.preferred_end_time)?,
            break_minutes: self.planner.break_duration_minutes,
        };
        prefs.validate()?;
        Ok(prefs)
    }
}

fn parse_value(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as number"),
    })
}

//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The profile selected at startup
//! - The editable custom profile (minutes)
//! - Notification preferences
//!
//! Configuration is stored at `~/.config/studypal/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{CustomProfileUpdate, ModeCatalog, ProfileName, TimerEngine};

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_profile")]
    pub default_profile: ProfileName,
}

/// Custom profile, in whole minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomConfig {
    #[serde(default = "default_work_min")]
    pub work_min: u64,
    #[serde(default = "default_short_break_min")]
    pub short_break_min: u64,
    #[serde(default = "default_long_break_min")]
    pub long_break_min: u64,
    #[serde(default = "default_cycles_per_long_break")]
    pub cycles_per_long_break: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell on phase completion.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studypal/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub custom: CustomConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_profile() -> ProfileName {
    ProfileName::Intermediate
}
fn default_work_min() -> u64 {
    25
}
fn default_short_break_min() -> u64 {
    5
}
fn default_long_break_min() -> u64 {
    15
}
fn default_cycles_per_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_profile: default_profile(),
        }
    }
}

impl Default for CustomConfig {
    fn default() -> Self {
        Self {
            work_min: default_work_min(),
            short_break_min: default_short_break_min(),
            long_break_min: default_long_break_min(),
            cycles_per_long_break: default_cycles_per_long_break(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

impl CustomConfig {
    pub fn to_update(&self) -> CustomProfileUpdate {
        CustomProfileUpdate {
            work_min: Some(self.work_min),
            short_break_min: Some(self.short_break_min),
            long_break_min: Some(self.long_break_min),
            cycles_per_long_break: Some(self.cycles_per_long_break),
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

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot set a whole section".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "config saved");
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

    /// Set a config value by dot-separated key. The change is validated but
    /// not written; call [`Config::save`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Build the mode catalog with the configured custom profile.
    pub fn catalog(&self) -> Result<ModeCatalog, ConfigError> {
        Ok(ModeCatalog::with_custom(&self.custom.to_update())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog().map(|_| ())
    }

    /// Idle engine on `profile`, or on `timer.default_profile` when `None`.
    pub fn build_engine(&self, profile: Option<&str>) -> crate::error::Result<TimerEngine> {
        let catalog = self.catalog()?;
        let name = match profile {
            Some(name) => name.parse::<ProfileName>()?,
            None => self.timer.default_profile,
        };
        Ok(TimerEngine::new(catalog, name))
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
        assert_eq!(parsed.timer.default_profile, ProfileName::Intermediate);
        assert_eq!(parsed.custom.work_min, 25);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[custom]\nwork_min = 50\n").unwrap();
        assert_eq!(parsed.custom.work_min, 50);
        assert_eq!(parsed.custom.short_break_min, 5);
        assert_eq!(parsed.timer.default_profile, ProfileName::Intermediate);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("custom.work_min").as_deref(), Some("25"));
        assert_eq!(cfg.get("notifications.bell").as_deref(), Some("true"));
        assert_eq!(
            cfg.get("timer.default_profile").as_deref(),
            Some("INTERMEDIATE")
        );
        assert!(cfg.get("custom.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("custom.cycles_per_long_break", "3").unwrap();
        cfg.set("notifications.enabled", "false").unwrap();
        cfg.set("timer.default_profile", "PRO").unwrap();
        assert_eq!(cfg.custom.cycles_per_long_break, 3);
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.timer.default_profile, ProfileName::Pro);
    }

    #[test]
    fn profile_names_are_case_insensitive() {
        let mut cfg = Config::default();
        cfg.set("timer.default_profile", "pro").unwrap();
        assert_eq!(cfg.timer.default_profile, ProfileName::Pro);
        assert_eq!(cfg.get("timer.default_profile").as_deref(), Some("PRO"));

        let parsed: Config =
            toml::from_str("[timer]\ndefault_profile = \"beginner\"\n").unwrap();
        assert_eq!(parsed.timer.default_profile, ProfileName::Beginner);

        assert!(matches!(
            cfg.set("timer.default_profile", "expert"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.timer.default_profile, ProfileName::Pro);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("custom.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("nope.work_min", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.bell", "loud").is_err());
        assert!(cfg.set("custom.work_min", "-5").is_err());
        assert!(cfg.set("timer.default_profile", "EXPERT").is_err());
        assert_eq!(cfg.timer.default_profile, ProfileName::Intermediate);
    }

    #[test]
    fn set_rejects_zero_minutes_and_keeps_old_value() {
        let mut cfg = Config::default();
        let err = cfg.set("custom.short_break_min", "0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.custom.short_break_min, 5);
    }

    #[test]
    fn catalog_uses_custom_minutes() {
        let mut cfg = Config::default();
        cfg.custom.work_min = 45;
        let catalog = cfg.catalog().unwrap();
        assert_eq!(catalog.custom().work_secs, 2700);
    }

    #[test]
    fn build_engine_honours_default_and_override() {
        let mut cfg = Config::default();
        cfg.timer.default_profile = ProfileName::Beginner;
        let engine = cfg.build_engine(None).unwrap();
        assert_eq!(engine.profile().name, ProfileName::Beginner);
        assert_eq!(engine.remaining_secs(), 600);

        let engine = cfg.build_engine(Some("pro")).unwrap();
        assert_eq!(engine.remaining_secs(), 3600);

        assert!(matches!(
            cfg.build_engine(Some("turbo")),
            Err(crate::error::CoreError::Timer(_))
        ));
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.custom.long_break_min = 30;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.custom.long_break_min, 30);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[custom]\ncycles_per_long_break = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not = [toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}

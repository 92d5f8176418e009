//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

use super::Preset;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub default_preset: Option<Preset>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertConfig {
    pub audio_bell: bool,
    pub desktop_notifications: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::Validation("Version cannot be empty".to_string()));
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Turn off every alert side effect.
    pub fn mute(&mut self) {
        self.alerts.audio_bell = false;
        self.alerts.desktop_notifications = false;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            alerts: AlertConfig::default(),
            default_preset: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AlertConfig {
    pub fn any_enabled(&self) -> bool {
        self.audio_bell || self.desktop_notifications
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            audio_bell: true,
            desktop_notifications: true,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0.0");
        assert!(config.default_preset.is_none());
        assert!(config.alerts.any_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_validation() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mute() {
        let mut config = Config::default();
        config.mute();
        assert!(!config.alerts.audio_bell);
        assert!(!config.alerts.desktop_notifications);
        assert!(!config.alerts.any_enabled());
    }

    #[test]
    fn test_default_preset_must_be_a_preset() {
        let json = r#"{"version":"1.0.0","default_preset":360}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_preset, Some(Preset::SixMinutes));
        assert_eq!(config.alerts, AlertConfig::default());

        let json = r#"{"version":"1.0.0","default_preset":365}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::monitor::DEFAULT_POLL_INTERVAL_SECS;

/// Main fitlock configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Unlock session settings
    #[serde(default)]
    pub unlock: UnlockSettings,

    /// Notification monitor settings
    #[serde(default)]
    pub monitor: MonitorSettings,

    /// Rating prompt settings
    #[serde(default)]
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unlock: UnlockSettings::default(),
            monitor: MonitorSettings::default(),
            rating: RatingSettings::default(),
        }
    }
}

/// How much screen time a workout earns
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnlockSettings {
    /// Minutes granted for a completed workout
    #[serde(default = "default_unlock_minutes")]
    pub default_unlock_minutes: u32,

    /// Minutes added by an extension
    #[serde(default = "default_extend_minutes")]
    pub extend_minutes: u32,
}

impl Default for UnlockSettings {
    fn default() -> Self {
        Self {
            default_unlock_minutes: default_unlock_minutes(),
            extend_minutes: default_extend_minutes(),
        }
    }
}

fn default_unlock_minutes() -> u32 {
    30
}

fn default_extend_minutes() -> u32 {
    15
}

/// Notification monitor settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorSettings {
    /// Seconds between notification polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// Rating prompt settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingSettings {
    /// Whether to ever show the rating prompt
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Workouts to complete before the prompt is offered
    #[serde(default = "default_prompt_after_workouts")]
    pub prompt_after_workouts: u32,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            prompt_after_workouts: default_prompt_after_workouts(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_prompt_after_workouts() -> u32 {
    5
}

/// Per-user location of the config file.
pub fn default_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "fitlock")
        .context("Failed to determine platform directories")?;
    Ok(dirs.config_dir().join("config.yaml"))
}

/// Load configuration from YAML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_or_default(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    load_config(path)
}

/// Save configuration to YAML file
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    // Validate before saving
    validate_config(config)?;

    let content =
        serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    crate::platform::common::atomic_write(path, content.as_bytes())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.unlock.default_unlock_minutes == 0 {
        anyhow::bail!("unlock.default_unlock_minutes must be greater than zero");
    }

    if config.unlock.extend_minutes == 0 {
        anyhow::bail!("unlock.extend_minutes must be greater than zero");
    }

    if config.monitor.poll_interval_secs == 0 {
        anyhow::bail!("monitor.poll_interval_secs must be greater than zero");
    }

    if config.rating.enabled && config.rating.prompt_after_workouts == 0 {
        anyhow::bail!("rating.prompt_after_workouts must be greater than zero");
    }

    Ok(())
}

/// Example configuration (embedded in binary)
pub const EXAMPLE_CONFIG: &str = include_str!("../example-config.yaml");

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();

        validate_config(&config).unwrap();
        assert_eq!(config.unlock.default_unlock_minutes, 30);
        assert_eq!(config.unlock.extend_minutes, 15);
        assert_eq!(config.monitor.poll_interval_secs, 2);
        assert!(config.rating.enabled);
        assert_eq!(config.rating.prompt_after_workouts, 5);
    }

    #[test]
    fn test_example_config_parses_and_validates() {
        let config: AppConfig = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();

        validate_config(&config).unwrap();
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "unlock:\n  default_unlock_minutes: 45\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.unlock.default_unlock_minutes, 45);
        // Everything unspecified falls back to defaults.
        assert_eq!(config.unlock.extend_minutes, 15);
        assert_eq!(config.monitor.poll_interval_secs, 2);
    }

    #[test]
    fn test_zero_unlock_minutes_rejected() {
        let yaml = "unlock:\n  default_unlock_minutes: 0\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let yaml = "monitor:\n  poll_interval_secs: 0\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = AppConfig::default();
        config.unlock.default_unlock_minutes = 20;
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.unlock.default_unlock_minutes, 20);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing.yaml");

        let config = load_or_default(&path).unwrap();
        assert_eq!(config.unlock.default_unlock_minutes, 30);
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = AppConfig::default();
        config.monitor.poll_interval_secs = 0;

        assert!(save_config(&path, &config).is_err());
        assert!(!path.exists());
    }
}

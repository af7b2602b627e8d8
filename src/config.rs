//! Application-level configuration loading, including enrollment and seeding knobs.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "COURTSIDE_CONFIG_PATH";
/// Enrollment cap applied when the configuration does not provide one.
const DEFAULT_MAX_PARTICIPANTS: usize = 64;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    max_participants: usize,
    shuffle_unseeded: bool,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        max_participants = app_config.max_participants,
                        shuffle_unseeded = app_config.shuffle_unseeded,
                        "loaded bracket configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Enrollment cap applied to every tournament.
    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    /// Whether unseeded participants are shuffled before pairing.
    pub fn shuffle_unseeded(&self) -> bool {
        self.shuffle_unseeded
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            shuffle_unseeded: true,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    max_participants: Option<usize>,
    shuffle_unseeded: Option<bool>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            max_participants: value.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS),
            shuffle_unseeded: value.shuffle_unseeded.unwrap_or(true),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let raw: RawConfig = serde_json::from_str("{}").unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.max_participants(), DEFAULT_MAX_PARTICIPANTS);
        assert!(config.shuffle_unseeded());
    }

    #[test]
    fn provided_fields_override_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"max_participants": 16, "shuffle_unseeded": false}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.max_participants(), 16);
        assert!(!config.shuffle_unseeded());
    }
}

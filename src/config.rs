use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "chatapp.json";
pub const DEFAULT_DATA_FILE: &str = "userdata.txt";
pub const DEFAULT_LOG_FILE: &str = "chatapp.log";

/// What a register/login form does when a field is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFailurePolicy {
    /// Drop everything entered so far and go back to the main menu.
    #[default]
    Abort,
    /// Ask for the rejected field again.
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    /// `env_logger` filter, e.g. `trace` or `info`.
    pub log_level: String,
    pub form_failure: FormFailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: "trace".to_string(),
            form_failure: FormFailurePolicy::Abort,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A missing file is not an error; it simply means defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str::<AppConfig>(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(dir.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_file, PathBuf::from("userdata.txt"));
        assert_eq!(config.log_file, PathBuf::from("chatapp.log"));
    }

    #[test]
    fn partial_file_fills_remaining_fields_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chatapp.json");
        fs::write(&path, r#"{"form_failure": "retry", "log_level": "info"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.form_failure, FormFailurePolicy::Retry);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chatapp.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chatapp.json");
        fs::write(&path, r#"{"form_failure": "sometimes"}"#).unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}

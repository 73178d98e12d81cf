// config.rs — Check-in configuration.
//
// `for_project()` lays out state under a `.summit/` directory in the
// project root. An optional `.summit/config.toml` overrides the capacity
// and storage key:
//
//   capacity = 50
//   storage_key = "intel_summit_checkins_v2"

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CheckInError;
use crate::state::DEFAULT_CAPACITY;

/// Storage key used when the config file doesn't name one.
pub const DEFAULT_STORAGE_KEY: &str = "intel_summit_checkins_v2";

/// Where check-in state lives and how big the event is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// Directory holding the roster blob (one JSON file per storage key).
    pub data_dir: PathBuf,

    /// Path to the JSONL event log.
    pub events_log: PathBuf,

    /// Path to the optional TOML overrides file.
    pub config_file: PathBuf,

    /// Maximum number of check-ins.
    pub capacity: usize,

    /// Key naming the roster blob in the store.
    pub storage_key: String,
}

/// Fields `.summit/config.toml` may set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOverrides {
    capacity: Option<usize>,
    storage_key: Option<String>,
}

impl CheckInConfig {
    /// Create a config with the standard `.summit/` layout and defaults.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let summit_dir = root.join(".summit");
        Self {
            project_root: root,
            data_dir: summit_dir.join("data"),
            events_log: summit_dir.join("events.jsonl"),
            config_file: summit_dir.join("config.toml"),
            capacity: DEFAULT_CAPACITY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Standard layout plus any overrides from `.summit/config.toml`.
    /// A missing file means defaults.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, CheckInError> {
        let mut config = Self::for_project(project_root);
        if config.config_file.exists() {
            let path = config.config_file.display().to_string();
            let content =
                fs::read_to_string(&config.config_file).map_err(|source| CheckInError::IoError {
                    path: path.clone(),
                    source,
                })?;
            let overrides: FileOverrides = toml::from_str(&content)
                .map_err(|source| CheckInError::ConfigParse { path, source })?;
            if let Some(capacity) = overrides.capacity {
                config.capacity = capacity;
            }
            if let Some(key) = overrides.storage_key {
                config.storage_key = key;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply a command-line capacity override.
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Result<Self, CheckInError> {
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), CheckInError> {
        if self.capacity == 0 {
            return Err(CheckInError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        let key = self.storage_key.trim();
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(CheckInError::InvalidConfig(format!(
                "storage_key '{}' must be a non-empty file name",
                self.storage_key
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn for_project_layout() {
        let config = CheckInConfig::for_project("/tmp/event");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/event/.summit/data"));
        assert_eq!(
            config.events_log,
            PathBuf::from("/tmp/event/.summit/events.jsonl")
        );
        assert_eq!(config.capacity, 50);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = CheckInConfig::load(dir.path()).unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn load_applies_overrides() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".summit")).unwrap();
        fs::write(
            dir.path().join(".summit/config.toml"),
            "capacity = 12\nstorage_key = \"spring_meetup\"\n",
        )
        .unwrap();

        let config = CheckInConfig::load(dir.path()).unwrap();
        assert_eq!(config.capacity, 12);
        assert_eq!(config.storage_key, "spring_meetup");
    }

    #[test]
    fn zero_capacity_rejected() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".summit")).unwrap();
        fs::write(dir.path().join(".summit/config.toml"), "capacity = 0\n").unwrap();
        assert!(matches!(
            CheckInConfig::load(dir.path()),
            Err(CheckInError::InvalidConfig(_))
        ));

        let config = CheckInConfig::for_project(dir.path());
        assert!(config.with_capacity(Some(0)).is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".summit")).unwrap();
        fs::write(dir.path().join(".summit/config.toml"), "capacity = \"lots\"\n").unwrap();
        assert!(matches!(
            CheckInConfig::load(dir.path()),
            Err(CheckInError::ConfigParse { .. })
        ));
    }

    #[test]
    fn cli_override_wins() {
        let config = CheckInConfig::for_project("/tmp/event")
            .with_capacity(Some(5))
            .unwrap();
        assert_eq!(config.capacity, 5);
    }
}

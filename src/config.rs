// src/config.rs
//! Viewer configuration
//!
//! Optional TOML file, every key defaulted:
//!
//! ```toml
//! copy_chunk_size = 65536
//! progress_interval_ms = 20
//! directory_mode = 0o750
//! dedupe_naked_domains = true
//! timestamps = "local"        # or "utc"
//! csv_file_name = "Manifest.csv"
//! ```
//!
//! Lookup order: an explicit path, then `$MANIFESTDB_CONFIG`, then
//! `<config_dir>/manifestdb/config.toml`.

use crate::error::{Error, Result};
use crate::extract::ExtractOptions;
use crate::filesystem::{DEFAULT_CHUNK_SIZE, DEFAULT_DIR_MODE};
use crate::metadata::TimestampZone;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "MANIFESTDB_CONFIG";

/// Default CSV file name when exporting into a directory
pub const DEFAULT_CSV_FILE_NAME: &str = "Manifest.csv";

/// Default progress polling cadence
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Chunk size in bytes for streamed copies
    pub copy_chunk_size: usize,

    /// Progress observer polling interval
    pub progress_interval_ms: u64,

    /// Mode for directories created under an extraction destination
    pub directory_mode: u32,

    /// Collapse repeated names in the naked-domain list
    pub dedupe_naked_domains: bool,

    /// Zone for rendering metadata timestamps
    pub timestamps: TimestampZone,

    pub csv_file_name: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            copy_chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            directory_mode: DEFAULT_DIR_MODE,
            dedupe_naked_domains: true,
            timestamps: TimestampZone::default(),
            csv_file_name: DEFAULT_CSV_FILE_NAME.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content).map_err(|e| {
            Error::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, or fall back to the default location
    ///
    /// An explicit path (argument or environment) must exist. The default
    /// location is optional.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.copy_chunk_size == 0 {
            return Err(Error::Config("copy_chunk_size must be greater than 0".to_string()));
        }
        if self.progress_interval_ms == 0 {
            return Err(Error::Config(
                "progress_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.csv_file_name.is_empty() || self.csv_file_name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "csv_file_name must be a plain file name, got '{}'",
                self.csv_file_name
            )));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            chunk_size: self.copy_chunk_size,
            dir_mode: self.directory_mode,
        }
    }
}

/// `<config_dir>/manifestdb/config.toml`, if the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("manifestdb").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.copy_chunk_size, 65536);
        assert_eq!(config.progress_interval(), Duration::from_millis(20));
        assert_eq!(config.directory_mode, 0o750);
        assert!(config.dedupe_naked_domains);
        assert_eq!(config.timestamps, TimestampZone::Local);
        assert_eq!(config.csv_file_name, "Manifest.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config = ViewerConfig::from_toml(
            r#"
copy_chunk_size = 1024
timestamps = "utc"
dedupe_naked_domains = false
"#,
        )
        .unwrap();
        assert_eq!(config.copy_chunk_size, 1024);
        assert_eq!(config.timestamps, TimestampZone::Utc);
        assert!(!config.dedupe_naked_domains);
        assert_eq!(config.progress_interval_ms, 20);
        assert_eq!(config.extract_options().chunk_size, 1024);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ViewerConfig::from_toml("copy_chunk_size = 0").is_err());
        assert!(ViewerConfig::from_toml("progress_interval_ms = 0").is_err());
        assert!(ViewerConfig::from_toml("csv_file_name = \"a/b.csv\"").is_err());
        assert!(ViewerConfig::from_toml("timestamps = \"mars\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "csv_file_name = \"files.csv\"\n").unwrap();

        let config = ViewerConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.csv_file_name, "files.csv");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ViewerConfig::load_or_default(Some(&temp_dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

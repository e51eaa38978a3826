//! core::config
//!
//! User configuration: loading, recovery, and persistence.
//!
//! # Location
//!
//! 1. `$XE_CONFIG` if set
//! 2. `~/.xerc` (canonical)
//!
//! # Lifecycle
//!
//! A [`ConfigStore`] is loaded once per process and handed by reference to
//! everything that needs it. External edits made while a command runs are not
//! observed. Every mutating method writes the file before returning.
//!
//! - Missing file: defaults are written.
//! - Unreadable JSON (bad syntax, bad encoding, not an object): a warning is
//!   logged, and defaults replace it on disk.
//! - Valid JSON with unusable fields: each one is logged and takes its
//!   default in memory. The file is left for the user to fix.
//!
//! Concurrent invocations can still race on the read-modify-write.
//!
//! # Example
//!
//! ```no_run
//! use xe_cli::core::config::ConfigStore;
//!
//! let mut store = ConfigStore::load().unwrap();
//! store.add_alias("b", "run build").unwrap();
//! assert_eq!(store.config().aliases["b"], "run build");
//! ```

pub mod schema;

pub use schema::{
    Extension, Extensions, Features, PmPreference, RejectedField, XeConfig, SCHEMA_VERSION,
};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "XE_CONFIG";

/// Config file name in the home directory.
pub const CONFIG_FILE: &str = ".xerc";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// How the store came to hold its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Read from an existing file.
    Loaded,
    /// No file existed; defaults were written.
    Created,
    /// Some fields were unusable and took their defaults; the rest were kept.
    Repaired,
    /// The file was malformed; defaults were written over it.
    Recovered,
}

/// The process-wide user configuration and where it lives.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: XeConfig,
    path: PathBuf,
    status: LoadStatus,
}

impl ConfigStore {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path()?)
    }

    /// Load from `path`, creating or repairing the file as needed.
    ///
    /// # Errors
    ///
    /// Fails only on I/O errors. Decode and parse errors are recovered with
    /// defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            let store = Self {
                config: XeConfig::default(),
                path,
                status: LoadStatus::Created,
            };
            store.save()?;
            return Ok(store);
        }

        let bytes = fs::read(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let merged = serde_json::from_slice::<serde_json::Value>(&bytes)
            .map_err(|e| e.to_string())
            .and_then(|value| {
                XeConfig::merge_over_defaults(&value)
                    .ok_or_else(|| "expected a JSON object".to_string())
            });

        match merged {
            Ok((config, rejected)) => {
                for field in &rejected {
                    warn!(
                        "Ignoring '{}' in config file '{}', using the default: {}",
                        field.key,
                        path.display(),
                        field.reason
                    );
                }
                let status = if rejected.is_empty() {
                    LoadStatus::Loaded
                } else {
                    LoadStatus::Repaired
                };
                debug!("Config loaded from: {}", path.display());
                Ok(Self {
                    config,
                    path,
                    status,
                })
            }
            Err(reason) => {
                warn!(
                    "Failed to parse config file '{}', using defaults: {}",
                    path.display(),
                    reason
                );
                let store = Self {
                    config: XeConfig::default(),
                    path,
                    status: LoadStatus::Recovered,
                };
                store.save()?;
                Ok(store)
            }
        }
    }

    /// Get the config path: `$XE_CONFIG`, else `~/.xerc`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_FILE))
    }

    /// The loaded configuration.
    pub fn config(&self) -> &XeConfig {
        &self.config
    }

    /// Where the configuration is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the configuration was obtained at load time.
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Write the configuration atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn save(&self) -> Result<(), ConfigError> {
        let write_error = |path: &Path, e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(&self.path, e))?;
        }

        let mut contents = serde_json::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        contents.push('\n');

        let mut temp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CONFIG_FILE.into());
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        let mut file = fs::File::create(&temp_path).map_err(|e| write_error(&temp_path, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| write_error(&temp_path, e))?;
        file.sync_all().map_err(|e| write_error(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| write_error(&self.path, e))?;

        debug!("Config saved to: {}", self.path.display());
        Ok(())
    }

    // =========================================================================
    // Mutations (each one persists before returning)
    // =========================================================================

    /// Enable or disable an extension.
    pub fn set_extension(&mut self, extension: Extension, enabled: bool) -> Result<(), ConfigError> {
        self.config.extensions.set(extension, enabled);
        self.save()
    }

    /// Add or replace an alias.
    pub fn add_alias(&mut self, name: &str, replacement: &str) -> Result<(), ConfigError> {
        schema::validate_name(name)?;
        if replacement.trim().is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "alias '{}' needs a non-empty replacement",
                name
            )));
        }
        self.config
            .aliases
            .insert(name.to_string(), replacement.to_string());
        self.save()
    }

    /// Remove an alias. Returns `false` if it did not exist.
    pub fn remove_alias(&mut self, name: &str) -> Result<bool, ConfigError> {
        if self.config.aliases.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Add or replace a custom command.
    pub fn add_custom_command(&mut self, name: &str, command: &str) -> Result<(), ConfigError> {
        schema::validate_name(name)?;
        if command.trim().is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "custom command '{}' needs a non-empty command line",
                name
            )));
        }
        self.config
            .custom_commands
            .insert(name.to_string(), command.to_string());
        self.save()
    }

    /// Remove a custom command. Returns `false` if it did not exist.
    pub fn remove_custom_command(&mut self, name: &str) -> Result<bool, ConfigError> {
        if self.config.custom_commands.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Set the package manager preference.
    pub fn set_package_manager(&mut self, preference: PmPreference) -> Result<(), ConfigError> {
        self.config.pm = preference;
        self.save()
    }

    /// Replace everything with defaults.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.config = XeConfig::default();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pm::PackageManager;
    use tempfile::TempDir;

    fn config_path(temp: &TempDir) -> PathBuf {
        temp.path().join(".xerc")
    }

    #[test]
    fn missing_file_created_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);

        let store = ConfigStore::load_from(&path).unwrap();

        assert_eq!(store.status(), LoadStatus::Created);
        assert_eq!(store.config(), &XeConfig::default());
        assert!(path.exists());
        assert!(!temp.path().join(".xerc.tmp").exists());
    }

    #[test]
    fn malformed_file_rewritten_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        fs::write(&path, "{ this is not json").unwrap();

        let store = ConfigStore::load_from(&path).unwrap();

        assert_eq!(store.status(), LoadStatus::Recovered);
        assert_eq!(store.config(), &XeConfig::default());
        let on_disk: XeConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, XeConfig::default());
    }

    #[test]
    fn undecodable_file_rewritten_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();

        let store = ConfigStore::load_from(&path).unwrap();

        assert_eq!(store.status(), LoadStatus::Recovered);
        assert_eq!(store.config(), &XeConfig::default());
        let on_disk: XeConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, XeConfig::default());
    }

    #[test]
    fn non_object_file_rewritten_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        fs::write(&path, "[\"b\"]").unwrap();

        let store = ConfigStore::load_from(&path).unwrap();
        assert_eq!(store.status(), LoadStatus::Recovered);
        assert_eq!(store.config(), &XeConfig::default());
    }

    #[test]
    fn invalid_pm_value_keeps_aliases_and_commands() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        let original =
            r#"{"pm": "PNPM", "aliases": {"b": "run build"}, "customCommands": {"deploy": "x && y"}}"#;
        fs::write(&path, original).unwrap();

        let store = ConfigStore::load_from(&path).unwrap();

        assert_eq!(store.status(), LoadStatus::Repaired);
        assert_eq!(store.config().pm, PmPreference::Auto);
        assert_eq!(store.config().aliases["b"], "run build");
        assert_eq!(store.config().custom_commands["deploy"], "x && y");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn saving_after_repair_keeps_user_entries() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        fs::write(&path, r#"{"pm": 7, "aliases": {"b": "run build"}}"#).unwrap();

        let mut store = ConfigStore::load_from(&path).unwrap();
        store.add_alias("t", "run test").unwrap();

        let reloaded = ConfigStore::load_from(&path).unwrap();
        assert_eq!(reloaded.status(), LoadStatus::Loaded);
        assert_eq!(reloaded.config().aliases["b"], "run build");
        assert_eq!(reloaded.config().aliases["t"], "run test");
    }

    #[test]
    fn mutations_round_trip_through_disk() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);

        let mut store = ConfigStore::load_from(&path).unwrap();
        store.add_alias("b", "run build").unwrap();
        store
            .add_custom_command("deploy", "npm run build && npm run push")
            .unwrap();
        store.set_extension(Extension::Docker, false).unwrap();
        store.set_package_manager(PmPreference::Pnpm).unwrap();

        let reloaded = ConfigStore::load_from(&path).unwrap();
        assert_eq!(reloaded.status(), LoadStatus::Loaded);
        assert_eq!(reloaded.config(), store.config());
        assert_eq!(reloaded.config().aliases["b"], "run build");
        assert_eq!(
            reloaded.config().custom_commands["deploy"],
            "npm run build && npm run push"
        );
        assert!(!reloaded.config().extensions.docker);
        assert_eq!(reloaded.config().pm.manager(), Some(PackageManager::Pnpm));
    }

    #[test]
    fn remove_reports_missing_entries() {
        let temp = TempDir::new().unwrap();
        let mut store = ConfigStore::load_from(config_path(&temp)).unwrap();

        store.add_alias("b", "run build").unwrap();
        assert!(store.remove_alias("b").unwrap());
        assert!(!store.remove_alias("b").unwrap());
        assert!(!store.remove_custom_command("nope").unwrap());
    }

    #[test]
    fn rejects_invalid_names_without_writing() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        let mut store = ConfigStore::load_from(&path).unwrap();

        assert!(store.add_alias("-b", "run build").is_err());
        assert!(store.add_custom_command("ship", "  ").is_err());

        let reloaded = ConfigStore::load_from(&path).unwrap();
        assert!(reloaded.config().aliases.is_empty());
        assert!(reloaded.config().custom_commands.is_empty());
    }

    #[test]
    fn reset_restores_defaults() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);
        let mut store = ConfigStore::load_from(&path).unwrap();
        store.add_alias("b", "run build").unwrap();

        store.reset().unwrap();

        assert_eq!(store.config(), &XeConfig::default());
        let reloaded = ConfigStore::load_from(&path).unwrap();
        assert_eq!(reloaded.config(), &XeConfig::default());
    }

    #[test]
    fn creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/xerc.json");
        ConfigStore::load_from(&path).unwrap();
        assert!(path.exists());
    }
}

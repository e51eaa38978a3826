//! core::manifest
//!
//! Read-only view of the project's `package.json`.
//!
//! Only two parts of the manifest matter here: the `scripts` map (in
//! declaration order) and the optional `packageManager` field
//! (`"<name>@<version>"`). Everything else is preserved untouched when
//! [`write_package_manager`] rewrites the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Manifest file name.
pub const MANIFEST_FILE: &str = "package.json";

/// Errors from manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{0}' is not a JSON object")]
    NotAnObject(PathBuf),
}

/// A declared script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub command: String,
}

/// The parts of `package.json` this tool reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// `None` when the manifest has no `scripts` object at all.
    scripts: Option<Vec<Script>>,
    package_manager: Option<String>,
}

impl Manifest {
    /// Path of the manifest inside `dir`.
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    /// Load the manifest from `dir`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(dir: &Path) -> Result<Option<Manifest>, ManifestError> {
        let path = Self::path(dir);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| ManifestError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::parse(&contents)
            .map(Some)
            .map_err(|e| ManifestError::ParseError { path, source: e })
    }

    /// Parse manifest JSON.
    ///
    /// Non-string script values are skipped rather than rejected.
    pub fn parse(contents: &str) -> Result<Manifest, serde_json::Error> {
        let value: Value = serde_json::from_str(contents)?;

        let scripts = value.get("scripts").and_then(Value::as_object).map(|map| {
            map.iter()
                .filter_map(|(name, command)| {
                    command.as_str().map(|c| Script {
                        name: name.clone(),
                        command: c.to_string(),
                    })
                })
                .collect()
        });

        let package_manager = value
            .get("packageManager")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Manifest {
            scripts,
            package_manager,
        })
    }

    /// Declared scripts, or `None` when there is no script map.
    pub fn scripts(&self) -> Option<&[Script]> {
        self.scripts.as_deref()
    }

    /// Look up a script by exact name.
    pub fn script(&self, name: &str) -> Option<&Script> {
        self.scripts
            .as_ref()
            .and_then(|s| s.iter().find(|script| script.name == name))
    }

    /// Script names in declaration order.
    pub fn script_names(&self) -> Vec<&str> {
        self.scripts
            .iter()
            .flatten()
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Raw `packageManager` field.
    pub fn package_manager(&self) -> Option<&str> {
        self.package_manager.as_deref()
    }

    /// Manager name from `packageManager`, i.e. the part before `@`.
    pub fn package_manager_name(&self) -> Option<&str> {
        self.package_manager
            .as_deref()
            .and_then(|field| field.split('@').next())
            .filter(|name| !name.is_empty())
    }
}

/// Set the `packageManager` field of `dir/package.json`, keeping every
/// other key in place.
///
/// Returns `Ok(false)` when there is no manifest to update.
pub fn write_package_manager(dir: &Path, value: &str) -> Result<bool, ManifestError> {
    let path = Manifest::path(dir);
    if !path.exists() {
        return Ok(false);
    }

    let contents = fs::read_to_string(&path).map_err(|e| ManifestError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    let mut object: Map<String, Value> =
        match serde_json::from_str(&contents).map_err(|e| ManifestError::ParseError {
            path: path.clone(),
            source: e,
        })? {
            Value::Object(map) => map,
            _ => return Err(ManifestError::NotAnObject(path)),
        };

    object.insert(
        "packageManager".to_string(),
        Value::String(value.to_string()),
    );

    let mut rendered = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
        ManifestError::ParseError {
            path: path.clone(),
            source: e,
        }
    })?;
    rendered.push('\n');

    fs::write(&path, rendered).map_err(|e| ManifestError::WriteError { path, source: e })?;
    Ok(true)
}

//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "extensions": { "git": true, "github": true, "prisma": true, "docker": true, "shadcn": true },
//!   "aliases": { "b": "run build" },
//!   "customCommands": { "deploy": "npm run build && npm run push" },
//!   "pm": "auto",
//!   "features": { "autoCommit": false }
//! }
//! ```
//!
//! Every field is optional on disk; missing fields take their defaults and
//! unknown fields are ignored. A field holding an unusable value also takes
//! its default, without disturbing the others (see
//! [`XeConfig::merge_over_defaults`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ConfigError;
use crate::pm::PackageManager;

/// Current schema version written to new files.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// User configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct XeConfig {
    /// Schema version
    pub version: String,

    /// Enabled extensions
    pub extensions: Extensions,

    /// Alias name -> replacement tokens
    pub aliases: BTreeMap<String, String>,

    /// Custom command name -> shell command line
    pub custom_commands: BTreeMap<String, String>,

    /// Preferred package manager
    pub pm: PmPreference,

    /// Feature flags
    pub features: Features,
}

impl Default for XeConfig {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            extensions: Extensions::default(),
            aliases: BTreeMap::new(),
            custom_commands: BTreeMap::new(),
            pm: PmPreference::Auto,
            features: Features::default(),
        }
    }
}

impl XeConfig {
    /// Lay an on-disk JSON object over the defaults, one top-level field at
    /// a time.
    ///
    /// Returns `None` when `value` is not an object. Fields that fail to
    /// deserialize keep their default and are listed in the result.
    pub fn merge_over_defaults(value: &Value) -> Option<(Self, Vec<RejectedField>)> {
        let object = value.as_object()?;
        let mut config = Self::default();
        let mut rejected = Vec::new();

        merge_field(object, "version", &mut config.version, &mut rejected);
        merge_field(object, "extensions", &mut config.extensions, &mut rejected);
        merge_field(object, "aliases", &mut config.aliases, &mut rejected);
        merge_field(
            object,
            "customCommands",
            &mut config.custom_commands,
            &mut rejected,
        );
        merge_field(object, "pm", &mut config.pm, &mut rejected);
        merge_field(object, "features", &mut config.features, &mut rejected);

        Some((config, rejected))
    }
}

/// A config field whose on-disk value was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub key: &'static str,
    pub reason: String,
}

fn merge_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
    slot: &mut T,
    rejected: &mut Vec<RejectedField>,
) {
    let Some(value) = object.get(key) else {
        return;
    };
    match T::deserialize(value) {
        Ok(parsed) => *slot = parsed,
        Err(e) => rejected.push(RejectedField {
            key,
            reason: e.to_string(),
        }),
    }
}

/// Per-extension enabled flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Extensions {
    pub git: bool,
    pub github: bool,
    pub prisma: bool,
    pub docker: bool,
    pub shadcn: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            git: true,
            github: true,
            prisma: true,
            docker: true,
            shadcn: true,
        }
    }
}

impl Extensions {
    /// Whether an extension is enabled.
    pub fn is_enabled(&self, extension: Extension) -> bool {
        match extension {
            Extension::Git => self.git,
            Extension::Github => self.github,
            Extension::Prisma => self.prisma,
            Extension::Docker => self.docker,
            Extension::Shadcn => self.shadcn,
        }
    }

    /// Enable or disable an extension.
    pub fn set(&mut self, extension: Extension, enabled: bool) {
        let flag = match extension {
            Extension::Git => &mut self.git,
            Extension::Github => &mut self.github,
            Extension::Prisma => &mut self.prisma,
            Extension::Docker => &mut self.docker,
            Extension::Shadcn => &mut self.shadcn,
        };
        *flag = enabled;
    }
}

/// An optional group of subcommands wrapping one external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Git,
    Github,
    Prisma,
    Docker,
    Shadcn,
}

impl Extension {
    pub const ALL: [Extension; 5] = [
        Extension::Git,
        Extension::Github,
        Extension::Prisma,
        Extension::Docker,
        Extension::Shadcn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Git => "git",
            Extension::Github => "github",
            Extension::Prisma => "prisma",
            Extension::Docker => "docker",
            Extension::Shadcn => "shadcn",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ext| ext.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(|e| e.as_str()).collect();
                ConfigError::InvalidValue(format!(
                    "invalid extension '{}', must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Package manager preference; `auto` means detect per project.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PmPreference {
    #[default]
    Auto,
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PmPreference {
    /// The explicit manager, or `None` for `auto`.
    pub fn manager(self) -> Option<PackageManager> {
        match self {
            PmPreference::Auto => None,
            PmPreference::Npm => Some(PackageManager::Npm),
            PmPreference::Pnpm => Some(PackageManager::Pnpm),
            PmPreference::Yarn => Some(PackageManager::Yarn),
            PmPreference::Bun => Some(PackageManager::Bun),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self.manager() {
            Some(pm) => pm.as_str(),
            None => "auto",
        }
    }
}

impl From<PackageManager> for PmPreference {
    fn from(pm: PackageManager) -> Self {
        match pm {
            PackageManager::Npm => PmPreference::Npm,
            PackageManager::Pnpm => PmPreference::Pnpm,
            PackageManager::Yarn => PmPreference::Yarn,
            PackageManager::Bun => PmPreference::Bun,
        }
    }
}

impl fmt::Display for PmPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PmPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(PmPreference::Auto);
        }
        s.parse::<PackageManager>().map(Self::from).map_err(|_| {
            ConfigError::InvalidValue(format!(
                "invalid package manager '{}', must be one of: {}, auto",
                s,
                PackageManager::names().join(", ")
            ))
        })
    }
}

/// Feature flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Features {
    /// Commit automatically after generated changes
    pub auto_commit: bool,
}

/// Validate an alias or custom-command name.
///
/// Names are matched against a single whitespace-delimited token that does
/// not start with `-`, so anything else could never be looked up.
pub fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidValue("name cannot be empty".to_string()));
    }
    if name.starts_with('-') {
        return Err(ConfigError::InvalidValue(format!(
            "name '{}' cannot start with '-'",
            name
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue(format!(
            "name '{}' cannot contain whitespace",
            name
        )));
    }
    Ok(())
}

//! pm
//!
//! Package manager registry, detection, and install pre-flight.
//!
//! # Modules
//!
//! - [`detector`] - Decides which manager governs a directory (memoized)
//! - [`install`] - Verifies a manager is installed, offers to install it
//!
//! # Registry
//!
//! The four supported managers differ only in data: one command template per
//! [`Operation`] and one lock file name. There is no per-manager behavior, so
//! the registry is a plain enum with `match`-based lookup tables. Adding an
//! operation without a template for every manager does not compile.

pub mod detector;
pub mod install;

pub use detector::{Detection, DetectionSource, Detector, Probe, SystemProbe};
pub use install::{ensure_installed, PmError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// A logical operation that every manager can render into a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Install,
    InstallDev,
    InstallGlobal,
    Uninstall,
    Init,
    Update,
    Start,
    Dev,
    Build,
    Lint,
    Run,
}

impl PackageManager {
    /// Registry iteration order. Lock-file detection checks in this order.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// Binary-probe preference: least ubiquitous first, npm last.
    pub const PROBE_ORDER: [PackageManager; 4] = [
        PackageManager::Bun,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Npm,
    ];

    /// Executable name.
    pub fn as_str(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Lock file whose presence signals this manager.
    pub fn lock_file(self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Bun => "bun.lockb",
        }
    }

    /// Literal command template for an operation.
    pub fn template(self, op: Operation) -> &'static str {
        use Operation::*;
        match self {
            PackageManager::Npm => match op {
                Install => "npm install",
                InstallDev => "npm install --save-dev",
                InstallGlobal => "npm install --global",
                Uninstall => "npm uninstall",
                Init => "npm init",
                Update => "npm update",
                Start => "npm start",
                Dev => "npm run dev",
                Build => "npm run build",
                Lint => "npm lint",
                Run => "npm run",
            },
            PackageManager::Pnpm => match op {
                Install => "pnpm add",
                InstallDev => "pnpm add -D",
                InstallGlobal => "pnpm add -g",
                Uninstall => "pnpm remove",
                Init => "pnpm init",
                Update => "pnpm update",
                Start => "pnpm start",
                Dev => "pnpm run dev",
                Build => "pnpm run build",
                Lint => "pnpm lint",
                Run => "pnpm run",
            },
            PackageManager::Yarn => match op {
                Install => "yarn add",
                InstallDev => "yarn add -D",
                InstallGlobal => "yarn add -g",
                Uninstall => "yarn remove",
                Init => "yarn init",
                Update => "yarn update",
                Start => "yarn start",
                Dev => "yarn run dev",
                Build => "yarn run build",
                Lint => "yarn lint",
                Run => "yarn run",
            },
            PackageManager::Bun => match op {
                Install => "bun add",
                InstallDev => "bun add -D",
                InstallGlobal => "bun add -g",
                Uninstall => "bun remove",
                Init => "bun init",
                Update => "bun update",
                Start => "bun start",
                Dev => "bun run dev",
                Build => "bun run build",
                Lint => "bun lint",
                Run => "bun run",
            },
        }
    }

    /// Whether `init` accepts `-y` to skip its questionnaire.
    ///
    /// pnpm's init never prompts, and rejects the flag.
    pub fn init_accepts_yes(self) -> bool {
        !matches!(self, PackageManager::Pnpm)
    }

    /// Program and leading arguments for running a package binary
    /// without installing it (`npx`, `pnpm dlx`, ...).
    pub fn package_runner(self) -> (&'static str, &'static [&'static str]) {
        match self {
            PackageManager::Npm => ("npx", &[]),
            PackageManager::Pnpm => ("pnpm", &["dlx"]),
            PackageManager::Yarn => ("yarn", &["dlx"]),
            PackageManager::Bun => ("bunx", &["--bun"]),
        }
    }

    /// Where to find install instructions other than `npm install -g`.
    pub fn install_hint(self) -> &'static str {
        match self {
            PackageManager::Npm => "Visit: https://nodejs.org/",
            PackageManager::Pnpm => "Visit: https://pnpm.io/installation",
            PackageManager::Yarn => "Visit: https://yarnpkg.com/getting-started/install",
            PackageManager::Bun => "Or use: curl -fsSL https://bun.sh/install | bash",
        }
    }

    /// Valid names, for error messages.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|pm| pm.as_str()).collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown package manager '{}', must be one of: {}",
                    s,
                    Self::names().join(", ")
                )
            })
    }
}

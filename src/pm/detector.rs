//! pm::detector
//!
//! Decides which package manager governs a project directory.
//!
//! # Precedence
//!
//! First match wins:
//! 1. Explicit preference from the user config (anything but `"auto"`)
//! 2. Lock file in the directory (registry order: npm, pnpm, yarn, bun)
//! 3. `packageManager` field of `package.json`
//! 4. First manager whose `--version` succeeds (bun, pnpm, yarn, npm)
//! 5. npm
//!
//! No strategy can fail the detection; errors degrade to "try the next one".
//!
//! # Memoization
//!
//! The result is computed at most once per [`Detector`]. Later filesystem
//! changes are not observed until [`Detector::reset`] is called.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::PackageManager;
use crate::core::manifest::Manifest;

/// Checks whether a manager binary can be run.
///
/// The detector and the install pre-flight go through this trait so tests
/// can stand in for the real `PATH`.
pub trait Probe {
    /// Run `<manager> --version`, returning the trimmed version on success.
    fn version(&self, manager: PackageManager) -> Option<String>;

    /// Whether `<manager> --version` succeeds.
    fn is_installed(&self, manager: PackageManager) -> bool {
        self.version(manager).is_some()
    }
}

/// Probe that launches the real binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn version(&self, manager: PackageManager) -> Option<String> {
        let output = Command::new(manager.as_str())
            .arg("--version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Which strategy produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    Preference,
    LockFile,
    Manifest,
    Binary,
    Default,
}

/// A detected manager and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub manager: PackageManager,
    pub source: DetectionSource,
}

/// Memoizing package manager detector for one project directory.
#[derive(Debug)]
pub struct Detector<P = SystemProbe> {
    root: PathBuf,
    preference: Option<PackageManager>,
    probe: P,
    cached: OnceCell<Detection>,
}

impl Detector<SystemProbe> {
    /// Create a detector that probes the real `PATH`.
    pub fn new(root: impl Into<PathBuf>, preference: Option<PackageManager>) -> Self {
        Self::with_probe(root, preference, SystemProbe)
    }
}

impl<P: Probe> Detector<P> {
    /// Create a detector with a custom probe.
    pub fn with_probe(
        root: impl Into<PathBuf>,
        preference: Option<PackageManager>,
        probe: P,
    ) -> Self {
        Self {
            root: root.into(),
            preference,
            probe,
            cached: OnceCell::new(),
        }
    }

    /// The governing package manager.
    pub fn detect(&self) -> PackageManager {
        self.detection().manager
    }

    /// The governing package manager and the strategy that chose it.
    pub fn detection(&self) -> Detection {
        *self.cached.get_or_init(|| {
            let detection = self.run_strategies();
            debug!(
                "Detected {} from {:?}",
                detection.manager, detection.source
            );
            detection
        })
    }

    /// Forget the memoized result.
    pub fn reset(&mut self) {
        self.cached.take();
    }

    /// Directory being inspected.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The probe used for binary checks.
    pub fn probe(&self) -> &P {
        &self.probe
    }

    fn run_strategies(&self) -> Detection {
        let found = |manager, source| Detection { manager, source };

        if let Some(pm) = self.preference {
            return found(pm, DetectionSource::Preference);
        }
        if let Some(pm) = self.from_lock_file() {
            return found(pm, DetectionSource::LockFile);
        }
        if let Some(pm) = self.from_manifest() {
            return found(pm, DetectionSource::Manifest);
        }
        if let Some(pm) = self.from_binary() {
            return found(pm, DetectionSource::Binary);
        }
        found(PackageManager::Npm, DetectionSource::Default)
    }

    fn from_lock_file(&self) -> Option<PackageManager> {
        PackageManager::ALL
            .into_iter()
            .find(|pm| self.root.join(pm.lock_file()).is_file())
    }

    fn from_manifest(&self) -> Option<PackageManager> {
        let manifest = match Manifest::load(&self.root) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => return None,
            Err(e) => {
                debug!("Ignoring unreadable manifest: {}", e);
                return None;
            }
        };
        manifest.package_manager_name()?.parse().ok()
    }

    fn from_binary(&self) -> Option<PackageManager> {
        PackageManager::PROBE_ORDER
            .into_iter()
            .find(|pm| self.probe.is_installed(*pm))
    }
}

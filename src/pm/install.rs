//! pm::install
//!
//! Pre-flight check that the selected package manager can actually run.
//!
//! # Policy
//!
//! - Installed: nothing to do.
//! - npm missing: nothing can be done from here; Node.js must be installed.
//! - Another manager missing and npm missing too: same, npm is the installer.
//! - Another manager missing, npm present: offer `npm install -g <pm>`.
//!   Declining, cancelling, or a non-interactive session fails with guidance.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use super::{PackageManager, Probe};
use crate::engine::process::{self, ExecError, OutputMode};
use crate::ui::prompts::{self, PromptError};

const NODE_GUIDANCE: &str = "Please install Node.js from: https://nodejs.org/ (npm is included)";

/// Errors from the install pre-flight.
#[derive(Debug, Error)]
pub enum PmError {
    #[error("package manager '{manager}' is not installed\n{guidance}")]
    NotInstalled {
        manager: PackageManager,
        guidance: String,
    },

    #[error("{manager} is not installed\n{guidance}")]
    Declined {
        manager: PackageManager,
        guidance: String,
    },

    #[error("failed to install {manager}\nAlternatively: {hint}")]
    InstallFailed {
        manager: PackageManager,
        hint: &'static str,
        #[source]
        source: ExecError,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// The global install command for a manager, or `None` for npm itself.
pub fn install_command(manager: PackageManager) -> Option<String> {
    match manager {
        PackageManager::Npm => None,
        other => Some(format!("npm install -g {}", other)),
    }
}

/// Make sure `manager` is runnable, offering to install it if it is not.
pub fn ensure_installed<P: Probe>(
    manager: PackageManager,
    probe: &P,
    cwd: &Path,
    interactive: bool,
) -> Result<(), PmError> {
    ensure_installed_with(
        manager,
        probe,
        |message| prompts::confirm(message, true, interactive),
        |pm| {
            process::run(
                PackageManager::Npm.as_str(),
                ["install", "-g", pm.as_str()],
                cwd,
                OutputMode::Inherit,
            )
            .map(|_| ())
        },
    )
}

/// [`ensure_installed`] with the confirmation and installation steps supplied
/// by the caller.
pub fn ensure_installed_with<P, C, I>(
    manager: PackageManager,
    probe: &P,
    confirm: C,
    install: I,
) -> Result<(), PmError>
where
    P: Probe,
    C: FnOnce(&str) -> Result<bool, PromptError>,
    I: FnOnce(PackageManager) -> Result<(), ExecError>,
{
    if probe.is_installed(manager) {
        debug!("{} is installed", manager);
        return Ok(());
    }

    if manager == PackageManager::Npm {
        return Err(PmError::NotInstalled {
            manager,
            guidance: format!("Node.js and npm are required. {}", NODE_GUIDANCE),
        });
    }

    let command = install_command(manager).unwrap_or_default();

    if !probe.is_installed(PackageManager::Npm) {
        return Err(PmError::NotInstalled {
            manager,
            guidance: format!(
                "npm is required to install package managers. {}\nThen install {} with: {}",
                NODE_GUIDANCE, manager, command
            ),
        });
    }

    let declined = || PmError::Declined {
        manager,
        guidance: format!(
            "You can install {} later with: {}\n{}",
            manager,
            command,
            manager.install_hint()
        ),
    };

    let message = format!("{} is not installed. Install it globally now with npm?", manager);
    match confirm(&message) {
        Ok(true) => {}
        Ok(false) | Err(PromptError::Cancelled) | Err(PromptError::NotInteractive) => {
            return Err(declined());
        }
        Err(e) => return Err(e.into()),
    }

    info!("Installing {} globally", manager);
    install(manager).map_err(|source| PmError::InstallFailed {
        manager,
        hint: manager.install_hint(),
        source,
    })
}

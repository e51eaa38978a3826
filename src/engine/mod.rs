//! engine
//!
//! Turns resolved commands into child processes.
//!
//! # Modules
//!
//! - [`process`] - Spawn a program or a shell line and map its exit status
//! - [`executor`] - Render a package manager operation and run it
//! - [`runner`] - Fallback for tokens that match no registered subcommand
//!
//! # Flow
//!
//! ```text
//! argv -> alias preprocessing -> clap
//!   registered subcommand -> Executor::execute
//!   unknown token         -> runner::handle_unknown
//!                              custom command -> process::run_shell
//!                              manifest script -> Executor::execute(Run)
//!                              otherwise       -> NotFound report
//! ```
//!
//! # Invariants
//!
//! - Nothing in the engine retries a failed child process
//! - The package manager is detected at most once per [`Detector`](crate::pm::Detector)
//! - Every fallback path ends in success, a child failure, or a NotFound report

pub mod executor;
pub mod process;
pub mod runner;

pub use executor::{ExecOptions, Executor};
pub use process::{ExecError, OutputMode, ProcessOutput};
pub use runner::{handle_unknown, list_scripts, plan_unknown, suggest, Fallback, NotFound, RunError};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    /// Directory commands run in: the override, else the process directory.
    pub fn cwd(&self) -> PathBuf {
        match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let ctx = Context::default();
        assert!(ctx.cwd.is_none());
        assert!(!ctx.debug);
        assert!(!ctx.quiet);
        assert!(ctx.interactive);
        assert_eq!(ctx.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn cwd_override_wins() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/custom")),
            quiet: true,
            ..Context::default()
        };
        assert_eq!(ctx.cwd(), PathBuf::from("/custom"));
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }
}

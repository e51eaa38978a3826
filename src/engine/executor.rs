//! engine::executor
//!
//! Renders a logical [`Operation`] for the detected package manager and runs
//! it as a child process.
//!
//! # Rendering
//!
//! The template is split on whitespace into a program and its leading
//! arguments. Caller arguments are appended as discrete argv entries and are
//! never re-split, so `xe run test "a b"` hands `a b` to the script intact.
//! [`render`] gives the space-joined form used for display.
//!
//! # Errors
//!
//! A missing manager is reported through [`PmError`](crate::pm::PmError);
//! spawn failures and non-zero exits through
//! [`ExecError`](super::process::ExecError). Neither is printed here.

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::process::{self, ExecError, OutputMode, ProcessOutput};
use super::runner::RunError;
use super::Context;
use crate::pm::{self, Detector, Operation, PackageManager, Probe, SystemProbe};
use crate::ui::output;

/// Per-call execution options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Capture the child's output and print stdout only after success.
    pub silent: bool,
}

/// A rendered command, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Template followed by the space-joined arguments, trimmed.
pub fn render(manager: PackageManager, op: Operation, args: &[String]) -> String {
    format!("{} {}", manager.template(op), args.join(" "))
        .trim()
        .to_string()
}

/// Split the template for `op` and append `args` as separate entries.
pub fn command_line(manager: PackageManager, op: Operation, args: &[String]) -> CommandLine {
    let mut parts = manager.template(op).split_whitespace().map(str::to_string);
    // Every template starts with the manager's binary.
    let program = parts
        .next()
        .unwrap_or_else(|| manager.as_str().to_string());
    let mut rendered: Vec<String> = parts.collect();
    rendered.extend(args.iter().cloned());
    CommandLine {
        program,
        args: rendered,
    }
}

/// Runs package manager operations in the detector's directory.
#[derive(Debug)]
pub struct Executor<'a, P: Probe = SystemProbe> {
    detector: &'a Detector<P>,
    ctx: &'a Context,
}

impl<'a, P: Probe> Executor<'a, P> {
    pub fn new(detector: &'a Detector<P>, ctx: &'a Context) -> Self {
        Self { detector, ctx }
    }

    /// The manager operations will run with. Triggers detection.
    pub fn manager(&self) -> PackageManager {
        self.detector.detect()
    }

    /// Verify the manager is installed, then run `op` with `args`.
    pub fn execute(
        &self,
        op: Operation,
        args: &[String],
        options: ExecOptions,
    ) -> Result<(), RunError> {
        let manager = self.manager();
        let cwd = self.detector.root();

        pm::ensure_installed(manager, self.detector.probe(), cwd, self.ctx.interactive)?;

        let line = command_line(manager, op, args);
        output::info(format!("Running: {}", line), self.ctx.verbosity());
        debug!("Operation {:?} with {} for {}", op, manager, cwd.display());

        let result = spawn(&line, cwd, options)?;
        if !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }
        Ok(())
    }
}

/// Run `line` in `cwd`. Silent runs hold stdout back for the caller and keep
/// stderr for the error.
fn spawn(
    line: &CommandLine,
    cwd: &Path,
    options: ExecOptions,
) -> Result<ProcessOutput, ExecError> {
    let mode = if options.silent {
        OutputMode::Capture
    } else {
        OutputMode::Inherit
    };
    process::run(&line.program, &line.args, cwd, mode)
}

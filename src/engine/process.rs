//! engine::process
//!
//! The "run an external process" primitive every command builds on.
//!
//! Child processes run in the given directory and block until they exit.
//! There is no timeout. Exit code 0 is success; anything else, or a failure
//! to spawn, is an [`ExecError`]. Nothing here prints or swallows errors.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors from running a child process.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("`{command}` {}", exit_text(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: Option<String>,
    },
}

impl ExecError {
    /// Captured stderr of the failed child, when output was captured.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ExecError::Failed {
                stderr: Some(stderr),
                ..
            } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }

    /// Whether the program could not be found at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExecError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

fn exit_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// What to do with the child's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Share the terminal.
    #[default]
    Inherit,
    /// Collect output; stdout is returned, stderr is attached to failures.
    Capture,
}

/// Output of a successful run. Empty unless [`OutputMode::Capture`] was used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
}

/// Run `program` with `args` in `cwd`.
pub fn run<I, S>(
    program: &str,
    args: I,
    cwd: &Path,
    mode: OutputMode,
) -> Result<ProcessOutput, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let shown = display_command(program, &args);
    debug!("Executing: {}", shown);

    let mut command = Command::new(program);
    command.args(&args).current_dir(cwd);

    let spawn_error = |e| ExecError::Spawn {
        program: program.to_string(),
        source: e,
    };

    match mode {
        OutputMode::Inherit => {
            let status = command.status().map_err(spawn_error)?;
            if status.success() {
                Ok(ProcessOutput::default())
            } else {
                Err(ExecError::Failed {
                    command: shown,
                    code: status.code(),
                    stderr: None,
                })
            }
        }
        OutputMode::Capture => {
            let output = command
                .stdin(Stdio::null())
                .output()
                .map_err(spawn_error)?;
            if output.status.success() {
                Ok(ProcessOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                })
            } else {
                Err(ExecError::Failed {
                    command: shown,
                    code: output.status.code(),
                    stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                })
            }
        }
    }
}

/// Run a full command line through the platform shell, so operators such as
/// `&&`, `|` and `;` keep their meaning. `args` are appended positionally.
pub fn run_shell(command_line: &str, args: &[String], cwd: &Path) -> Result<(), ExecError> {
    let line = shell_line(command_line, args);
    let (shell, flag) = if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    };

    debug!("Executing in shell: {}", line);
    let status = Command::new(shell)
        .arg(flag)
        .arg(&line)
        .current_dir(cwd)
        .status()
        .map_err(|e| ExecError::Spawn {
            program: shell.to_string(),
            source: e,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Failed {
            command: line,
            code: status.code(),
            stderr: None,
        })
    }
}

/// The exact string handed to the shell by [`run_shell`].
pub fn shell_line(command_line: &str, args: &[String]) -> String {
    let mut line = command_line.trim().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut display = program.to_string();
    for arg in args {
        display.push(' ');
        display.push_str(&arg.as_ref().to_string_lossy());
    }
    display
}

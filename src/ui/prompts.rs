//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message. End of input counts as cancellation.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::IoError(e.to_string())
    }
}

/// Prompt for confirmation (yes/no) on the terminal.
///
/// Returns `Ok(true)` if the user confirms, `Ok(false)` if they decline.
/// Returns `Err(PromptError::NotInteractive)` if not in interactive mode.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let stdin = io::stdin();
    confirm_with(&mut stdin.lock(), &mut io::stderr(), message, default)
}

/// [`confirm`] over arbitrary streams.
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: bool,
) -> Result<bool, PromptError> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        write!(writer, "{} ({}) ", message, hint)?;
        writer.flush()?;

        let answer = read_answer(reader)?;
        match answer.to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(writer, "Please answer 'y' or 'n'.")?,
        }
    }
}

/// Prompt to select from a list of options.
///
/// Returns the index of the selected option.
pub fn select<T: AsRef<str>>(
    message: &str,
    options: &[T],
    default: Option<usize>,
    interactive: bool,
) -> Result<usize, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let stdin = io::stdin();
    select_with(&mut stdin.lock(), &mut io::stderr(), message, options, default)
}

/// [`select`] over arbitrary streams. Options are chosen by 1-based number.
pub fn select_with<R: BufRead, W: Write, T: AsRef<str>>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    options: &[T],
    default: Option<usize>,
) -> Result<usize, PromptError> {
    writeln!(writer, "{}", message)?;
    for (i, option) in options.iter().enumerate() {
        let marker = if Some(i) == default { "*" } else { " " };
        writeln!(writer, "{} {}) {}", marker, i + 1, option.as_ref())?;
    }

    loop {
        write!(writer, "Choice: ")?;
        writer.flush()?;

        let answer = read_answer(reader)?;
        if answer.is_empty() {
            if let Some(i) = default {
                return Ok(i);
            }
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
            _ => writeln!(writer, "Enter a number between 1 and {}.", options.len())?,
        }
    }
}

fn read_answer<R: BufRead>(reader: &mut R) -> Result<String, PromptError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Cancelled);
    }
    Ok(line.trim().to_string())
}

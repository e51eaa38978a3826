//! extensions
//!
//! Optional command groups, each wrapping one external tool.
//!
//! # Modules
//!
//! - [`git`] - Staging, smart push, save and sync
//! - [`github`] - `gh` dashboard, pull request and issue shortcuts, workflows
//! - [`docker`] - `docker-compose` lifecycle and `docker` housekeeping
//! - [`prisma`] - `npx prisma` shortcuts
//! - [`shadcn`] - Component scaffolding through the package runner
//!
//! # Design
//!
//! Every extension is a thin layer over [`process::run`]: it builds an argument
//! vector and hands it to the wrapped binary with the terminal attached.
//! Unknown sub-verbs are forwarded verbatim. An extension disabled in the
//! user config refuses to run; see [`require`].

pub mod docker;
pub mod git;
pub mod github;
pub mod prisma;
pub mod shadcn;

use std::ffi::OsStr;

use thiserror::Error;
use tracing::debug;

use crate::core::config::{Extension, XeConfig};
use crate::engine::process::{self, ExecError, OutputMode};
use crate::engine::Context;

/// Errors specific to extensions.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("the {0} extension is disabled\nEnable it with: xe config ext-enable {0}")]
    Disabled(Extension),

    #[error("component '{0}' not found")]
    ComponentNotFound(String),
}

/// Fail unless `extension` is enabled.
pub fn require(config: &XeConfig, extension: Extension) -> Result<(), ExtensionError> {
    if config.extensions.is_enabled(extension) {
        Ok(())
    } else {
        Err(ExtensionError::Disabled(extension))
    }
}

/// Run `program` in the command directory with the terminal attached.
pub(crate) fn run_tool<I, S>(ctx: &Context, program: &str, args: I) -> Result<(), ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    process::run(program, args, &ctx.cwd(), OutputMode::Inherit).map(|_| ())
}

/// Run `program` and return its trimmed stdout.
pub(crate) fn capture_tool<I, S>(ctx: &Context, program: &str, args: I) -> Result<String, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = process::run(program, args, &ctx.cwd(), OutputMode::Capture)?;
    Ok(output.stdout.trim().to_string())
}

/// Forward unrecognized words to the wrapped tool.
pub(crate) fn passthrough(ctx: &Context, program: &str, prefix: &[&str], words: &[String]) -> Result<(), ExecError> {
    let mut args: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
    args.extend(words.iter().cloned());
    debug!("Passing through to {}: {:?}", program, args);
    run_tool(ctx, program, &args)
}

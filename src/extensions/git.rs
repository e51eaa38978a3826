//! extensions::git
//!
//! Git shortcuts. `push` fills in the current branch on `origin`; `save` and
//! `sync` chain several git calls and stop at the first failure.

use anyhow::{Context as _, Result};

use super::{capture_tool, passthrough as forward, run_tool};
use crate::engine::Context;
use crate::ui::output;

const GIT: &str = "git";
const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_SAVE_MESSAGE: &str = "WIP: auto-save";

/// Where a push goes. `branch: None` means the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub remote: String,
    pub branch: Option<String>,
}

impl PushTarget {
    /// One positional argument is a branch on `origin`; two are remote and branch.
    pub fn from_args(remote: Option<&str>, branch: Option<&str>) -> Self {
        match (remote, branch) {
            (Some(remote), Some(branch)) => Self {
                remote: remote.to_string(),
                branch: Some(branch.to_string()),
            },
            (Some(branch), None) | (None, Some(branch)) => Self {
                remote: DEFAULT_REMOTE.to_string(),
                branch: Some(branch.to_string()),
            },
            (None, None) => Self {
                remote: DEFAULT_REMOTE.to_string(),
                branch: None,
            },
        }
    }
}

/// Arguments for `git add`; no files means everything.
pub fn add_args(files: &[String]) -> Vec<String> {
    let mut args = vec!["add".to_string()];
    if files.is_empty() {
        args.push(".".to_string());
    } else {
        args.extend(files.iter().cloned());
    }
    args
}

/// Arguments for `git push`.
pub fn push_args(remote: &str, branch: &str, set_upstream: bool) -> Vec<String> {
    let mut args = vec!["push".to_string()];
    if set_upstream {
        args.push("-u".to_string());
    }
    args.push(remote.to_string());
    args.push(branch.to_string());
    args
}

/// The checked-out branch.
pub fn current_branch(ctx: &Context) -> Result<String> {
    capture_tool(ctx, GIT, ["rev-parse", "--abbrev-ref", "HEAD"])
        .context("Failed to get current branch. Are you in a git repository?")
}

/// Whether the working tree has staged or unstaged changes.
pub fn has_changes(ctx: &Context) -> bool {
    capture_tool(ctx, GIT, ["status", "--porcelain"])
        .map(|status| !status.is_empty())
        .unwrap_or(false)
}

/// Stage files.
pub fn add(ctx: &Context, files: &[String]) -> Result<()> {
    let verbosity = ctx.verbosity();
    if files.is_empty() || (files.len() == 1 && files[0] == ".") {
        output::info("Adding all files...", verbosity);
    } else {
        output::info(format!("Adding files: {}", files.join(", ")), verbosity);
    }

    run_tool(ctx, GIT, add_args(files)).context("Git add failed")?;
    output::success("Files added!", verbosity);
    Ok(())
}

/// Push, resolving the current branch when none is given.
pub fn push(ctx: &Context, remote: Option<&str>, branch: Option<&str>, set_upstream: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let target = PushTarget::from_args(remote, branch);
    let branch = match target.branch {
        Some(branch) => branch,
        None => {
            let branch = current_branch(ctx)?;
            output::info(format!("Auto-detected branch: {}", branch), verbosity);
            branch
        }
    };

    output::info(format!("Pushing to {}/{}...", target.remote, branch), verbosity);
    run_tool(ctx, GIT, push_args(&target.remote, &branch, set_upstream)).context("Git push failed")?;
    output::success(
        format!("Pushed successfully to {}/{}!", target.remote, branch),
        verbosity,
    );
    Ok(())
}

/// Stage everything, commit and push. A clean tree is a no-op.
pub fn save(ctx: &Context, message: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    if !has_changes(ctx) {
        output::info("No changes to save. Working tree is clean.", verbosity);
        return Ok(());
    }

    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(DEFAULT_SAVE_MESSAGE);

    add(ctx, &[])?;
    output::info(format!("Committing with message: \"{}\"", message), verbosity);
    run_tool(ctx, GIT, ["commit", "-m", message]).context("Git commit failed")?;
    push(ctx, None, None, false)?;

    output::success("Saved successfully!", verbosity);
    Ok(())
}

/// `pull --rebase`, then push the current branch.
pub fn sync(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Pulling latest changes with rebase...", verbosity);
    run_tool(ctx, GIT, ["pull", "--rebase"]).context("Git pull failed")?;
    output::success("Pulled successfully!", verbosity);

    push(ctx, None, None, false)?;
    output::success("Sync complete!", verbosity);
    Ok(())
}

/// Any other git command.
pub fn passthrough(ctx: &Context, words: &[String]) -> Result<()> {
    forward(ctx, GIT, &[], words).context("Git command failed")
}

//! extensions::github
//!
//! `gh` shortcuts plus a few workflows that combine git and gh.
//!
//! # Workflows
//!
//! - `ship`: stage all, commit, push, open a pull request in the browser
//! - `sync`: fetch all remotes with pruning, then pull
//! - `quickfix`: branch `fix/<issue>-<slug>` named after the issue title

use anyhow::{Context as _, Result};

use super::{capture_tool, passthrough as forward, run_tool};
use crate::engine::Context;
use crate::ui::output;

const GH: &str = "gh";
const GIT: &str = "git";

/// Longest slug taken from an issue title.
pub const MAX_SLUG_LEN: usize = 50;

/// How `pr-merge` combines commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    Squash,
    Rebase,
    Merge,
}

impl MergeStrategy {
    /// First set flag wins, in squash, rebase, merge order.
    pub fn from_flags(squash: bool, rebase: bool, merge: bool) -> Option<Self> {
        if squash {
            Some(MergeStrategy::Squash)
        } else if rebase {
            Some(MergeStrategy::Rebase)
        } else if merge {
            Some(MergeStrategy::Merge)
        } else {
            None
        }
    }

    fn flag(self) -> &'static str {
        match self {
            MergeStrategy::Squash => "--squash",
            MergeStrategy::Rebase => "--rebase",
            MergeStrategy::Merge => "--merge",
        }
    }
}

/// Lower-case the title, collapse runs of anything but `a-z0-9` into `-`,
/// and keep at most [`MAX_SLUG_LEN`] characters.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug.chars().take(MAX_SLUG_LEN).collect()
}

/// Branch name for a quick fix of `issue`.
pub fn quickfix_branch(issue: &str, title: &str) -> String {
    format!("fix/{}-{}", issue, slugify(title))
}

/// Arguments for `gh pr merge`.
pub fn merge_args(number: Option<&str>, strategy: Option<MergeStrategy>) -> Vec<String> {
    let mut args = vec!["pr".to_string(), "merge".to_string()];
    args.extend(number.map(str::to_string));
    args.extend(strategy.map(|s| s.flag().to_string()));
    args
}

/// Arguments for `gh pr review --approve`.
pub fn approve_args(pr: &str, comment: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "pr".to_string(),
        "review".to_string(),
        pr.to_string(),
        "--approve".to_string(),
    ];
    if let Some(comment) = comment {
        args.push("--body".to_string());
        args.push(comment.to_string());
    }
    args
}

fn gh<I: IntoIterator<Item = S>, S: AsRef<std::ffi::OsStr>>(ctx: &Context, args: I) -> Result<()> {
    run_tool(ctx, GH, args).map_err(Into::into)
}

/// Auth status, repository, five open pull requests, five assigned issues.
pub fn dashboard(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    let sections: [(&str, &[&str]); 4] = [
        ("Authentication:", &["auth", "status"]),
        ("Repository:", &["repo", "view"]),
        ("Open Pull Requests:", &["pr", "list", "--limit", "5"]),
        (
            "Assigned Issues:",
            &["issue", "list", "--assignee", "@me", "--limit", "5"],
        ),
    ];

    output::info("GitHub Status Dashboard\n======================\n", verbosity);
    for (i, (title, args)) in sections.iter().enumerate() {
        if i > 0 {
            output::print("", verbosity);
        }
        output::info(title, verbosity);
        gh(ctx, *args).context("Failed to fetch GitHub status")?;
    }
    Ok(())
}

pub fn repo_create(ctx: &Context, name: &str, public: bool, private: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info(format!("Creating repository {}...", name), verbosity);

    let mut args = vec!["repo", "create", name];
    if public {
        args.push("--public");
    }
    if private {
        args.push("--private");
    }
    gh(ctx, args).context("Failed to create repository")?;
    output::success("Repository created!", verbosity);
    Ok(())
}

pub fn pr_create(ctx: &Context) -> Result<()> {
    output::info("Creating pull request...", ctx.verbosity());
    gh(ctx, ["pr", "create", "--web"]).context("Failed to create PR")
}

pub fn pr_checkout(ctx: &Context, number: &str) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info(format!("Checking out PR #{}...", number), verbosity);
    gh(ctx, ["pr", "checkout", number]).context("Failed to checkout PR")?;
    output::success(format!("PR #{} checked out!", number), verbosity);
    Ok(())
}

pub fn pr_merge(ctx: &Context, number: Option<&str>, strategy: Option<MergeStrategy>) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Merging pull request...", verbosity);
    gh(ctx, merge_args(number, strategy)).context("Failed to merge PR")?;
    output::success("PR merged!", verbosity);
    Ok(())
}

pub fn pr_view(ctx: &Context, number: Option<&str>) -> Result<()> {
    let mut args = vec!["pr", "view"];
    args.extend(number);
    gh(ctx, args).context("Failed to view PR")
}

pub fn issue_create(ctx: &Context) -> Result<()> {
    output::info("Creating issue...", ctx.verbosity());
    gh(ctx, ["issue", "create", "--web"]).context("Failed to create issue")
}

pub fn clone(ctx: &Context, repo: &str) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info(format!("Cloning {}...", repo), verbosity);
    gh(ctx, ["repo", "clone", repo]).context("Failed to clone repository")?;
    output::success("Repository cloned!", verbosity);
    Ok(())
}

pub fn auth(ctx: &Context) -> Result<()> {
    gh(ctx, ["auth", "status"]).context("Failed to check auth status")
}

/// Stage, commit, push, and open a pull request.
pub fn ship(ctx: &Context, message: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    let message = message.unwrap_or("Quick update");
    output::info("Starting ship workflow...\n", verbosity);

    output::info("Step 1/4: Staging changes...", verbosity);
    run_tool(ctx, GIT, ["add", "."]).context("Ship workflow failed")?;
    output::info("Step 2/4: Committing...", verbosity);
    run_tool(ctx, GIT, ["commit", "-m", message]).context("Ship workflow failed")?;
    output::info("Step 3/4: Pushing to remote...", verbosity);
    run_tool(ctx, GIT, ["push"]).context("Ship workflow failed")?;
    output::info("Step 4/4: Creating pull request...", verbosity);
    gh(ctx, ["pr", "create", "--web"]).context("Ship workflow failed")?;

    output::success("Ship workflow completed!", verbosity);
    Ok(())
}

/// Fetch every remote with pruning, then pull.
pub fn sync(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Step 1/2: Fetching from remote...", verbosity);
    run_tool(ctx, GIT, ["fetch", "--all", "--prune"]).context("Sync failed")?;
    output::info("Step 2/2: Pulling changes...", verbosity);
    run_tool(ctx, GIT, ["pull"]).context("Sync failed")?;
    output::success("Sync completed!", verbosity);
    Ok(())
}

/// Create and check out a branch named after an issue.
pub fn quickfix(ctx: &Context, issue: &str) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info(format!("Starting quickfix workflow for issue #{}...", issue), verbosity);

    output::info("Step 1/2: Fetching issue details...", verbosity);
    let title = capture_tool(
        ctx,
        GH,
        ["issue", "view", issue, "--json", "title", "--jq", ".title"],
    )
    .context("Quickfix workflow failed")?;
    let branch = quickfix_branch(issue, &title);
    output::info(format!("Branch name: {}", branch), verbosity);

    output::info("Step 2/2: Creating and checking out branch...", verbosity);
    run_tool(ctx, GIT, ["checkout", "-b", branch.as_str()]).context("Quickfix workflow failed")?;

    output::success(
        "Quickfix setup complete! Make your changes and run 'xe gh ship' when ready.",
        verbosity,
    );
    Ok(())
}

pub fn approve(ctx: &Context, pr: &str, comment: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info(format!("Approving PR #{}...", pr), verbosity);
    gh(ctx, approve_args(pr, comment)).context("Failed to approve PR")?;
    output::success(format!("PR #{} approved!", pr), verbosity);
    Ok(())
}

/// Any other gh command.
pub fn passthrough(ctx: &Context, words: &[String]) -> Result<()> {
    forward(ctx, GH, &[], words).context("GitHub CLI command failed")
}

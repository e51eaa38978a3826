//! extensions::prisma
//!
//! Every call goes through `npx prisma`. With no verb, the full
//! generate, pull, push cycle runs and stops at the first failure.

use anyhow::{Context as _, Result};

use super::{passthrough as forward, run_tool};
use crate::engine::Context;
use crate::ui::output;

const NPX: &str = "npx";

fn prisma(ctx: &Context, args: &[&str]) -> Result<()> {
    let mut full = vec!["prisma"];
    full.extend_from_slice(args);
    run_tool(ctx, NPX, full).map_err(Into::into)
}

/// Arguments after `prisma` for `migrate`. Explicit words pass through;
/// otherwise `migrate dev`, with `--name` when given.
pub fn migrate_args(args: &[String], name: Option<&str>) -> Vec<String> {
    let mut out = vec!["migrate".to_string()];
    if args.is_empty() {
        out.push("dev".to_string());
        if let Some(name) = name {
            out.push("--name".to_string());
            out.push(name.to_string());
        }
    } else {
        out.extend(args.iter().cloned());
    }
    out
}

/// generate, then db pull, then db push.
pub fn workflow(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Running Prisma workflow (generate, pull, push)...", verbosity);

    output::info("Step 1/3: Generating Prisma Client...", verbosity);
    prisma(ctx, &["generate"]).context("Prisma workflow failed")?;
    output::info("Step 2/3: Pulling schema from database...", verbosity);
    prisma(ctx, &["db", "pull"]).context("Prisma workflow failed")?;
    output::info("Step 3/3: Pushing schema to database...", verbosity);
    prisma(ctx, &["db", "push"]).context("Prisma workflow failed")?;

    output::success("Prisma workflow completed!", verbosity);
    Ok(())
}

pub fn generate(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Generating Prisma Client...", verbosity);
    prisma(ctx, &["generate"]).context("Prisma generate failed")?;
    output::success("Prisma Client generated!", verbosity);
    Ok(())
}

pub fn migrate(ctx: &Context, args: &[String], name: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    if args.is_empty() {
        output::info("Running migrations...", verbosity);
    }
    forward(ctx, NPX, &["prisma"], &migrate_args(args, name)).context("Prisma migrate failed")?;
    if args.is_empty() {
        output::success("Migrations completed!", verbosity);
    }
    Ok(())
}

pub fn studio(ctx: &Context) -> Result<()> {
    output::info("Opening Prisma Studio...", ctx.verbosity());
    prisma(ctx, &["studio"]).context("Prisma studio failed")
}

pub fn push(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Pushing schema...", verbosity);
    prisma(ctx, &["db", "push"]).context("Prisma push failed")?;
    output::success("Schema pushed!", verbosity);
    Ok(())
}

pub fn pull(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Pulling schema from database...", verbosity);
    prisma(ctx, &["db", "pull"]).context("Prisma pull failed")?;
    output::success("Schema pulled!", verbosity);
    Ok(())
}

/// Any other prisma command.
pub fn passthrough(ctx: &Context, words: &[String]) -> Result<()> {
    forward(ctx, NPX, &["prisma"], words).context("Prisma command failed")
}

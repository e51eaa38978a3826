//! extensions::shadcn
//!
//! shadcn/ui scaffolding through the detected package manager's runner
//! (`npx`, `pnpm dlx`, `yarn dlx`, `bunx --bun`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{run_tool, ExtensionError};
use crate::engine::Context;
use crate::pm::{Detector, PackageManager, Probe};
use crate::ui::{output, prompts};

const PACKAGE: &str = "shadcn@latest";

/// Program and arguments that run `shadcn@latest <args>` with `manager`.
pub fn runner_command(manager: PackageManager, args: &[String]) -> (String, Vec<String>) {
    let (program, leading) = manager.package_runner();
    let mut full: Vec<String> = leading.iter().map(|s| s.to_string()).collect();
    full.push(PACKAGE.to_string());
    full.extend(args.iter().cloned());
    (program.to_string(), full)
}

/// Where a component's source lives.
pub fn component_path(root: &Path, component: &str) -> PathBuf {
    root.join("components").join("ui").join(format!("{}.tsx", component))
}

fn run_shadcn<P: Probe>(ctx: &Context, detector: &Detector<P>, args: &[String]) -> Result<()> {
    let (program, full) = runner_command(detector.detect(), args);
    run_tool(ctx, &program, &full).map_err(Into::into)
}

pub fn init<P: Probe>(ctx: &Context, detector: &Detector<P>) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Initializing shadcn-ui...", verbosity);
    run_shadcn(ctx, detector, &["init".to_string(), "-y".to_string()]).context("Shadcn init failed")?;
    output::success("Shadcn-ui initialized!", verbosity);
    Ok(())
}

pub fn add<P: Probe>(ctx: &Context, detector: &Detector<P>, components: &[String]) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info(format!("Adding components: {}...", components.join(", ")), verbosity);

    let mut args = vec!["add".to_string()];
    args.extend(components.iter().cloned());
    run_shadcn(ctx, detector, &args).context("Failed to add components")?;

    output::success("Components added!", verbosity);
    Ok(())
}

/// Delete `components/ui/<component>.tsx` after confirmation.
pub fn remove(ctx: &Context, component: &str, yes: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let path = component_path(&ctx.cwd(), component);
    if !path.is_file() {
        return Err(ExtensionError::ComponentNotFound(component.to_string()).into());
    }

    if !yes {
        let message = format!("Are you sure you want to remove {}?", component);
        match prompts::confirm(&message, false, ctx.interactive) {
            Ok(true) => {}
            Ok(false) | Err(prompts::PromptError::Cancelled) => {
                output::info("Cancelled", verbosity);
                return Ok(());
            }
            Err(e) => return Err(e).context("Use --yes to remove without a prompt"),
        }
    }

    fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
    output::success(format!("Component '{}' removed!", component), verbosity);
    Ok(())
}

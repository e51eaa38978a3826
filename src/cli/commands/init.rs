//! init command - Initialize a new project

use crate::core::manifest;
use crate::engine::{Context, ExecOptions, Executor};
use crate::pm::{Detector, Operation, PackageManager, Probe};
use crate::ui::{output, prompts};
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

/// Initialize a project with `pm`, asking for a manager when none is given.
pub fn init(ctx: &Context, yes: bool, pm: Option<PackageManager>) -> Result<()> {
    let manager = match pm {
        Some(pm) => pm,
        None => choose_manager(ctx)?,
    };
    let detector = Detector::new(ctx.cwd(), Some(manager));
    init_with(ctx, &detector, yes)
}

fn choose_manager(ctx: &Context) -> Result<PackageManager> {
    let names = PackageManager::names();
    let index = prompts::select(
        "Which package manager would you like to use?",
        &names,
        Some(0),
        ctx.interactive,
    )
    .context("Choose a package manager with --pm")?;
    Ok(PackageManager::ALL[index])
}

/// Run the detector's manager `init` and record it in package.json.
pub fn init_with<P: Probe>(ctx: &Context, detector: &Detector<P>, yes: bool) -> Result<()> {
    let manager = detector.detect();
    let args = init_args(manager, yes);
    Executor::new(detector, ctx).execute(Operation::Init, &args, ExecOptions::default())?;

    let field = package_manager_field(manager, detector.probe());
    record_package_manager(detector.root(), &field);

    output::success("Project initialized!", ctx.verbosity());
    Ok(())
}

/// Extra arguments for the manager's `init`.
pub fn init_args(manager: PackageManager, yes: bool) -> Vec<String> {
    if yes && manager.init_accepts_yes() {
        vec!["-y".to_string()]
    } else {
        Vec::new()
    }
}

/// `name@version`, or the bare name when the version cannot be read.
pub fn package_manager_field<P: Probe>(manager: PackageManager, probe: &P) -> String {
    match probe.version(manager) {
        Some(version) if !version.is_empty() => format!("{}@{}", manager, version),
        _ => manager.to_string(),
    }
}

// Best-effort: the project exists at this point even if the field is missing.
fn record_package_manager(dir: &Path, field: &str) {
    match manifest::write_package_manager(dir, field) {
        Ok(true) => debug!("Recorded packageManager: {}", field),
        Ok(false) => debug!("No package.json to record packageManager in"),
        Err(e) => debug!("Could not record packageManager: {}", e),
    }
}

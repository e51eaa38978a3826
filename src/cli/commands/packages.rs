//! install, uninstall, update commands - Dependency management

use crate::engine::{Context, ExecOptions, Executor};
use crate::pm::{Detector, Operation, Probe};
use crate::ui::output;
use anyhow::Result;

/// Which install template applies. Flags only matter when packages are named.
pub fn install_operation(has_packages: bool, global: bool, save_dev: bool) -> Operation {
    if !has_packages {
        Operation::Install
    } else if global {
        Operation::InstallGlobal
    } else if save_dev {
        Operation::InstallDev
    } else {
        Operation::Install
    }
}

/// Install dependencies or add packages.
pub fn install<P: Probe>(
    ctx: &Context,
    detector: &Detector<P>,
    packages: &[String],
    save_dev: bool,
    global: bool,
) -> Result<()> {
    let op = install_operation(!packages.is_empty(), global, save_dev);
    Executor::new(detector, ctx).execute(op, packages, ExecOptions::default())?;
    output::success("Installation complete!", ctx.verbosity());
    Ok(())
}

/// Remove packages.
pub fn uninstall<P: Probe>(ctx: &Context, detector: &Detector<P>, packages: &[String]) -> Result<()> {
    Executor::new(detector, ctx).execute(Operation::Uninstall, packages, ExecOptions::default())?;
    output::success("Packages removed!", ctx.verbosity());
    Ok(())
}

/// Update some or all packages.
pub fn update<P: Probe>(ctx: &Context, detector: &Detector<P>, packages: &[String]) -> Result<()> {
    Executor::new(detector, ctx).execute(Operation::Update, packages, ExecOptions::default())?;
    output::success("Packages updated!", ctx.verbosity());
    Ok(())
}

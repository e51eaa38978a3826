//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine or an extension to do the work
//! 3. Formats and displays output
//!
//! One [`Detector`] is built per invocation, rooted at the command directory
//! and seeded with the configured package manager preference, so detection
//! runs at most once.

mod completion;
mod config_cmd;
mod extensions;
mod init;
mod nuke;
mod packages;
mod run;

// Re-export command functions for testing and direct invocation
pub use completion::{completion, write_completion};
pub use config_cmd::{alias_lines, config, custom_command_lines, extension_lines};
pub use extensions::{docker, gh, git, prisma, shadcn};
pub use init::{init, init_args, package_manager_field};
pub use nuke::{dir_size, find_node_modules, nuke};
pub use packages::{install, install_operation, uninstall, update};
pub use run::{external, lifecycle, run, scripts};

use crate::cli::args::Command;
use crate::core::config::ConfigStore;
use crate::engine::Context;
use crate::pm::{Detector, Operation};
use anyhow::Result;
use tracing::debug;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context, store: &mut ConfigStore) -> Result<()> {
    let detector = Detector::new(ctx.cwd(), store.config().pm.manager());
    debug!("Dispatching {:?} in {}", command, detector.root().display());

    match command {
        // Package manager operations
        Command::Install {
            packages,
            save_dev,
            global,
        } => install(ctx, &detector, &packages, save_dev, global),
        Command::Uninstall { packages } => uninstall(ctx, &detector, &packages),
        Command::Update { packages } => update(ctx, &detector, &packages),
        Command::Run { script, args } => run(ctx, &detector, &script, &args),
        Command::Start => lifecycle(ctx, &detector, Operation::Start),
        Command::Dev => lifecycle(ctx, &detector, Operation::Dev),
        Command::Build => lifecycle(ctx, &detector, Operation::Build),
        Command::Lint => lifecycle(ctx, &detector, Operation::Lint),
        Command::Scripts => scripts(ctx, &detector),
        Command::Init { yes, pm } => init(ctx, yes, pm),
        Command::Nuke { yes, dry_run } => nuke(ctx, yes, dry_run),

        // Setup
        Command::Config { action } => config(ctx, store, action),
        Command::Completion { shell } => completion(shell),

        // Extensions
        Command::Git { action } => git(ctx, store.config(), action),
        Command::Gh { action } => gh(ctx, store.config(), action),
        Command::Docker { action } => docker(ctx, store.config(), action),
        Command::Prisma { action } => prisma(ctx, store.config(), action),
        Command::Shadcn { action } => shadcn(ctx, store.config(), &detector, action),

        // Custom commands, bare script names, typos
        Command::External(words) => external(ctx, store.config(), &detector, &words),
    }
}

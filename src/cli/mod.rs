//! cli
//!
//! Command-line interface layer for xe.
//!
//! # Responsibilities
//!
//! - Load the user configuration once per process
//! - Expand an alias in first position before parsing
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands`], which call into [`crate::engine`] and [`crate::extensions`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::alias::AliasResolver;
use crate::core::config::{ConfigStore, LoadStatus};
use crate::engine::{self, ExecError, RunError};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::PromptError;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "XE_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    run_from(std::env::args().collect())
}

/// Run the CLI with an explicit argument vector (program name first).
pub fn run_from(args: Vec<String>) -> Result<()> {
    // Flags are not parsed yet; config loading may already need to log.
    let debug = debug_requested(&args) || std::env::var_os("DEBUG").is_some();
    init_logging(debug);

    let mut store = ConfigStore::load().context("Failed to load configuration")?;
    let argv = AliasResolver::new(store.config()).preprocess(args);
    let cli = parse(argv)?;

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };

    // Completion scripts are redirected into files; keep them clean.
    let scripted = matches!(cli.command, args::Command::Completion { .. });
    if store.status() == LoadStatus::Created && !scripted {
        announce_created(&store, ctx.verbosity());
    }

    commands::dispatch(cli.command, &ctx, &mut store)
}

/// Parse `argv`. Help and version output exit here with status 0; usage
/// errors are returned so they exit like every other failure.
fn parse(argv: Vec<String>) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(argv).or_else(|err| {
        if err.use_stderr() {
            Err(err)
        } else {
            err.exit()
        }
    })
}

/// Whether `--debug` is among the global flags ahead of the subcommand.
/// Anything after the subcommand may belong to a script or a wrapped tool.
fn debug_requested(args: &[String]) -> bool {
    let mut tokens = args.iter().skip(1);
    while let Some(token) = tokens.next() {
        match token.as_str() {
            "--debug" => return true,
            "--cwd" => {
                tokens.next();
            }
            "--" => return false,
            flag if flag.starts_with('-') => {}
            _ => return false,
        }
    }
    false
}

fn init_logging(debug: bool) {
    let default = if debug { "xe_cli=debug" } else { "xe_cli=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A second initialization (tests driving run_from) keeps the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn announce_created(store: &ConfigStore, verbosity: Verbosity) {
    output::success(
        format!("Created default config at: {}", store.path().display()),
        verbosity,
    );
    output::info(
        format!("You can customize your config at: {}", store.path().display()),
        verbosity,
    );
}

/// Whether the failure is the user backing out of a prompt.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<PromptError>(),
            Some(PromptError::Cancelled)
        )
    })
}

/// The child-process failure anywhere in the chain.
fn exec_error(err: &anyhow::Error) -> Option<&ExecError> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<ExecError>()
            .or_else(|| cause.downcast_ref::<RunError>().and_then(RunError::exec_error))
    })
}

/// Print an error with its causes, then any captured child stderr.
pub fn report_error(err: &anyhow::Error) {
    // clap renders its own message and usage.
    if let Some(usage) = err.downcast_ref::<clap::Error>() {
        let _ = usage.print();
        return;
    }

    output::error(err);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
    if let Some(stderr) = exec_error(err).and_then(ExecError::stderr) {
        eprintln!("\n{}", stderr.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn cancellation_is_found_under_context() {
        let err = anyhow::Error::new(PromptError::Cancelled).context("Choose a package manager with --pm");
        assert!(is_cancelled(&err));
        assert!(!is_cancelled(&anyhow!("boom")));
        assert!(!is_cancelled(&anyhow::Error::new(PromptError::NotInteractive)));
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn debug_flag_only_counts_before_the_subcommand() {
        assert!(debug_requested(&argv(&["xe", "--debug", "install"])));
        assert!(debug_requested(&argv(&["xe", "-q", "--cwd", "app", "--debug", "ls"])));
        assert!(!debug_requested(&argv(&["xe", "run", "test", "--debug"])));
        assert!(!debug_requested(&argv(&["xe", "build", "--debug"])));
        assert!(!debug_requested(&argv(&["xe", "--cwd", "--debug", "ls"])));
        assert!(!debug_requested(&argv(&["xe"])));
    }

    #[test]
    fn usage_errors_are_returned_not_exited() {
        let err = parse(argv(&["xe", "uninstall"])).unwrap_err();
        assert!(err.use_stderr());

        let wrapped = anyhow::Error::new(err);
        assert!(wrapped.downcast_ref::<clap::Error>().is_some());
        assert!(!is_cancelled(&wrapped));
    }

    #[test]
    fn global_flags_still_parse() {
        let cli = parse(argv(&["xe", "--debug", "--no-interactive", "ls"])).unwrap();
        assert!(cli.debug);
        assert!(!cli.interactive());
    }

    #[test]
    fn captured_stderr_is_reachable_through_run_error() {
        let failed = ExecError::Failed {
            command: "npm run lint".to_string(),
            code: Some(2),
            stderr: Some("lint: 3 problems".to_string()),
        };
        let err = anyhow::Error::new(RunError::Exec(failed)).context("Lint failed");
        assert_eq!(
            exec_error(&err).and_then(ExecError::stderr),
            Some("lint: 3 problems")
        );
    }
}

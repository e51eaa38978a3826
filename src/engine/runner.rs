//! engine::runner
//!
//! Fallback for a first token that matches no registered subcommand.
//!
//! # Resolution
//!
//! ```text
//! token -> custom command?  -> run through the shell, remaining args appended
//!       -> manifest script? -> Executor::execute(Run, [token, args..])
//!       -> NotFound         -> report, list scripts, suggest near matches
//! ```
//!
//! Deciding is pure ([`plan_unknown`]); acting on the decision is
//! [`handle_unknown`]. Aliases never reach this module: they are expanded
//! before argument parsing.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::executor::{ExecOptions, Executor};
use super::process::{self, ExecError};
use super::Context;
use crate::core::alias::{AliasResolver, TokenKind};
use crate::core::config::XeConfig;
use crate::core::manifest::{Manifest, ManifestError, Script};
use crate::pm::{Detector, Operation, PmError, Probe};
use crate::ui::output;

/// Maximum number of "did you mean" suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

/// Errors from running commands and scripts.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no command specified\nRun \"xe --help\" to see available commands")]
    NoCommand,

    #[error("unknown command: {0}\nRun \"xe --help\" to see available commands")]
    UnknownCommand(String),

    #[error("script \"{name}\" not found in package.json")]
    ScriptNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Manager(#[from] PmError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl RunError {
    /// The child-process failure underneath, if any.
    pub fn exec_error(&self) -> Option<&ExecError> {
        match self {
            RunError::Exec(e) => Some(e),
            RunError::Manager(PmError::InstallFailed { source, .. }) => Some(source),
            _ => None,
        }
    }
}

/// What an unknown token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// A custom command; `command` is the full shell line.
    Custom { command: String },
    /// A script declared in the manifest.
    Script { name: String },
    /// Nothing matched.
    NotFound(NotFound),
}

/// Everything needed to report an unmatched token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub name: String,
    /// Whether a manifest exists at all.
    pub manifest_present: bool,
    /// Declared scripts, in declaration order.
    pub scripts: Vec<Script>,
    pub suggestions: Vec<String>,
}

/// Decide what `token` refers to in `dir`.
pub fn plan_unknown(token: &str, config: &XeConfig, dir: &Path) -> Result<Fallback, ManifestError> {
    let resolver = AliasResolver::new(config);
    if resolver.classify(token) == TokenKind::Custom {
        return Ok(Fallback::Custom {
            command: resolver.resolve(token).to_string(),
        });
    }

    let Some(manifest) = Manifest::load(dir)? else {
        return Ok(Fallback::NotFound(NotFound {
            name: token.to_string(),
            manifest_present: false,
            scripts: Vec::new(),
            suggestions: Vec::new(),
        }));
    };

    if manifest.script(token).is_some() {
        return Ok(Fallback::Script {
            name: token.to_string(),
        });
    }

    Ok(Fallback::NotFound(NotFound {
        name: token.to_string(),
        manifest_present: true,
        scripts: manifest.scripts().map(<[Script]>::to_vec).unwrap_or_default(),
        suggestions: suggest(token, &manifest.script_names())
            .into_iter()
            .map(str::to_string)
            .collect(),
    }))
}

/// Names similar to `input`, case-insensitively: a name qualifies if it starts
/// with or contains the input, or the input contains it. At most
/// [`MAX_SUGGESTIONS`], in the order given.
pub fn suggest<'n>(input: &str, names: &[&'n str]) -> Vec<&'n str> {
    let input = input.to_lowercase();
    names
        .iter()
        .copied()
        .filter(|name| {
            let name = name.to_lowercase();
            name.starts_with(&input) || name.contains(&input) || input.contains(&name)
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Resolve and run an unknown command. `operands` is the token followed by
/// its arguments.
pub fn handle_unknown<P: Probe>(
    operands: &[String],
    config: &XeConfig,
    detector: &Detector<P>,
    ctx: &Context,
) -> Result<(), RunError> {
    let Some((token, args)) = operands.split_first() else {
        return Err(RunError::NoCommand);
    };
    let verbosity = ctx.verbosity();
    let dir = detector.root();

    match plan_unknown(token, config, dir)? {
        Fallback::Custom { command } => {
            output::info(format!("Executing custom command: {}", token), verbosity);
            debug!("Full command: {}", command);
            process::run_shell(&command, args, dir)?;
            output::success("Custom command completed!", verbosity);
            Ok(())
        }
        Fallback::Script { name } => {
            output::info(format!("Running script: {}", name), verbosity);
            let mut run_args = Vec::with_capacity(args.len() + 1);
            run_args.push(name);
            run_args.extend(args.iter().cloned());
            Executor::new(detector, ctx).execute(Operation::Run, &run_args, ExecOptions::default())
        }
        Fallback::NotFound(not_found) => Err(report_not_found(not_found)),
    }
}

/// Print the available scripts and suggestions, and build the matching error.
pub fn report_not_found(not_found: NotFound) -> RunError {
    if !not_found.manifest_present {
        return RunError::UnknownCommand(not_found.name);
    }

    if not_found.scripts.is_empty() {
        println!("No scripts defined in package.json");
    } else {
        println!("\nAvailable scripts:");
        for script in &not_found.scripts {
            println!("  {}: {}", script.name, script.command);
        }
    }

    if !not_found.suggestions.is_empty() {
        println!("\nDid you mean one of these?");
        for name in &not_found.suggestions {
            println!("  xe {}", name);
        }
    }
    println!();

    RunError::ScriptNotFound {
        name: not_found.name,
        suggestions: not_found.suggestions,
    }
}

/// Print every declared script with its command line.
pub fn list_scripts(dir: &Path, ctx: &Context) -> Result<(), RunError> {
    let verbosity = ctx.verbosity();
    let Some(manifest) = Manifest::load(dir)? else {
        output::warn("No package.json found in current directory", verbosity);
        return Ok(());
    };

    match manifest.scripts() {
        Some(scripts) if !scripts.is_empty() => {
            println!("\nAvailable scripts:");
            for script in scripts {
                println!("  {}", script.name);
                println!("    {}", script.command);
            }
            println!();
        }
        _ => output::info("No scripts defined in package.json", verbosity),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pm::detector::tests::FakeProbe;
    use crate::pm::PackageManager;
    use std::fs;
    use tempfile::TempDir;

    fn project(scripts: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            format!(r#"{{"name": "demo", "scripts": {}}}"#, scripts),
        )
        .unwrap();
        temp
    }

    fn quiet_ctx() -> Context {
        Context {
            quiet: true,
            interactive: false,
            ..Context::default()
        }
    }

    #[test]
    fn custom_command_is_kept_whole() {
        let temp = TempDir::new().unwrap();
        let mut config = XeConfig::default();
        config.custom_commands.insert(
            "deploy".to_string(),
            "npm run build && npm run push".to_string(),
        );

        let plan = plan_unknown("deploy", &config, temp.path()).unwrap();
        assert_eq!(
            plan,
            Fallback::Custom {
                command: "npm run build && npm run push".to_string()
            }
        );
    }

    #[test]
    fn declared_script_is_found() {
        let temp = project(r#"{"build": "tsc", "test": "vitest"}"#);
        let plan = plan_unknown("test", &XeConfig::default(), temp.path()).unwrap();
        assert_eq!(
            plan,
            Fallback::Script {
                name: "test".to_string()
            }
        );
    }

    #[test]
    fn no_manifest_is_not_found_without_suggestions() {
        let temp = TempDir::new().unwrap();
        match plan_unknown("build", &XeConfig::default(), temp.path()).unwrap() {
            Fallback::NotFound(nf) => {
                assert!(!nf.manifest_present);
                assert!(nf.suggestions.is_empty());
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn missing_script_suggests_in_declaration_order() {
        let temp = project(
            r#"{"test:unit": "a", "lint": "b", "test:e2e": "c", "pretest": "d", "test": "e"}"#,
        );
        match plan_unknown("tes", &XeConfig::default(), temp.path()).unwrap() {
            Fallback::NotFound(nf) => {
                assert!(nf.manifest_present);
                assert_eq!(nf.scripts.len(), 5);
                assert_eq!(nf.suggestions, vec!["test:unit", "test:e2e", "pretest", "test"]);
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn manifest_without_scripts_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();
        match plan_unknown("dev", &XeConfig::default(), temp.path()).unwrap() {
            Fallback::NotFound(nf) => {
                assert!(nf.manifest_present);
                assert!(nf.scripts.is_empty());
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn suggestions_are_capped() {
        let names = ["b1", "b2", "b3", "b4", "b5", "b6", "b7"];
        assert_eq!(suggest("b", &names), vec!["b1", "b2", "b3", "b4", "b5"]);
    }

    #[test]
    fn suggestions_match_case_insensitively_both_ways() {
        let names = ["Build", "dev", "watch"];
        assert_eq!(suggest("BUI", &names), vec!["Build"]);
        assert_eq!(suggest("devserver", &names), vec!["dev"]);
        assert!(suggest("zzz", &names).is_empty());
    }

    #[test]
    fn handle_unknown_without_manifest_is_unknown_command() {
        let temp = TempDir::new().unwrap();
        let detector = Detector::with_probe(temp.path(), None, FakeProbe::with(&[]));
        let err = handle_unknown(
            &["frobnicate".to_string()],
            &XeConfig::default(),
            &detector,
            &quiet_ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, RunError::UnknownCommand(ref name) if name == "frobnicate"));
    }

    #[test]
    fn handle_unknown_reports_missing_script() {
        let temp = project(r#"{"build": "tsc"}"#);
        let detector = Detector::with_probe(temp.path(), None, FakeProbe::with(&[]));
        let err = handle_unknown(
            &["buil".to_string()],
            &XeConfig::default(),
            &detector,
            &quiet_ctx(),
        )
        .unwrap_err();
        match err {
            RunError::ScriptNotFound { name, suggestions } => {
                assert_eq!(name, "buil");
                assert_eq!(suggestions, vec!["build"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn handle_unknown_needs_a_token() {
        let temp = TempDir::new().unwrap();
        let detector = Detector::with_probe(temp.path(), None, FakeProbe::with(&[]));
        let err = handle_unknown(&[], &XeConfig::default(), &detector, &quiet_ctx()).unwrap_err();
        assert!(matches!(err, RunError::NoCommand));
    }

    #[test]
    fn script_run_checks_manager_first() {
        let temp = project(r#"{"build": "tsc"}"#);
        let detector = Detector::with_probe(
            temp.path(),
            Some(PackageManager::Npm),
            FakeProbe::with(&[]),
        );
        let err = handle_unknown(
            &["build".to_string()],
            &XeConfig::default(),
            &detector,
            &quiet_ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, RunError::Manager(PmError::NotInstalled { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn custom_command_runs_through_shell() {
        let temp = TempDir::new().unwrap();
        let mut config = XeConfig::default();
        config
            .custom_commands
            .insert("mk".to_string(), "touch one && touch".to_string());
        let detector = Detector::with_probe(temp.path(), None, FakeProbe::with(&[]));

        handle_unknown(
            &["mk".to_string(), "two".to_string()],
            &config,
            &detector,
            &quiet_ctx(),
        )
        .unwrap();

        assert!(temp.path().join("one").exists());
        assert!(temp.path().join("two").exists());
    }
}

//! run command - Scripts, lifecycle shortcuts, and the unknown-command fallback

use crate::core::config::XeConfig;
use crate::core::manifest::{Manifest, Script};
use crate::engine::runner::report_not_found;
use crate::engine::{self, suggest, Context, ExecOptions, Executor, NotFound};
use crate::pm::{Detector, Operation, Probe};
use anyhow::Result;

/// Run a manifest script. A manifest that exists but lacks the script is
/// reported with its scripts and near matches; without a manifest the
/// package manager gets to decide.
pub fn run<P: Probe>(
    ctx: &Context,
    detector: &Detector<P>,
    script: &str,
    args: &[String],
) -> Result<()> {
    if let Some(manifest) = Manifest::load(detector.root())? {
        if manifest.script(script).is_none() {
            let not_found = NotFound {
                name: script.to_string(),
                manifest_present: true,
                scripts: manifest.scripts().map(<[Script]>::to_vec).unwrap_or_default(),
                suggestions: suggest(script, &manifest.script_names())
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            };
            return Err(report_not_found(not_found).into());
        }
    }

    let mut run_args = Vec::with_capacity(args.len() + 1);
    run_args.push(script.to_string());
    run_args.extend(args.iter().cloned());
    Executor::new(detector, ctx).execute(Operation::Run, &run_args, ExecOptions::default())?;
    Ok(())
}

/// `start`, `dev`, `build` or `lint`.
pub fn lifecycle<P: Probe>(ctx: &Context, detector: &Detector<P>, op: Operation) -> Result<()> {
    Executor::new(detector, ctx).execute(op, &[], ExecOptions::default())?;
    Ok(())
}

/// List manifest scripts.
pub fn scripts<P: Probe>(ctx: &Context, detector: &Detector<P>) -> Result<()> {
    engine::list_scripts(detector.root(), ctx)?;
    Ok(())
}

/// Custom command, manifest script, or NotFound.
pub fn external<P: Probe>(
    ctx: &Context,
    config: &XeConfig,
    detector: &Detector<P>,
    words: &[String],
) -> Result<()> {
    engine::handle_unknown(words, config, detector, ctx)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RunError;
    use crate::pm::detector::tests::FakeProbe;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_script_is_reported_with_suggestions() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"scripts": {"test": "vitest", "test:e2e": "playwright test"}}"#,
        )
        .unwrap();
        let detector = Detector::with_probe(temp.path(), None, FakeProbe::with(&[]));
        let ctx = Context {
            cwd: Some(temp.path().to_path_buf()),
            quiet: true,
            interactive: false,
            ..Context::default()
        };

        let err = run(&ctx, &detector, "tes", &[]).unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::ScriptNotFound { name, suggestions }) => {
                assert_eq!(name, "tes");
                assert_eq!(suggestions, &vec!["test".to_string(), "test:e2e".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Reported before any manager is probed.
        assert_eq!(detector.probe().calls.get(), 0);
    }
}

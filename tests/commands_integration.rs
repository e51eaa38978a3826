//! Integration tests for the xe binary.
//!
//! Every test points XE_CONFIG at a temporary file and runs in a temporary
//! project directory, so nothing touches the real home directory. None of
//! these tests need a package manager on PATH.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A project directory with its own config file.
struct Project {
    dir: TempDir,
    home: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    /// A project whose package.json declares `scripts`.
    fn with_scripts(scripts: &str) -> Self {
        let project = Self::new();
        project
            .dir
            .child("package.json")
            .write_str(&format!(r#"{{"name": "demo", "scripts": {}}}"#, scripts))
            .unwrap();
        project
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.home.path().join(".xerc")
    }

    fn xe(&self) -> Command {
        let mut cmd = Command::cargo_bin("xe").unwrap();
        cmd.current_dir(self.dir.path())
            .env("XE_CONFIG", self.config_path())
            .env_remove("XE_LOG")
            .env_remove("DEBUG")
            .env_remove("VISUAL")
            .env_remove("EDITOR");
        cmd
    }

    /// Run `xe --no-interactive <args>` and require success.
    fn ok(&self, args: &[&str]) {
        self.xe()
            .arg("--no-interactive")
            .args(args)
            .assert()
            .success();
    }
}

// =============================================================================
// Config file lifecycle
// =============================================================================

#[test]
fn first_run_creates_config() {
    let project = Project::new();
    project
        .xe()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default config at:"));

    project.home.child(".xerc").assert(predicate::path::exists());
}

#[test]
fn malformed_config_is_replaced_with_defaults() {
    let project = Project::new();
    project.home.child(".xerc").write_str("{ not json").unwrap();

    project
        .xe()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pm": "auto""#));

    project
        .home
        .child(".xerc")
        .assert(predicate::str::contains(r#""version": "1.0.0""#));
}

#[test]
fn undecodable_config_does_not_block_commands() {
    let project = Project::new();
    project
        .home
        .child(".xerc")
        .write_binary(&[0xff, 0xfe, b'{', b'}'])
        .unwrap();

    project.ok(&["config", "alias-add", "b", "run build"]);
    project
        .home
        .child(".xerc")
        .assert(predicate::str::contains(r#""b": "run build""#));
}

#[test]
fn bad_field_keeps_the_rest_of_the_config() {
    let project = Project::with_scripts(r#"{"build": "vite build"}"#);
    project
        .home
        .child(".xerc")
        .write_str(r#"{"pm": "PNPM", "aliases": {"s": "scripts"}}"#)
        .unwrap();

    project
        .xe()
        .arg("s")
        .assert()
        .success()
        .stdout(predicate::str::contains("vite build"))
        .stderr(predicate::str::contains("Ignoring 'pm'"));
}

#[test]
fn alias_add_then_list() {
    let project = Project::new();
    project.ok(&["config", "alias-add", "b", "run build"]);

    project
        .xe()
        .args(["config", "alias-list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b -> run build"));
}

#[test]
fn invalid_package_manager_is_rejected() {
    let project = Project::new();
    project
        .xe()
        .args(["config", "set-pm", "cargo"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("npm, pnpm, yarn, bun, auto"));
}

#[test]
fn reset_without_terminal_asks_for_yes() {
    let project = Project::new();
    project
        .xe()
        .args(["config", "reset", "--no-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    project.ok(&["config", "reset", "-y"]);
}

// =============================================================================
// Aliases and the unknown-command fallback
// =============================================================================

#[test]
fn alias_expands_to_subcommand() {
    let project = Project::with_scripts(r#"{"build": "vite build"}"#);
    project.ok(&["config", "alias-add", "s", "scripts"]);

    project
        .xe()
        .arg("s")
        .assert()
        .success()
        .stdout(predicate::str::contains("vite build"));
}

#[test]
fn unknown_command_without_manifest() {
    let project = Project::new();
    project
        .xe()
        .arg("deploy")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command: deploy"));
}

#[test]
fn unknown_script_lists_scripts_and_suggestions() {
    let project = Project::with_scripts(
        r#"{"test": "vitest", "test:e2e": "playwright test", "build": "vite build"}"#,
    );

    project
        .xe()
        .arg("tes")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Available scripts:"))
        .stdout(predicate::str::contains("  build: vite build"))
        .stdout(predicate::str::contains("Did you mean one of these?"))
        .stdout(predicate::str::contains("  xe test\n  xe test:e2e"))
        .stderr(predicate::str::contains(r#"script "tes" not found"#));
}

#[test]
fn run_checks_the_manifest_first() {
    let project = Project::with_scripts(r#"{"lint": "eslint ."}"#);
    project
        .xe()
        .args(["run", "fmt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("  lint: eslint ."))
        .stderr(predicate::str::contains("not found in package.json"));
}

#[cfg(unix)]
#[test]
fn custom_command_runs_through_the_shell() {
    let project = Project::new();
    project.ok(&["config", "cmd-add", "greet", "echo one && echo two"]);

    project
        .xe()
        .args(["greet", "extra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one\ntwo extra"));
}

#[cfg(unix)]
#[test]
fn failing_custom_command_exits_nonzero() {
    let project = Project::new();
    project.ok(&["config", "cmd-add", "boom", "exit 3"]);

    project
        .xe()
        .arg("boom")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exited with status 3"));
}

// =============================================================================
// Scripts, nuke, extensions, completion
// =============================================================================

#[test]
fn scripts_without_manifest_warns() {
    let project = Project::new();
    project
        .xe()
        .arg("ls")
        .assert()
        .success()
        .stderr(predicate::str::contains("No package.json found"));
}

#[test]
fn nuke_dry_run_keeps_directories() {
    let project = Project::new();
    project
        .dir
        .child("app/node_modules/pkg/index.js")
        .write_str("module.exports = 1;")
        .unwrap();

    project
        .xe()
        .args(["nuke", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 node_modules directory:"))
        .stdout(predicate::str::contains("Dry run - no directories were deleted."));

    project
        .dir
        .child("app/node_modules")
        .assert(predicate::path::exists());
}

#[test]
fn disabled_extension_names_the_fix() {
    let project = Project::new();
    project.ok(&["config", "ext-disable", "docker"]);

    project
        .xe()
        .args(["dk", "ps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xe config ext-enable docker"));
}

#[test]
fn shadcn_remove_missing_component() {
    let project = Project::new();
    project
        .xe()
        .args(["shadcn", "rm", "button", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("component 'button' not found"));
}

#[test]
fn usage_error_exits_with_one() {
    let project = Project::new();
    project
        .xe()
        .arg("uninstall")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("error: error:").not());
}

#[test]
fn version_still_exits_cleanly() {
    let project = Project::new();
    project
        .xe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xe"));
}

#[test]
fn completion_output_is_clean() {
    let project = Project::new();
    project
        .xe()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_xe"))
        .stdout(predicate::str::contains("Created default config").not());
}

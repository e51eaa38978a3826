//! extensions::docker
//!
//! Compose lifecycle verbs go to `docker-compose`; `ps`, `prune` and anything
//! unrecognized go to `docker`.

use anyhow::{Context as _, Result};

use super::{passthrough as forward, run_tool};
use crate::engine::Context;
use crate::ui::output;

const DOCKER: &str = "docker";
const COMPOSE: &str = "docker-compose";

/// A `docker-compose` verb without arguments of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeVerb {
    Up,
    Down,
    Restart,
    Build,
}

impl ComposeVerb {
    fn args(self) -> &'static [&'static str] {
        match self {
            ComposeVerb::Up => &["up", "-d"],
            ComposeVerb::Down => &["down"],
            ComposeVerb::Restart => &["restart"],
            ComposeVerb::Build => &["build"],
        }
    }

    fn messages(self) -> (&'static str, &'static str) {
        match self {
            ComposeVerb::Up => ("Starting containers...", "Containers started!"),
            ComposeVerb::Down => ("Stopping containers...", "Containers stopped!"),
            ComposeVerb::Restart => ("Restarting containers...", "Containers restarted!"),
            ComposeVerb::Build => ("Building images...", "Images built!"),
        }
    }
}

/// Arguments for `docker-compose logs`.
pub fn logs_args(service: Option<&str>, follow: bool) -> Vec<String> {
    let mut args = vec!["logs".to_string()];
    if follow {
        args.push("-f".to_string());
    }
    args.extend(service.map(str::to_string));
    args
}

/// Arguments for `docker-compose exec`; a terminal is allocated unless `no_it`.
pub fn exec_args(service: &str, command: &[String], no_it: bool) -> Vec<String> {
    let mut args = vec!["exec".to_string()];
    if !no_it {
        args.push("-it".to_string());
    }
    args.push(service.to_string());
    args.extend(command.iter().cloned());
    args
}

/// Arguments for `docker system prune`.
pub fn prune_args(all: bool, volumes: bool) -> Vec<&'static str> {
    let mut args = vec!["system", "prune", "-f"];
    if all {
        args.push("-a");
    }
    if volumes {
        args.push("--volumes");
    }
    args
}

pub fn compose(ctx: &Context, verb: ComposeVerb) -> Result<()> {
    let verbosity = ctx.verbosity();
    let (before, after) = verb.messages();
    output::info(before, verbosity);
    run_tool(ctx, COMPOSE, verb.args()).with_context(|| format!("Docker {:?} failed", verb))?;
    output::success(after, verbosity);
    Ok(())
}

pub fn logs(ctx: &Context, service: Option<&str>, follow: bool) -> Result<()> {
    run_tool(ctx, COMPOSE, logs_args(service, follow)).context("Docker logs failed")
}

pub fn ps(ctx: &Context) -> Result<()> {
    run_tool(ctx, DOCKER, ["ps"]).context("Docker ps failed")
}

/// `stop` or `start`, optionally for one service.
pub fn service_state(ctx: &Context, start: bool, service: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    let (verb, before, after) = if start {
        ("start", "Starting containers...", "Containers started!")
    } else {
        ("stop", "Stopping containers...", "Containers stopped!")
    };

    output::info(before, verbosity);
    let mut args = vec![verb];
    args.extend(service);
    run_tool(ctx, COMPOSE, args).with_context(|| format!("Docker {} failed", verb))?;
    output::success(after, verbosity);
    Ok(())
}

pub fn exec(ctx: &Context, service: &str, command: &[String], no_it: bool) -> Result<()> {
    run_tool(ctx, COMPOSE, exec_args(service, command, no_it)).context("Docker exec failed")
}

pub fn prune(ctx: &Context, all: bool, volumes: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::info("Pruning docker resources...", verbosity);
    run_tool(ctx, DOCKER, prune_args(all, volumes)).context("Docker prune failed")?;
    output::success("Docker resources pruned!", verbosity);
    Ok(())
}

/// Any other docker command.
pub fn passthrough(ctx: &Context, words: &[String]) -> Result<()> {
    forward(ctx, DOCKER, &[], words).context("Docker command failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_is_detached() {
        assert_eq!(ComposeVerb::Up.args(), &["up", "-d"]);
    }

    #[test]
    fn logs_follow_before_service() {
        assert_eq!(logs_args(Some("web"), true), vec!["logs", "-f", "web"]);
        assert_eq!(logs_args(None, false), vec!["logs"]);
    }

    #[test]
    fn exec_allocates_terminal_by_default() {
        let cmd = vec!["sh".to_string(), "-c".to_string(), "ls".to_string()];
        assert_eq!(exec_args("db", &cmd, false), vec!["exec", "-it", "db", "sh", "-c", "ls"]);
        assert_eq!(exec_args("db", &cmd, true), vec!["exec", "db", "sh", "-c", "ls"]);
    }

    #[test]
    fn prune_flags() {
        assert_eq!(prune_args(false, false), vec!["system", "prune", "-f"]);
        assert_eq!(
            prune_args(true, true),
            vec!["system", "prune", "-f", "-a", "--volumes"]
        );
    }
}

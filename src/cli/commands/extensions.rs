//! git, gh, docker, prisma, shadcn commands - Extension namespaces
//!
//! Each handler refuses to run when its extension is disabled, then maps the
//! parsed action onto [`crate::extensions`].

use crate::cli::args::{DockerAction, GhAction, GitAction, PrismaAction, ShadcnAction};
use crate::core::config::{Extension, XeConfig};
use crate::engine::Context;
use crate::extensions::docker::{self as docker_ext, ComposeVerb};
use crate::extensions::{self, git as git_ext, github, prisma as prisma_ext, shadcn as shadcn_ext};
use crate::pm::{Detector, Probe};
use anyhow::Result;

pub fn git(ctx: &Context, config: &XeConfig, action: GitAction) -> Result<()> {
    extensions::require(config, Extension::Git)?;
    match action {
        GitAction::Add { files } => git_ext::add(ctx, &files),
        GitAction::Push {
            remote,
            branch,
            set_upstream,
        } => git_ext::push(ctx, remote.as_deref(), branch.as_deref(), set_upstream),
        GitAction::Save { message } => git_ext::save(ctx, message.as_deref()),
        GitAction::Sync => git_ext::sync(ctx),
        GitAction::Passthrough(words) => git_ext::passthrough(ctx, &words),
    }
}

pub fn gh(ctx: &Context, config: &XeConfig, action: Option<GhAction>) -> Result<()> {
    extensions::require(config, Extension::Github)?;
    let Some(action) = action else {
        return github::dashboard(ctx);
    };

    match action {
        GhAction::RepoCreate {
            name,
            public,
            private,
        } => github::repo_create(ctx, &name, public, private),
        GhAction::PrCreate => github::pr_create(ctx),
        GhAction::PrCheckout { number } => github::pr_checkout(ctx, &number),
        GhAction::PrMerge {
            number,
            squash,
            rebase,
            merge,
        } => github::pr_merge(
            ctx,
            number.as_deref(),
            github::MergeStrategy::from_flags(squash, rebase, merge),
        ),
        GhAction::PrView { number } => github::pr_view(ctx, number.as_deref()),
        GhAction::IssueCreate => github::issue_create(ctx),
        GhAction::CloneRepo { repo } => github::clone(ctx, &repo),
        GhAction::Auth => github::auth(ctx),
        GhAction::Ship { message } => github::ship(ctx, message.as_deref()),
        GhAction::Sync => github::sync(ctx),
        GhAction::Quickfix { issue } => github::quickfix(ctx, &issue),
        GhAction::Approve { pr, comment } => github::approve(ctx, &pr, comment.as_deref()),
        GhAction::Passthrough(words) => github::passthrough(ctx, &words),
    }
}

pub fn docker(ctx: &Context, config: &XeConfig, action: DockerAction) -> Result<()> {
    extensions::require(config, Extension::Docker)?;
    match action {
        DockerAction::Up => docker_ext::compose(ctx, ComposeVerb::Up),
        DockerAction::Down => docker_ext::compose(ctx, ComposeVerb::Down),
        DockerAction::Restart => docker_ext::compose(ctx, ComposeVerb::Restart),
        DockerAction::Build => docker_ext::compose(ctx, ComposeVerb::Build),
        DockerAction::Logs { service, follow } => docker_ext::logs(ctx, service.as_deref(), follow),
        DockerAction::Ps => docker_ext::ps(ctx),
        DockerAction::Stop { service } => docker_ext::service_state(ctx, false, service.as_deref()),
        DockerAction::Start { service } => docker_ext::service_state(ctx, true, service.as_deref()),
        DockerAction::Exec {
            service,
            command,
            no_it,
        } => docker_ext::exec(ctx, &service, &command, no_it),
        DockerAction::Prune { all, volumes } => docker_ext::prune(ctx, all, volumes),
        DockerAction::Passthrough(words) => docker_ext::passthrough(ctx, &words),
    }
}

pub fn prisma(ctx: &Context, config: &XeConfig, action: Option<PrismaAction>) -> Result<()> {
    extensions::require(config, Extension::Prisma)?;
    match action {
        None => prisma_ext::workflow(ctx),
        Some(PrismaAction::Generate) => prisma_ext::generate(ctx),
        Some(PrismaAction::Migrate { name, args }) => prisma_ext::migrate(ctx, &args, name.as_deref()),
        Some(PrismaAction::Studio) => prisma_ext::studio(ctx),
        Some(PrismaAction::Push) => prisma_ext::push(ctx),
        Some(PrismaAction::Pull) => prisma_ext::pull(ctx),
        Some(PrismaAction::Passthrough(words)) => prisma_ext::passthrough(ctx, &words),
    }
}

pub fn shadcn<P: Probe>(
    ctx: &Context,
    config: &XeConfig,
    detector: &Detector<P>,
    action: ShadcnAction,
) -> Result<()> {
    extensions::require(config, Extension::Shadcn)?;
    match action {
        ShadcnAction::Init => shadcn_ext::init(ctx, detector),
        ShadcnAction::Add { components } => shadcn_ext::add(ctx, detector, &components),
        ShadcnAction::Remove { component, yes } => shadcn_ext::remove(ctx, &component, yes),
    }
}

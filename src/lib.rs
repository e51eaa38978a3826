//! xe - one command surface for npm, pnpm, yarn and bun
//!
//! xe detects which package manager governs a project and translates a fixed
//! set of logical operations (install, run, build, ...) into that manager's
//! own command line. Around that core sit user aliases, shell-level custom
//! commands, a fallback that runs bare script names, and optional extensions
//! wrapping git, gh, docker, prisma and shadcn.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Process execution, the package manager executor, the unknown-command fallback
//! - [`pm`] - Package manager registry, detection, install pre-flight
//! - [`core`] - User configuration, alias resolution, the project manifest
//! - [`extensions`] - Optional wrappers around external developer tools
//! - [`ui`] - User interaction utilities
//!
//! # Invariants
//!
//! 1. Detection precedence is preference, lock file, manifest field, binary probe, npm
//! 2. Configuration is loaded once per process and every change is written before returning
//! 3. Failed child processes are never retried

pub mod cli;
pub mod core;
pub mod engine;
pub mod extensions;
pub mod pm;
pub mod ui;

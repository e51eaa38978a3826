//! core
//!
//! User-level and project-level data xe reads and writes.
//!
//! # Modules
//!
//! - [`config`] - The per-user configuration file and its schema
//! - [`alias`] - Classifies tokens as aliases or custom commands and expands them
//! - [`manifest`] - Read-only view of package.json plus the packageManager writer
//!
//! # Design Principles
//!
//! - Configuration is an explicit value passed by reference, never a global
//! - Malformed input falls back to defaults rather than failing

pub mod alias;
pub mod config;
pub mod manifest;

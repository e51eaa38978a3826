//! nuke command - Delete every node_modules directory below the working directory

use crate::engine::Context;
use crate::ui::output::{self, format_bytes};
use crate::ui::prompts::{self, PromptError};
use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Deepest level searched below the root.
pub const MAX_DEPTH: usize = 10;

/// Directories never searched.
const SKIPPED: [&str; 3] = ["dist", "build", "coverage"];

const TARGET: &str = "node_modules";

/// A `node_modules` directory and its size on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub path: PathBuf,
    pub size: u64,
}

/// Every `node_modules` below `root`, in walk order.
///
/// Hidden directories and build output are skipped; a `node_modules` is
/// reported but never entered. Unreadable entries are ignored.
pub fn find_node_modules(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(MAX_DEPTH)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name == TARGET {
            found.push(entry.into_path());
            walker.skip_current_dir();
        } else if name.starts_with('.') || SKIPPED.contains(&name.as_str()) {
            walker.skip_current_dir();
        }
    }
    found
}

/// Total size of the regular files below `path`.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "directory"
    } else {
        "directories"
    }
}

/// Find, report, confirm and delete.
pub fn nuke(ctx: &Context, yes: bool, dry_run: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let root = ctx.cwd();

    output::info("Searching for node_modules directories...", verbosity);
    let found: Vec<Found> = find_node_modules(&root)
        .into_iter()
        .map(|path| Found {
            size: dir_size(&path),
            path,
        })
        .collect();

    if found.is_empty() {
        output::info("No node_modules directories found.", verbosity);
        return Ok(());
    }

    let total: u64 = found.iter().map(|f| f.size).sum();
    println!(
        "\nFound {} node_modules {}:",
        found.len(),
        plural(found.len())
    );
    for f in &found {
        let shown = f.path.strip_prefix(&root).unwrap_or(&f.path);
        println!("  {} ({})", shown.display(), format_bytes(f.size));
    }
    println!("\nTotal size: {}\n", format_bytes(total));

    if dry_run {
        output::info("Dry run - no directories were deleted.", verbosity);
        return Ok(());
    }

    if !yes {
        match prompts::confirm(
            "Are you sure you want to delete all these directories?",
            false,
            ctx.interactive,
        ) {
            Ok(true) => {}
            Ok(false) | Err(PromptError::Cancelled) => {
                output::info("Operation cancelled.", verbosity);
                return Ok(());
            }
            Err(e) => return Err(e).context("Use --yes to delete without a prompt"),
        }
    }

    let mut deleted = 0;
    let mut freed = 0;
    for f in &found {
        match fs::remove_dir_all(&f.path) {
            Ok(()) => {
                deleted += 1;
                freed += f.size;
                debug!("Deleted {}", f.path.display());
            }
            Err(e) => output::warn(
                format!("Failed to delete {}: {}", f.path.display(), e),
                verbosity,
            ),
        }
    }

    output::success(
        format!(
            "Deleted {} of {} node_modules {}, freed {}",
            deleted,
            found.len(),
            plural(found.len()),
            format_bytes(freed)
        ),
        verbosity,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdir(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn finds_nested_but_not_inner() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        mkdir(root, "node_modules/left-pad/node_modules/inner");
        mkdir(root, "packages/app/node_modules/react");
        mkdir(root, "dist/node_modules");
        mkdir(root, ".cache/node_modules");

        let found = find_node_modules(root);
        assert_eq!(
            found,
            vec![
                root.join("node_modules"),
                root.join("packages/app/node_modules"),
            ]
        );
    }

    #[test]
    fn depth_is_limited() {
        let temp = TempDir::new().unwrap();
        let deep = (0..MAX_DEPTH).map(|i| format!("d{}", i)).collect::<Vec<_>>().join("/");
        mkdir(temp.path(), &format!("{}/node_modules", deep));

        assert!(find_node_modules(temp.path()).is_empty());
    }

    #[test]
    fn size_counts_files() {
        let temp = TempDir::new().unwrap();
        let dir = mkdir(temp.path(), "node_modules/pkg");
        fs::write(dir.join("index.js"), vec![0u8; 100]).unwrap();
        fs::write(dir.join("package.json"), vec![0u8; 28]).unwrap();

        assert_eq!(dir_size(&temp.path().join("node_modules")), 128);
    }

    #[test]
    fn dry_run_deletes_nothing() {
        let temp = TempDir::new().unwrap();
        let target = mkdir(temp.path(), "node_modules/pkg");
        let ctx = Context {
            cwd: Some(temp.path().to_path_buf()),
            quiet: true,
            interactive: false,
            ..Context::default()
        };

        nuke(&ctx, false, true).unwrap();
        assert!(target.exists());
    }

    #[test]
    fn yes_deletes_everything_found() {
        let temp = TempDir::new().unwrap();
        mkdir(temp.path(), "node_modules/pkg");
        mkdir(temp.path(), "web/node_modules/pkg");
        let ctx = Context {
            cwd: Some(temp.path().to_path_buf()),
            quiet: true,
            interactive: false,
            ..Context::default()
        };

        nuke(&ctx, true, false).unwrap();
        assert!(find_node_modules(temp.path()).is_empty());
        assert!(temp.path().join("web").exists());
    }
}

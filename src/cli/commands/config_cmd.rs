//! config command - View and modify the user configuration

use crate::cli::args::ConfigAction;
use crate::core::config::{ConfigStore, Extension, PmPreference};
use crate::engine::process;
use crate::engine::Context;
use crate::ui::output;
use crate::ui::prompts::{self, PromptError};
use anyhow::{Context as _, Result};
use std::env;
use tracing::debug;

/// Dispatch a config action.
pub fn config(ctx: &Context, store: &mut ConfigStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
        ConfigAction::Show => show(store),
        ConfigAction::Edit => edit(ctx, store),
        ConfigAction::Reset { yes } => reset(ctx, store, yes),
        ConfigAction::ExtEnable { extension } => set_extension(ctx, store, &extension, true),
        ConfigAction::ExtDisable { extension } => set_extension(ctx, store, &extension, false),
        ConfigAction::ExtList => {
            println!("{}", extension_lines(store));
            Ok(())
        }
        ConfigAction::AliasAdd { alias, command } => {
            store.add_alias(&alias, &command)?;
            output::success(
                format!("Alias '{}' -> '{}' added", alias, command),
                ctx.verbosity(),
            );
            Ok(())
        }
        ConfigAction::AliasRemove { alias } => {
            if store.remove_alias(&alias)? {
                output::success(format!("Alias '{}' removed", alias), ctx.verbosity());
            } else {
                output::warn(format!("Alias '{}' not found", alias), ctx.verbosity());
            }
            Ok(())
        }
        ConfigAction::AliasList => {
            println!("{}", alias_lines(store));
            Ok(())
        }
        ConfigAction::CmdAdd { name, command } => {
            store.add_custom_command(&name, &command)?;
            output::success(format!("Custom command '{}' added", name), ctx.verbosity());
            Ok(())
        }
        ConfigAction::CmdRemove { name } => {
            if store.remove_custom_command(&name)? {
                output::success(format!("Custom command '{}' removed", name), ctx.verbosity());
            } else {
                output::warn(format!("Custom command '{}' not found", name), ctx.verbosity());
            }
            Ok(())
        }
        ConfigAction::CmdList => {
            println!("{}", custom_command_lines(store));
            Ok(())
        }
        ConfigAction::SetPm { manager } => {
            let preference: PmPreference = manager.parse()?;
            store.set_package_manager(preference)?;
            output::success(
                format!("Package manager set to: {}", preference),
                ctx.verbosity(),
            );
            Ok(())
        }
    }
}

fn show(store: &ConfigStore) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(store.config()).context("Failed to render configuration")?;
    println!("{}", rendered);
    Ok(())
}

/// `$VISUAL`, then `$EDITOR`, then the platform opener, then just the path.
fn edit(ctx: &Context, store: &ConfigStore) -> Result<()> {
    let path = store.path().display().to_string();
    let editor = ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty());

    if let Some(editor) = editor {
        debug!("Opening config with {}", editor);
        process::run_shell(&editor, &[path], &ctx.cwd())
            .context("Failed to open the config file in your editor")?;
        return Ok(());
    }

    match open::that(store.path()) {
        Ok(()) => output::info(format!("Opened {}", path), ctx.verbosity()),
        Err(e) => {
            debug!("No opener available: {}", e);
            println!("Config file: {}", path);
        }
    }
    Ok(())
}

fn reset(ctx: &Context, store: &mut ConfigStore, yes: bool) -> Result<()> {
    if !yes {
        match prompts::confirm(
            "Reset configuration to defaults? Aliases and custom commands will be lost.",
            false,
            ctx.interactive,
        ) {
            Ok(true) => {}
            Ok(false) | Err(PromptError::Cancelled) => {
                output::info("Cancelled", ctx.verbosity());
                return Ok(());
            }
            Err(e) => return Err(e).context("Use --yes to reset without a prompt"),
        }
    }

    store.reset()?;
    output::success("Config reset to defaults!", ctx.verbosity());
    Ok(())
}

fn set_extension(ctx: &Context, store: &mut ConfigStore, name: &str, enabled: bool) -> Result<()> {
    let extension: Extension = name.parse()?;
    store.set_extension(extension, enabled)?;
    let state = if enabled { "enabled" } else { "disabled" };
    output::success(format!("Extension '{}' {}", extension, state), ctx.verbosity());
    Ok(())
}

/// `ext-list` output.
pub fn extension_lines(store: &ConfigStore) -> String {
    let mut lines = vec!["Extensions status:".to_string()];
    for extension in Extension::ALL {
        let state = if store.config().extensions.is_enabled(extension) {
            "enabled"
        } else {
            "disabled"
        };
        lines.push(format!("  {}: {}", extension, state));
    }
    lines.join("\n")
}

/// `alias-list` output.
pub fn alias_lines(store: &ConfigStore) -> String {
    let aliases = &store.config().aliases;
    if aliases.is_empty() {
        return "No aliases configured".to_string();
    }
    let entries: Vec<String> = aliases
        .iter()
        .map(|(name, replacement)| format!("{} -> {}", name, replacement))
        .collect();
    format!("Configured aliases:\n{}", output::format_list(&entries, "  "))
}

/// `cmd-list` output.
pub fn custom_command_lines(store: &ConfigStore) -> String {
    let commands = &store.config().custom_commands;
    if commands.is_empty() {
        return "No custom commands configured".to_string();
    }
    let entries: Vec<String> = commands
        .iter()
        .map(|(name, command)| format!("{}: {}", name, command))
        .collect();
    format!("Custom commands:\n{}", output::format_list(&entries, "  "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> ConfigStore {
        ConfigStore::load_from(temp.path().join(".xerc")).unwrap()
    }

    fn quiet() -> Context {
        Context {
            quiet: true,
            interactive: false,
            ..Context::default()
        }
    }

    #[test]
    fn alias_add_and_list() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);
        assert_eq!(alias_lines(&store), "No aliases configured");

        config(
            &quiet(),
            &mut store,
            ConfigAction::AliasAdd {
                alias: "b".to_string(),
                command: "run build".to_string(),
            },
        )
        .unwrap();

        assert_eq!(alias_lines(&store), "Configured aliases:\n  b -> run build");
        let reloaded = ConfigStore::load_from(temp.path().join(".xerc")).unwrap();
        assert_eq!(reloaded.config().aliases.get("b").map(String::as_str), Some("run build"));
    }

    #[test]
    fn removing_missing_alias_succeeds() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);
        config(
            &quiet(),
            &mut store,
            ConfigAction::AliasRemove {
                alias: "nope".to_string(),
            },
        )
        .unwrap();
    }

    #[test]
    fn invalid_extension_lists_valid_names() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);
        let err = config(
            &quiet(),
            &mut store,
            ConfigAction::ExtDisable {
                extension: "kubernetes".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("git, github, prisma, docker, shadcn"));
    }

    #[test]
    fn extension_toggle_shows_in_list() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);
        config(
            &quiet(),
            &mut store,
            ConfigAction::ExtDisable {
                extension: "prisma".to_string(),
            },
        )
        .unwrap();

        let lines = extension_lines(&store);
        assert!(lines.contains("  prisma: disabled"));
        assert!(lines.contains("  git: enabled"));
    }

    #[test]
    fn set_pm_accepts_auto() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);
        for name in ["pnpm", "auto"] {
            config(
                &quiet(),
                &mut store,
                ConfigAction::SetPm {
                    manager: name.to_string(),
                },
            )
            .unwrap();
        }
        assert_eq!(store.config().pm, PmPreference::Auto);
        assert!(config(
            &quiet(),
            &mut store,
            ConfigAction::SetPm {
                manager: "cargo".to_string()
            }
        )
        .is_err());
    }

    #[test]
    fn reset_without_terminal_needs_yes() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);
        store.add_alias("b", "run build").unwrap();

        assert!(reset(&quiet(), &mut store, false).is_err());
        assert!(!store.config().aliases.is_empty());

        reset(&quiet(), &mut store, true).unwrap();
        assert!(store.config().aliases.is_empty());
    }
}

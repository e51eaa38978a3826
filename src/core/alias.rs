//! core::alias
//!
//! Alias and custom-command resolution.
//!
//! # Aliases vs. custom commands
//!
//! - An **alias** expands to this tool's own CLI tokens. It is split on
//!   whitespace and fed back into the argument parser, so `b -> "run build"`
//!   makes `xe b --watch` behave like `xe run build --watch`.
//! - A **custom command** is a full shell command line. It is never re-parsed
//!   as CLI syntax; the unknown-command fallback runs it through the shell so
//!   operators such as `&&` keep working.
//!
//! When a name exists in both maps, the alias wins.

use std::collections::BTreeMap;

use tracing::debug;

use super::config::XeConfig;

/// What a leading token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Alias,
    Custom,
    None,
}

/// Looks tokens up in the configured aliases and custom commands.
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    aliases: &'a BTreeMap<String, String>,
    custom_commands: &'a BTreeMap<String, String>,
}

impl<'a> AliasResolver<'a> {
    pub fn new(config: &'a XeConfig) -> Self {
        Self {
            aliases: &config.aliases,
            custom_commands: &config.custom_commands,
        }
    }

    /// Classify a token. Empty mappings count as absent.
    pub fn classify(&self, token: &str) -> TokenKind {
        if lookup(self.aliases, token).is_some() {
            TokenKind::Alias
        } else if lookup(self.custom_commands, token).is_some() {
            TokenKind::Custom
        } else {
            TokenKind::None
        }
    }

    /// The mapped string for `token`, or `token` itself when unmapped.
    pub fn resolve<'t>(&self, token: &'t str) -> &'t str
    where
        'a: 't,
    {
        if let Some(alias) = lookup(self.aliases, token) {
            debug!("Resolved alias '{}' to '{}'", token, alias);
            return alias;
        }
        if let Some(command) = lookup(self.custom_commands, token) {
            debug!("Resolved custom command '{}' to '{}'", token, command);
            return command;
        }
        token
    }

    /// [`resolve`](Self::resolve), split on whitespace with empty fragments dropped.
    pub fn resolve_and_split(&self, token: &str) -> Vec<String> {
        self.resolve(token)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Rewrite a raw argument vector (program name first) before parsing.
    ///
    /// Only the first argument after the program name is considered, and only
    /// when it is not a flag. Aliases are expanded in place; custom commands
    /// and unknown tokens are left for the unknown-command fallback.
    pub fn preprocess(&self, args: Vec<String>) -> Vec<String> {
        let Some(first) = args.get(1) else {
            return args;
        };
        if first.starts_with('-') || self.classify(first) != TokenKind::Alias {
            return args;
        }

        let mut rewritten = Vec::with_capacity(args.len() + 2);
        rewritten.push(args[0].clone());
        rewritten.extend(self.resolve_and_split(first));
        rewritten.extend(args.into_iter().skip(2));
        rewritten
    }
}

fn lookup<'m>(map: &'m BTreeMap<String, String>, token: &str) -> Option<&'m str> {
    map.get(token)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> XeConfig {
        let mut config = XeConfig::default();
        config
            .aliases
            .insert("foo".to_string(), "run build".to_string());
        config
            .aliases
            .insert("spaced".to_string(), "  install   -D  ".to_string());
        config
            .aliases
            .insert("both".to_string(), "run lint".to_string());
        config.custom_commands.insert(
            "deploy".to_string(),
            "npm run build && npm run push".to_string(),
        );
        config
            .custom_commands
            .insert("both".to_string(), "echo custom".to_string());
        config
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classify_tokens() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        assert_eq!(resolver.classify("foo"), TokenKind::Alias);
        assert_eq!(resolver.classify("deploy"), TokenKind::Custom);
        assert_eq!(resolver.classify("other"), TokenKind::None);
    }

    #[test]
    fn alias_wins_over_custom_command() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        assert_eq!(resolver.classify("both"), TokenKind::Alias);
        assert_eq!(resolver.resolve("both"), "run lint");
    }

    #[test]
    fn resolve_is_identity_when_unmapped() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        assert_eq!(resolver.resolve("webpack"), "webpack");
    }

    #[test]
    fn resolve_and_split_drops_empty_fragments() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        assert_eq!(resolver.resolve_and_split("foo"), vec!["run", "build"]);
        assert_eq!(resolver.resolve_and_split("spaced"), vec!["install", "-D"]);
    }

    #[test]
    fn custom_command_resolves_to_whole_line() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        assert_eq!(resolver.resolve("deploy"), "npm run build && npm run push");
    }

    #[test]
    fn empty_mapping_counts_as_absent() {
        let mut config = XeConfig::default();
        config.aliases.insert("x".to_string(), String::new());
        let resolver = AliasResolver::new(&config);
        assert_eq!(resolver.classify("x"), TokenKind::None);
        assert_eq!(resolver.resolve("x"), "x");
    }

    #[test]
    fn preprocess_expands_alias_and_keeps_extra_args() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        let out = resolver.preprocess(argv(&["xe", "foo", "--watch", "x"]));
        assert_eq!(out, argv(&["xe", "run", "build", "--watch", "x"]));
    }

    #[test]
    fn preprocess_leaves_custom_commands_alone() {
        let config = config();
        let resolver = AliasResolver::new(&config);
        let input = argv(&["xe", "deploy", "--prod"]);
        assert_eq!(resolver.preprocess(input.clone()), input);
    }

    #[test]
    fn preprocess_ignores_flags_and_later_tokens() {
        let config = config();
        let resolver = AliasResolver::new(&config);

        let flagged = argv(&["xe", "--debug", "foo"]);
        assert_eq!(resolver.preprocess(flagged.clone()), flagged);

        let later = argv(&["xe", "run", "foo"]);
        assert_eq!(resolver.preprocess(later.clone()), later);

        let bare = argv(&["xe"]);
        assert_eq!(resolver.preprocess(bare.clone()), bare);
    }
}

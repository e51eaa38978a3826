//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output
//!
//! # Open Grammar
//!
//! A first word that is not a subcommand lands in [`Command::External`] and
//! is handled by the unknown-command fallback. Extension namespaces do the
//! same one level down and forward the words to the wrapped tool.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::pm::PackageManager;

/// xe - one command surface for npm, pnpm, yarn and bun
#[derive(Parser, Debug)]
#[command(name = "xe")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Run as if xe was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Package manager operations ==========
    /// Install dependencies, or add packages
    #[command(
        name = "install",
        visible_alias = "i",
        long_about = "Install dependencies, or add packages.\n\n\
            With no packages, installs everything declared in package.json. With packages, \
            adds them using the detected package manager's own syntax (npm install, pnpm add, \
            yarn add, bun add).",
        after_help = "\
WORKFLOW EXAMPLES:
    # Install everything from package.json
    xe install

    # Add a runtime dependency
    xe i zod

    # Add dev dependencies
    xe i -D typescript vitest

    # Install a tool globally
    xe i -g serve"
    )]
    Install {
        /// Packages to add
        packages: Vec<String>,

        /// Add as dev dependencies
        #[arg(short = 'D', long = "save-dev")]
        save_dev: bool,

        /// Install globally
        #[arg(short, long)]
        global: bool,
    },

    /// Remove packages
    #[command(name = "uninstall", visible_alias = "un")]
    Uninstall {
        /// Packages to remove
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Update packages
    #[command(name = "update", visible_alias = "up")]
    Update {
        /// Packages to update (all when omitted)
        packages: Vec<String>,
    },

    /// Run a package.json script
    #[command(
        name = "run",
        long_about = "Run a script declared in package.json.\n\n\
            Everything after the script name is passed to the script. Scripts can also be \
            run without `run`: `xe test` runs the `test` script when no subcommand or \
            custom command of that name exists.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Run the test script
    xe run test

    # Pass arguments through
    xe run test --watch

    # Same thing, shorter
    xe test --watch"
    )]
    Run {
        /// Script name
        script: String,

        /// Arguments passed to the script
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run the start script
    Start,

    /// Run the dev script
    Dev,

    /// Run the build script
    Build,

    /// Run the linter
    Lint,

    /// List package.json scripts
    #[command(name = "scripts", visible_alias = "ls")]
    Scripts,

    /// Initialize a new project
    #[command(
        name = "init",
        long_about = "Initialize a new project.\n\n\
            Asks which package manager to use (unless --pm is given), makes sure it is \
            installed, runs its init command, and records the choice in the \
            packageManager field of package.json.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Pick a manager interactively
    xe init

    # Non-interactive, accept every default
    xe init --pm pnpm -y"
    )]
    Init {
        /// Accept defaults without prompting
        #[arg(short, long)]
        yes: bool,

        /// Package manager to use (npm, pnpm, yarn, bun)
        #[arg(long, value_name = "MANAGER")]
        pm: Option<PackageManager>,
    },

    /// Delete every node_modules directory below the current directory
    #[command(
        name = "nuke",
        long_about = "Delete every node_modules directory below the current directory.\n\n\
            Searches up to ten levels deep without entering node_modules, hidden \
            directories, dist, build or coverage. Shows each directory with its size \
            and asks before deleting anything.",
        after_help = "\
WORKFLOW EXAMPLES:
    # See what would be deleted
    xe nuke --dry-run

    # Delete without asking
    xe nuke -y"
    )]
    Nuke {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    // ========== Setup ==========
    /// Manage xe configuration
    #[command(
        name = "config",
        long_about = "View or modify xe configuration.\n\n\
            Configuration is stored per user in ~/.xerc (or $XE_CONFIG). It holds \
            aliases, custom commands, enabled extensions and the preferred package manager.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Shortcut for a subcommand with flags
    xe config alias-add t \"run test --watch\"

    # Shell command line, operators included
    xe config cmd-add deploy \"npm run build && npm run push\"

    # Always use pnpm
    xe config set-pm pnpm"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for xe commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    xe completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    xe completion zsh >> ~/.zshrc

    # Fish
    xe completion fish > ~/.config/fish/completions/xe.fish

    # PowerShell
    xe completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    // ========== Extensions ==========
    /// Git shortcuts; other git commands pass through
    #[command(name = "git", visible_alias = "g")]
    Git {
        #[command(subcommand)]
        action: GitAction,
    },

    /// GitHub CLI shortcuts; shows a dashboard with no arguments
    #[command(name = "gh")]
    Gh {
        #[command(subcommand)]
        action: Option<GhAction>,
    },

    /// Docker and docker-compose shortcuts
    #[command(name = "docker", visible_alias = "dk")]
    Docker {
        #[command(subcommand)]
        action: DockerAction,
    },

    /// Prisma shortcuts; generate, pull and push with no arguments
    #[command(name = "prisma")]
    Prisma {
        #[command(subcommand)]
        action: Option<PrismaAction>,
    },

    /// shadcn/ui component management
    #[command(name = "shadcn")]
    Shadcn {
        #[command(subcommand)]
        action: ShadcnAction,
    },

    /// Custom command, package.json script, or unknown
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the config file path
    Path,
    /// Show the current configuration
    Show,
    /// Open the config file in an editor
    Edit,
    /// Reset configuration to defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Enable an extension
    ExtEnable {
        /// git, github, prisma, docker or shadcn
        extension: String,
    },
    /// Disable an extension
    ExtDisable {
        /// git, github, prisma, docker or shadcn
        extension: String,
    },
    /// List extensions and whether they are enabled
    ExtList,
    /// Add an alias that expands to xe arguments
    AliasAdd {
        /// Alias name
        alias: String,
        /// Replacement, e.g. "run build"
        #[arg(allow_hyphen_values = true)]
        command: String,
    },
    /// Remove an alias
    AliasRemove {
        /// Alias name
        alias: String,
    },
    /// List aliases
    AliasList,
    /// Add a custom shell command
    CmdAdd {
        /// Command name
        name: String,
        /// Shell command line
        #[arg(allow_hyphen_values = true)]
        command: String,
    },
    /// Remove a custom command
    CmdRemove {
        /// Command name
        name: String,
    },
    /// List custom commands
    CmdList,
    /// Set the preferred package manager (npm, pnpm, yarn, bun, auto)
    SetPm {
        /// Manager name or "auto"
        manager: String,
    },
}

/// Git extension subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum GitAction {
    /// Stage files (all when none are given)
    Add {
        /// Files to stage
        files: Vec<String>,
    },
    /// Push, defaulting to the current branch on origin
    Push {
        /// Remote, or the branch when it is the only argument
        remote: Option<String>,
        /// Branch
        branch: Option<String>,
        /// Set upstream for the branch
        #[arg(short = 'u', long = "set-upstream")]
        set_upstream: bool,
    },
    /// Stage everything, commit and push
    Save {
        /// Commit message
        message: Option<String>,
    },
    /// Pull with rebase, then push
    Sync,
    #[command(external_subcommand)]
    Passthrough(Vec<String>),
}

/// GitHub extension subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum GhAction {
    /// Create a repository
    RepoCreate {
        /// Repository name
        name: String,
        /// Make the repository public
        #[arg(long, conflicts_with = "private")]
        public: bool,
        /// Make the repository private
        #[arg(long)]
        private: bool,
    },
    /// Create a pull request in the browser
    #[command(visible_alias = "prc")]
    PrCreate,
    /// Check out a pull request
    #[command(visible_alias = "pco")]
    PrCheckout {
        /// Pull request number
        number: String,
    },
    /// Merge a pull request
    #[command(visible_alias = "prm")]
    PrMerge {
        /// Pull request number (current branch when omitted)
        number: Option<String>,
        /// Squash commits
        #[arg(short, long)]
        squash: bool,
        /// Rebase and merge
        #[arg(short, long)]
        rebase: bool,
        /// Create a merge commit
        #[arg(short, long)]
        merge: bool,
    },
    /// View a pull request
    PrView {
        /// Pull request number (current branch when omitted)
        number: Option<String>,
    },
    /// Create an issue in the browser
    IssueCreate,
    /// Clone a repository
    #[command(name = "clone")]
    CloneRepo {
        /// owner/name or URL
        repo: String,
    },
    /// Show authentication status
    Auth,
    /// Stage, commit, push and open a pull request
    Ship {
        /// Commit message
        message: Option<String>,
    },
    /// Fetch all remotes and pull
    Sync,
    /// Create a fix branch named after an issue
    Quickfix {
        /// Issue number
        issue: String,
    },
    /// Approve a pull request
    Approve {
        /// Pull request number
        pr: String,
        /// Review comment
        #[arg(short, long)]
        comment: Option<String>,
    },
    #[command(external_subcommand)]
    Passthrough(Vec<String>),
}

/// Docker extension subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DockerAction {
    /// docker-compose up -d
    Up,
    /// docker-compose down
    Down,
    /// docker-compose restart
    Restart,
    /// Show service logs
    Logs {
        /// Service name
        service: Option<String>,
        /// Follow log output
        #[arg(short, long)]
        follow: bool,
    },
    /// List running containers
    Ps,
    /// Build images
    Build,
    /// Stop containers without removing them
    Stop {
        /// Service name
        service: Option<String>,
    },
    /// Start stopped containers
    Start {
        /// Service name
        service: Option<String>,
    },
    /// Run a command in a running service
    Exec {
        /// Service name
        service: String,
        /// Command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
        /// Do not allocate an interactive terminal
        #[arg(long = "no-it")]
        no_it: bool,
    },
    /// Remove unused containers, networks and images
    Prune {
        /// Remove all unused images, not just dangling ones
        #[arg(short, long)]
        all: bool,
        /// Prune volumes as well
        #[arg(short, long)]
        volumes: bool,
    },
    #[command(external_subcommand)]
    Passthrough(Vec<String>),
}

/// Prisma extension subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PrismaAction {
    /// Generate the Prisma client
    #[command(visible_alias = "gen")]
    Generate,
    /// Run migrations (migrate dev by default)
    Migrate {
        /// Migration name
        #[arg(short, long)]
        name: Option<String>,
        /// Explicit migrate subcommand and arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Open Prisma Studio
    Studio,
    /// Push the schema to the database
    Push,
    /// Pull the schema from the database
    Pull,
    #[command(external_subcommand)]
    Passthrough(Vec<String>),
}

/// shadcn extension subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ShadcnAction {
    /// Initialize shadcn/ui with defaults
    Init,
    /// Add components
    Add {
        /// Components to add
        #[arg(required = true)]
        components: Vec<String>,
    },
    /// Remove a component from components/ui
    #[command(visible_alias = "rm")]
    Remove {
        /// Component name
        component: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

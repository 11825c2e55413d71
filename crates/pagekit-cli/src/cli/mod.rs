//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pagekit",
    bin_name = "pagekit",
    version  = env!("CARGO_PKG_VERSION"),
    about    = "Build and validate low-code UI artifacts",
    long_about = "Pagekit discovers UI artifacts (pages, layouts, fragments, widgets) \
                  in a project workspace, validates them, and packages each one \
                  into a deployable archive.",
    after_help = "EXAMPLES:\n\
        \x20 pagekit build --workspace ./my-project\n\
        \x20 pagekit build --include 'customer*' --exclude legacy_home\n\
        \x20 pagekit build --page dashboard\n\
        \x20 pagekit validate --workspace ./my-project",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build artifacts into deployable archives.
    #[command(
        visible_alias = "b",
        about = "Build artifact archives",
        after_help = "EXAMPLES:\n\
            \x20 pagekit build\n\
            \x20 pagekit build --workspace ./my-project --output ./target\n\
            \x20 pagekit build --include 'customer*'\n\
            \x20 pagekit build --page dashboard"
    )]
    Build(BuildArgs),

    /// Validate workspace XML files and artifact compatibility.
    #[command(
        about = "Validate the project workspace",
        after_help = "EXAMPLES:\n\
            \x20 pagekit validate\n\
            \x20 pagekit validate --workspace ./my-project --schema-dir ./schemas"
    )]
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pagekit completions bash > ~/.local/share/bash-completion/completions/pagekit\n\
            \x20 pagekit completions zsh  > ~/.zfunc/_pagekit"
    )]
    Completions(CompletionsArgs),
}

// ── build ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Project workspace directory (defaults to the current directory).
    #[arg(short = 'w', long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Output directory for built archives.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Artifact name globs to include (repeatable; default: everything).
    #[arg(long = "include", value_name = "GLOB")]
    pub includes: Vec<String>,

    /// Artifact name globs to exclude (repeatable; default: .metadata).
    #[arg(long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Build a single page by identifier instead of the whole tree.
    #[arg(long, value_name = "ID", conflicts_with_all = ["includes", "excludes"])]
    pub page: Option<String>,

    /// Name of the pages folder inside the workspace.
    #[arg(long, value_name = "NAME")]
    pub pages_dir: Option<String>,
}

// ── validate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project workspace directory (defaults to the current directory).
    #[arg(short = 'w', long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Directory holding the XSD schemas.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Skip the UID artifact compatibility checks.
    #[arg(long)]
    pub skip_uid: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

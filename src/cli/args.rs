//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Syncprep - host precondition checks for docker-sync.
#[derive(Debug, Parser)]
#[command(name = "syncprep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to sync config (overrides docker-sync.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the selected command asked for no prompts.
    pub fn non_interactive(&self) -> bool {
        match &self.command {
            Some(Commands::Check(args)) => args.non_interactive,
            Some(Commands::EnsurePackage(args)) => args.non_interactive,
            None => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify host tools for the sync config (default if no command specified)
    Check(CheckArgs),

    /// Make sure a python package is importable, installing it with pip
    EnsurePackage(EnsurePackageArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Check unison and unox even if no sync uses them
    #[arg(long)]
    pub unison: bool,

    /// Check rsync and fswatch even if no sync uses them
    #[arg(long)]
    pub rsync: bool,

    /// Answer every prompt with its default (no), or SYNCPREP_PROMPT_<KEY>
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `ensure-package` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EnsurePackageArgs {
    /// Package name as known to pip
    pub package: String,

    /// Module to import when it differs from the package name
    #[arg(long = "import", value_name = "MODULE")]
    pub import_test: Option<String>,

    /// Answer every prompt with its default (no), or SYNCPREP_PROMPT_<KEY>
    #[arg(long)]
    pub non_interactive: bool,
}

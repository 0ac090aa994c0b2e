//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// depsync - Reconcile a requirements manifest with the installed packages.
#[derive(Debug, Parser)]
#[command(name = "depsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .depsync/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Python interpreter (overrides `python` in config)
    #[arg(long, global = true, env = "DEPSYNC_PYTHON")]
    pub python: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

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

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install missing requirements and pin the manifest (default)
    Sync(SyncArgs),

    /// List requirements the host does not satisfy
    Check(CheckArgs),
}

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SyncArgs {
    /// Manifest path relative to the project root
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Maximum requirements per install batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Seconds before a batch install is killed (0 waits forever)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Skip the bootstrap package install
    #[arg(long)]
    pub no_bootstrap: bool,

    /// Skip the submodule clone
    #[arg(long)]
    pub no_submodule: bool,

    /// Do not generate a manifest when it is missing
    #[arg(long)]
    pub no_generate: bool,

    /// Exit non-zero if any package or step failed
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Manifest path relative to the project root
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
}

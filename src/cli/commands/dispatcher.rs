//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, SyncArgs};
use crate::config::{load_config_file, load_merged_config, ConfigPaths, SyncConfig};
use crate::error::Result;
use crate::ui::Output;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing to `output`.
    fn execute(&self, output: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command's configuration comes from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// `--config`: load only this file.
    pub path: Option<PathBuf>,

    /// `--python`: replaces the configured interpreter.
    pub python: Option<String>,
}

impl ConfigSource {
    /// Load the config for `project_root` and apply the global overrides.
    ///
    /// Relative `site_packages` entries resolve against `project_root`.
    /// Not validated: commands validate after applying their own overrides.
    pub fn load(&self, project_root: &Path) -> Result<SyncConfig> {
        let mut config = match &self.path {
            Some(path) => load_config_file(path)?,
            None => load_merged_config(&ConfigPaths::discover(project_root), project_root)?,
        };
        if let Some(python) = &self.python {
            config.python = python.clone();
        }
        config.site_packages = config
            .site_packages
            .iter()
            .map(|dir| project_root.join(dir))
            .collect();
        Ok(config)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Dispatch and execute a command.
    ///
    /// No subcommand runs `sync` with default arguments.
    pub fn dispatch(&self, cli: &Cli, output: &Output) -> Result<CommandResult> {
        let source = ConfigSource {
            path: cli.config.clone(),
            python: cli.python.clone(),
        };

        match &cli.command {
            Some(Commands::Sync(args)) => {
                let cmd = super::sync::SyncCommand::new(&self.project_root, source, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Check(args)) => {
                let cmd =
                    super::check::CheckCommand::new(&self.project_root, source, args.clone());
                cmd.execute(output)
            }
            None => {
                let cmd =
                    super::sync::SyncCommand::new(&self.project_root, source, SyncArgs::default());
                cmd.execute(output)
            }
        }
    }
}

//! Error types for depsync operations.
//!
//! This module defines [`SyncError`], the primary error type used throughout
//! the engine, [`QueryError`] for installed-package queries, and a [`Result`]
//! type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SyncError` for domain failures the orchestrator reports per step
//! - Use `QueryError` where a caller must tell "empty registry" apart from
//!   "query failed"
//! - Use `anyhow::Error` (via `SyncError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for depsync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The manifest was absent and could not be generated.
    #[error("Failed to generate manifest: {message}")]
    ManifestGenerationFailure { message: String },

    /// Cloning the submodule returned non-zero or could not be launched.
    #[error("Failed to clone {url} into {path} (exit code {code:?})")]
    SubmoduleCloneFailure {
        url: String,
        path: PathBuf,
        code: Option<i32>,
        #[source]
        source: Option<Box<SyncError>>,
    },

    /// The bootstrap installer call failed.
    #[error("Bootstrap install failed with exit code {code:?}: {packages}")]
    BootstrapInstallFailure { packages: String, code: Option<i32> },

    /// One batch's installer subprocess failed.
    #[error("Batch install failed with exit code {code:?}: {packages}")]
    BatchInstallFailure { packages: String, code: Option<i32> },

    /// A subprocess exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A subprocess could not be launched or waited on.
    #[error("Could not run {command}: {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess ran past its deadline and was killed.
    #[error("Command timed out after {timeout:?}: {command}")]
    CommandTimedOut {
        command: String,
        timeout: std::time::Duration,
    },

    /// Querying the installed-package registry failed.
    #[error("Registry query failed: {0}")]
    RegistryQuery(#[from] QueryError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure of an installed-package query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query tool could not be started.
    #[error("could not run '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The query tool ran but reported failure.
    #[error("'{command}' exited with code {code:?}")]
    NonZeroExit { command: String, code: Option<i32> },

    /// The query tool ran past its deadline and was killed.
    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut {
        command: String,
        timeout: std::time::Duration,
    },

    /// The query output could not be understood.
    #[error("could not parse package list: {message}")]
    Parse { message: String },

    /// A metadata directory could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for depsync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

//! The package installer capability.
//!
//! An install is a future: the batch runner creates one per batch and
//! awaits them together, so every installer process starts before any is
//! waited on.

use crate::error::Result;
use crate::shell::{run, CommandResult, CommandSpec};
use futures::future::{FutureExt, LocalBoxFuture};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runs installer invocations.
pub trait Installer {
    /// Install `packages` in one installer invocation.
    ///
    /// An invocation still running after `timeout` is killed and reported
    /// with `timed_out` set.
    fn install<'a>(
        &'a self,
        packages: &'a [String],
        timeout: Option<Duration>,
    ) -> LocalBoxFuture<'a, Result<CommandResult>>;
}

/// Installs packages with `python -m pip install`.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    python: String,
    extra_args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl PipInstaller {
    /// Create an installer using `python` and extra pip flags.
    pub fn new(python: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            python: python.into(),
            extra_args,
            cwd: None,
        }
    }

    /// Run installs from `dir`.
    pub fn with_cwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// A copy of this installer without the extra flags.
    pub fn plain(&self) -> Self {
        Self {
            extra_args: Vec::new(),
            ..self.clone()
        }
    }

    /// The command line for installing `packages`.
    pub fn command(&self, packages: &[String]) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.python)
            .args(["-m", "pip", "install"])
            .args(self.extra_args.iter().cloned())
            .args(packages.iter().cloned());
        if let Some(cwd) = &self.cwd {
            spec = spec.current_dir(cwd);
        }
        spec
    }
}

impl Installer for PipInstaller {
    fn install<'a>(
        &'a self,
        packages: &'a [String],
        timeout: Option<Duration>,
    ) -> LocalBoxFuture<'a, Result<CommandResult>> {
        async move { run(&self.command(packages), timeout).await }.boxed_local()
    }
}

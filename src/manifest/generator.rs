//! Manifest synthesis for projects that have none.

use crate::error::{Result, SyncError};
use crate::shell::{execute, CommandSpec};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Produces a manifest file at the given path.
pub trait ManifestGenerator {
    /// Write a manifest to `manifest`.
    fn generate(&self, manifest: &Path) -> Result<()>;
}

/// Generates a manifest by scanning project imports with `pipreqs`.
#[derive(Debug, Clone)]
pub struct PipreqsGenerator {
    python: String,
    project_root: PathBuf,
    ignore: Vec<String>,
    timeout: Option<Duration>,
}

impl PipreqsGenerator {
    /// Create a generator scanning `project_root`, skipping `ignore` dirs.
    pub fn new(python: impl Into<String>, project_root: &Path, ignore: Vec<String>) -> Self {
        Self {
            python: python.into(),
            project_root: project_root.to_path_buf(),
            ignore,
            timeout: None,
        }
    }

    /// Kill the generator if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command this generator runs for `manifest`.
    pub fn command(&self, manifest: &Path) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.python)
            .args(["-m", "pipreqs.pipreqs", "--force"])
            .current_dir(&self.project_root);

        if !self.ignore.is_empty() {
            spec = spec.arg("--ignore").arg(self.ignore.join(","));
        }

        spec.arg("--savepath")
            .arg(manifest.display().to_string())
            .arg(".")
    }
}

impl ManifestGenerator for PipreqsGenerator {
    fn generate(&self, manifest: &Path) -> Result<()> {
        let spec = self.command(manifest);
        let result = execute(&spec, self.timeout)?;
        match self.timeout {
            Some(timeout) if result.timed_out => Err(SyncError::CommandTimedOut {
                command: spec.display(),
                timeout,
            }),
            _ if !result.success => Err(SyncError::CommandFailed {
                command: spec.display(),
                code: result.exit_code,
            }),
            _ => Ok(()),
        }
    }
}

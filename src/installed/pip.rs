//! Installed packages as reported by `pip list`.

use crate::error::QueryError;
use crate::installed::snapshot::{InstalledPackageRecord, PackageSnapshot};
use crate::installed::InstalledPackageQuery;
use crate::shell::{block_on, capture, CommandSpec};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Queries the interpreter's environment with `pip list --format=json`.
#[derive(Debug, Clone)]
pub struct PipListQuery {
    python: String,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct PipListEntry {
    name: String,
    version: String,
}

impl PipListQuery {
    /// Create a query against `python`.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            cwd: None,
            timeout: None,
        }
    }

    /// Run the query from `dir`.
    pub fn with_cwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Kill `pip list` if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self) -> CommandSpec {
        let spec = CommandSpec::new(&self.python).args([
            "-m",
            "pip",
            "list",
            "--format=json",
            "--disable-pip-version-check",
        ]);
        match &self.cwd {
            Some(cwd) => spec.current_dir(cwd),
            None => spec,
        }
    }
}

impl InstalledPackageQuery for PipListQuery {
    fn snapshot(&self) -> Result<PackageSnapshot, QueryError> {
        let spec = self.command();
        let output = block_on(capture(&spec, self.timeout))
            .and_then(|captured| captured)
            .map_err(|source| QueryError::Launch {
                command: spec.display(),
                source,
            })?
            .ok_or_else(|| QueryError::TimedOut {
                command: spec.display(),
                timeout: self.timeout.unwrap_or_default(),
            })?;

        if !output.status.success() {
            return Err(QueryError::NonZeroExit {
                command: spec.display(),
                code: output.status.code(),
            });
        }

        let snapshot: PackageSnapshot = parse_pip_list(&String::from_utf8_lossy(&output.stdout))?
            .into_iter()
            .collect();
        tracing::debug!(packages = snapshot.len(), "pip list snapshot");
        Ok(snapshot)
    }
}

/// Parse the JSON array printed by `pip list --format=json`.
pub fn parse_pip_list(json: &str) -> Result<Vec<InstalledPackageRecord>, QueryError> {
    let entries: Vec<PipListEntry> =
        serde_json::from_str(json.trim()).map_err(|e| QueryError::Parse {
            message: e.to_string(),
        })?;

    Ok(entries
        .iter()
        .map(|entry| InstalledPackageRecord::new(&entry.name, &entry.version))
        .collect())
}

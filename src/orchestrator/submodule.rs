//! Clone a companion repository into the project if it is not there yet.

use crate::config::SubmoduleConfig;
use crate::error::{Result, SyncError};
use crate::shell::{execute, CommandSpec};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// What the clone step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleOutcome {
    /// Destination existed; git was not invoked.
    AlreadyPresent,

    /// Destination was cloned this run.
    Cloned,
}

/// Clone `submodule` under `project_root` unless its path already exists.
///
/// `git` names the git executable. A clone still running after `timeout`
/// is killed and reported as `CommandTimedOut`.
pub fn clone_if_absent(
    submodule: &SubmoduleConfig,
    project_root: &Path,
    git: &str,
    timeout: Option<Duration>,
) -> Result<SubmoduleOutcome> {
    let destination = project_root.join(&submodule.path);
    if destination.exists() {
        tracing::debug!(path = %destination.display(), "submodule already present");
        return Ok(SubmoduleOutcome::AlreadyPresent);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let spec = CommandSpec::new(git)
        .arg("clone")
        .arg(&submodule.url)
        .arg(destination.display().to_string())
        .current_dir(project_root);

    let failure = |code, source: Option<SyncError>| SyncError::SubmoduleCloneFailure {
        url: submodule.url.clone(),
        path: submodule.path.clone(),
        code,
        source: source.map(Box::new),
    };

    let result = execute(&spec, timeout).map_err(|e| failure(None, Some(e)))?;
    match timeout {
        Some(timeout) if result.timed_out => {
            return Err(SyncError::CommandTimedOut {
                command: spec.display(),
                timeout,
            })
        }
        _ if !result.success => return Err(failure(result.exit_code, None)),
        _ => {}
    }

    tracing::info!(url = %submodule.url, path = %destination.display(), "cloned submodule");
    Ok(SubmoduleOutcome::Cloned)
}

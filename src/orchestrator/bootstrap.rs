//! The bootstrap package set, installed in one non-batched call.

use crate::error::{Result, SyncError};
use crate::install::Installer;
use std::time::Duration;

/// What the bootstrap step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// These packages were passed to the installer, which exited 0.
    Installed(Vec<String>),

    /// Nothing needed installing.
    NothingToInstall,
}

/// Install `packages` with a single installer invocation.
pub async fn install_bootstrap(
    packages: &[String],
    installer: &dyn Installer,
    timeout: Option<Duration>,
) -> Result<BootstrapOutcome> {
    if packages.is_empty() {
        return Ok(BootstrapOutcome::NothingToInstall);
    }

    tracing::info!(packages = %packages.join(", "), "installing bootstrap packages");
    let result = installer.install(packages, timeout).await?;
    match timeout {
        Some(timeout) if result.timed_out => Err(SyncError::CommandTimedOut {
            command: format!("install {}", packages.join(" ")),
            timeout,
        }),
        _ if !result.success => Err(SyncError::BootstrapInstallFailure {
            packages: packages.join(", "),
            code: result.exit_code,
        }),
        _ => Ok(BootstrapOutcome::Installed(packages.to_vec())),
    }
}

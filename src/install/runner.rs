//! Concurrent batch installation.
//!
//! One install future is built per batch and all of them are awaited
//! together with `join_all`. On a single-threaded runtime that means every
//! installer process is started before any is waited on, and the only
//! parallelism is between the processes themselves.

use crate::install::batch::{partition, BatchReport, InstallResult, DEFAULT_BATCH_SIZE};
use crate::install::installer::Installer;
use crate::manifest::Requirement;
use futures::future::join_all;
use std::time::Duration;

/// Installs unsatisfied requirements in concurrent, fail-soft batches.
///
/// A failing batch never cancels its siblings; its requirements are simply
/// reported as failed.
pub struct BatchInstaller<'a> {
    installer: &'a dyn Installer,
    batch_size: usize,
    timeout: Option<Duration>,
}

impl<'a> BatchInstaller<'a> {
    /// Create a batch installer with the default batch size and no timeout.
    pub fn new(installer: &'a dyn Installer) -> Self {
        Self {
            installer,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: None,
        }
    }

    /// Set the maximum requirements per batch.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Kill any batch still running after `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Install `unsatisfied`, returning one result per batch in batch order.
    pub async fn run(&self, unsatisfied: &[Requirement]) -> BatchReport {
        let batches = partition(unsatisfied, self.batch_size);
        if batches.is_empty() {
            return BatchReport::default();
        }

        tracing::info!(
            requirements = unsatisfied.len(),
            batches = batches.len(),
            "installing missing requirements"
        );

        let installs = batches.into_iter().map(|batch| async move {
            let packages = batch.install_args();
            tracing::debug!(batch = batch.index, packages = %batch.describe(), "launching");
            match self.installer.install(&packages, self.timeout).await {
                Ok(result) => InstallResult::finished(batch, &result),
                Err(e) => InstallResult::errored(batch, &e),
            }
        });
        let results = join_all(installs).await;

        for result in &results {
            log_result(result);
        }

        BatchReport { results }
    }
}

fn log_result(result: &InstallResult) {
    match result.failure() {
        None => tracing::info!(
            batch = result.batch.index,
            packages = %result.batch.describe(),
            "batch installed"
        ),
        Some(failure) => tracing::warn!(
            batch = result.batch.index,
            timed_out = result.timed_out,
            error = result.error.as_deref().unwrap_or(""),
            "{}",
            failure
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SyncError};
    use crate::shell::CommandResult;
    use futures::future::{FutureExt, LocalBoxFuture};
    use std::cell::RefCell;

    /// Fails any batch that contains a package starting with `bad`.
    #[derive(Default)]
    struct ScriptedInstaller {
        launched: RefCell<Vec<Vec<String>>>,
    }

    impl Installer for ScriptedInstaller {
        fn install<'a>(
            &'a self,
            packages: &'a [String],
            _timeout: Option<Duration>,
        ) -> LocalBoxFuture<'a, Result<CommandResult>> {
            self.launched.borrow_mut().push(packages.to_vec());
            // Earlier batches finish later.
            let delay = Duration::from_millis(40u64.saturating_sub(
                10 * self.launched.borrow().len() as u64,
            ));
            async move {
                tokio::time::sleep(delay).await;
                if packages.iter().any(|p| p == "unlaunchable") {
                    return Err(SyncError::CommandLaunch {
                        command: "pip".into(),
                        source: std::io::ErrorKind::NotFound.into(),
                    });
                }
                let code = if packages.iter().any(|p| p.starts_with("bad")) {
                    1
                } else {
                    0
                };
                Ok(CommandResult::exited(Some(code), delay))
            }
            .boxed_local()
        }
    }

    fn reqs(names: &[&str]) -> Vec<Requirement> {
        names.iter().map(|n| Requirement::new(*n, None)).collect()
    }

    #[tokio::test]
    async fn no_requirements_launches_nothing() {
        let installer = ScriptedInstaller::default();
        let report = BatchInstaller::new(&installer).run(&[]).await;
        assert!(report.results.is_empty());
        assert!(installer.launched.borrow().is_empty());
    }

    #[tokio::test]
    async fn launches_one_process_per_batch() {
        let installer = ScriptedInstaller::default();
        let report = BatchInstaller::new(&installer)
            .batch_size(2)
            .run(&reqs(&["a", "b", "c", "d", "e"]))
            .await;

        assert_eq!(report.results.len(), 3);
        assert_eq!(
            *installer.launched.borrow(),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string()],
            ]
        );
        assert!(report.failed().is_empty());
    }

    #[tokio::test]
    async fn failing_batch_does_not_affect_siblings() {
        let installer = ScriptedInstaller::default();
        let report = BatchInstaller::new(&installer)
            .batch_size(2)
            .run(&reqs(&["a", "b", "bad-wheel", "c", "d"]))
            .await;

        let installed: Vec<_> = report.installed().iter().map(|r| r.name()).collect();
        let failed: Vec<_> = report.failed().iter().map(|r| r.name()).collect();
        assert_eq!(installed, vec!["a", "b", "d"]);
        assert_eq!(failed, vec!["bad-wheel", "c"]);
    }

    #[tokio::test]
    async fn launch_failure_is_isolated() {
        let installer = ScriptedInstaller::default();
        let report = BatchInstaller::new(&installer)
            .batch_size(1)
            .run(&reqs(&["a", "unlaunchable", "b"]))
            .await;

        assert_eq!(report.results.len(), 3);
        assert!(report.results[0].success());
        assert!(report.results[1].error.is_some());
        assert_eq!(report.results[1].exit_code, None);
        assert!(report.results[2].success());
    }

    #[tokio::test]
    async fn results_come_back_in_batch_order() {
        let installer = ScriptedInstaller::default();
        let report = BatchInstaller::new(&installer)
            .batch_size(1)
            .run(&reqs(&["a", "b", "c", "d"]))
            .await;

        let indexes: Vec<_> = report.results.iter().map(|r| r.batch.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }
}

#[cfg(all(test, unix))]
mod process_tests {
    use super::*;
    use crate::error::Result;
    use crate::install::installer::PipInstaller;
    use crate::shell::{run, CommandResult, CommandSpec};
    use futures::future::{FutureExt, LocalBoxFuture};
    use std::time::Instant;

    /// Runs `sh -c <script> sh <packages...>` per batch.
    struct ShellInstaller(&'static str);

    impl Installer for ShellInstaller {
        fn install<'a>(
            &'a self,
            packages: &'a [String],
            timeout: Option<Duration>,
        ) -> LocalBoxFuture<'a, Result<CommandResult>> {
            let spec = CommandSpec::new("sh")
                .arg("-c")
                .arg(self.0)
                .arg("sh")
                .args(packages.iter().cloned());
            async move { run(&spec, timeout).await }.boxed_local()
        }
    }

    fn reqs(names: &[&str]) -> Vec<Requirement> {
        names.iter().map(|n| Requirement::new(*n, None)).collect()
    }

    #[tokio::test]
    async fn batches_run_concurrently() {
        let installer = ShellInstaller("sleep 1");
        let started = Instant::now();
        let report = BatchInstaller::new(&installer)
            .batch_size(1)
            .run(&reqs(&["a", "b", "c", "d"]))
            .await;

        assert!(report.failed().is_empty());
        // Four sequential one-second batches would take at least four seconds.
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn nonzero_exit_fails_only_that_batch() {
        let installer =
            ShellInstaller(r#"for p in "$@"; do case "$p" in bad*) exit 1;; esac; done"#);
        let report = BatchInstaller::new(&installer)
            .batch_size(2)
            .run(&reqs(&["a", "b", "bad", "c"]))
            .await;

        assert!(report.results[0].success());
        assert_eq!(report.results[1].exit_code, Some(1));
    }

    #[tokio::test]
    async fn hung_batch_is_killed_by_timeout() {
        let installer = ShellInstaller(r#"case "$1" in slow) sleep 30;; esac"#);
        let started = Instant::now();
        let report = BatchInstaller::new(&installer)
            .batch_size(1)
            .timeout(Some(Duration::from_millis(300)))
            .run(&reqs(&["fast", "slow"]))
            .await;

        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(report.results[0].success());
        assert!(report.results[1].timed_out);
        assert_eq!(report.failed().len(), 1);
    }

    #[tokio::test]
    async fn missing_installer_binary_fails_every_batch() {
        let installer = PipInstaller::new("no-such-python-interpreter", Vec::new());
        let report = BatchInstaller::new(&installer)
            .run(&reqs(&["a", "b", "c", "d", "e"]))
            .await;
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failed().len(), 5);
        assert!(report.results.iter().all(|r| r.error.is_some()));
    }
}

//! The sync run: five isolated steps over one [`RunContext`].

use crate::config::SyncConfig;
use crate::error::Result;
use crate::install::{BatchInstaller, InstallChecker, Installer};
use crate::installed::InstalledPackageQuery;
use crate::manifest::{resolve, ManifestGenerator, ManifestStore};
use crate::orchestrator::bootstrap::install_bootstrap;
use crate::orchestrator::context::RunContext;
use crate::orchestrator::step::{run_step, skip_step};
use crate::orchestrator::submodule::clone_if_absent;
use crate::orchestrator::summary::RunSummary;
use crate::shell::block_on;
use std::path::{Path, PathBuf};
use std::time::Instant;

// Step names, in run order.
pub const PREPARE_MANIFEST: &str = "Prepare manifest";
pub const CLONE_SUBMODULE: &str = "Clone submodule";
pub const INSTALL_BOOTSTRAP: &str = "Install bootstrap";
pub const INSTALL_REQUIREMENTS: &str = "Install requirements";
pub const PIN_VERSIONS: &str = "Pin versions";

/// Run-time switches that are not part of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Skip the bootstrap install.
    pub skip_bootstrap: bool,

    /// Skip the submodule clone.
    pub skip_submodule: bool,
}

/// Sequences a sync run.
///
/// No step failure stops the run: each step runs inside [`run_step`], and
/// [`Orchestrator::run`] always returns a summary.
pub struct Orchestrator<'a> {
    config: &'a SyncConfig,
    project_root: PathBuf,
    installer: &'a dyn Installer,
    bootstrap_installer: Option<&'a dyn Installer>,
    registry: &'a dyn InstalledPackageQuery,
    generator: Option<&'a dyn ManifestGenerator>,
    options: RunOptions,
    git: String,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator with no generator and default options.
    pub fn new(
        config: &'a SyncConfig,
        project_root: &Path,
        installer: &'a dyn Installer,
        registry: &'a dyn InstalledPackageQuery,
    ) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
            installer,
            bootstrap_installer: None,
            registry,
            generator: None,
            options: RunOptions::default(),
            git: "git".to_string(),
        }
    }

    /// Generator used when the manifest is absent.
    pub fn generator(mut self, generator: Option<&'a dyn ManifestGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Installer for the bootstrap set. Defaults to the batch installer.
    pub fn bootstrap_installer(mut self, installer: &'a dyn Installer) -> Self {
        self.bootstrap_installer = Some(installer);
        self
    }

    /// Skip switches for this run.
    pub fn options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Git executable for the submodule clone.
    pub fn git(mut self, git: impl Into<String>) -> Self {
        self.git = git.into();
        self
    }

    /// Path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.config.manifest)
    }

    /// Run every step and summarize.
    pub fn run(&self) -> RunSummary {
        let start = Instant::now();
        let store = ManifestStore::new(self.manifest_path());
        tracing::info!(manifest = %store.path().display(), "starting sync");

        let ctx = RunContext::default();

        let ctx = run_step(PREPARE_MANIFEST, ctx, |ctx| {
            let manifest = store.ensure(self.generator)?;
            Ok(ctx.clone().with_manifest(manifest))
        });

        let ctx = match &self.config.submodule {
            _ if self.options.skip_submodule => skip_step(CLONE_SUBMODULE, ctx, "disabled"),
            None => skip_step(CLONE_SUBMODULE, ctx, "no submodule configured"),
            Some(submodule) => run_step(CLONE_SUBMODULE, ctx, |ctx| {
                let timeout = self.config.command_timeout();
                let outcome = clone_if_absent(submodule, &self.project_root, &self.git, timeout)?;
                Ok(ctx.clone().with_submodule(outcome))
            }),
        };

        let ctx = if self.options.skip_bootstrap {
            skip_step(INSTALL_BOOTSTRAP, ctx, "disabled")
        } else {
            run_step(INSTALL_BOOTSTRAP, ctx, |ctx| {
                let packages = self.bootstrap_packages()?;
                let installer = self.bootstrap_installer.unwrap_or(self.installer);
                let timeout = self.config.install_timeout();
                let outcome = block_on(install_bootstrap(&packages, installer, timeout))??;
                Ok(ctx.clone().with_bootstrap(outcome))
            })
        };

        let empty = ctx.manifest().is_empty();

        let ctx = if empty {
            skip_step(INSTALL_REQUIREMENTS, ctx, "manifest is empty")
        } else {
            run_step(INSTALL_REQUIREMENTS, ctx, |ctx| {
                let snapshot = self.registry.snapshot()?;
                let checker = InstallChecker::new(&snapshot);
                let requirements = ctx.manifest().requirements();
                let unsatisfied = checker.filter_unsatisfied(&requirements);
                let satisfied: Vec<_> = requirements
                    .into_iter()
                    .filter(|r| !unsatisfied.contains(r))
                    .collect();
                tracing::info!(
                    satisfied = satisfied.len(),
                    missing = unsatisfied.len(),
                    "checked requirements"
                );

                let batches = BatchInstaller::new(self.installer)
                    .batch_size(self.config.batch_size)
                    .timeout(self.config.install_timeout());
                let report = block_on(batches.run(&unsatisfied))?;
                Ok(ctx.clone().with_satisfied(satisfied).with_report(report))
            })
        };

        let ctx = if empty {
            skip_step(PIN_VERSIONS, ctx, "manifest is empty")
        } else {
            run_step(PIN_VERSIONS, ctx, |ctx| {
                let snapshot = self.registry.snapshot()?;
                let resolution = resolve(&ctx.manifest().requirements(), &snapshot);
                store.write(&resolution.manifest)?;
                tracing::info!(
                    pinned = resolution.pinned.len(),
                    fallbacks = resolution.fallbacks.len(),
                    "manifest rewritten"
                );
                Ok(ctx.clone().with_resolution(resolution))
            })
        };

        let summary = RunSummary::from_context(&ctx, start.elapsed());
        tracing::info!(
            installed = summary.installed.len(),
            failed = summary.failed.len(),
            elapsed = ?summary.elapsed,
            "sync completed"
        );
        summary
    }

    /// The bootstrap set, minus installed packages when `skip_installed` is on.
    fn bootstrap_packages(&self) -> Result<Vec<String>> {
        let packages = &self.config.bootstrap.packages;
        if !self.config.bootstrap.skip_installed {
            return Ok(packages.clone());
        }

        let snapshot = self.registry.snapshot()?;
        Ok(InstallChecker::new(&snapshot)
            .filter_unsatisfied_raw(packages)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

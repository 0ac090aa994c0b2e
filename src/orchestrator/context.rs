//! The value threaded through every step of a run.

use crate::install::BatchReport;
use crate::manifest::{Manifest, Requirement, Resolution};
use crate::orchestrator::bootstrap::BootstrapOutcome;
use crate::orchestrator::step::StepRecord;
use crate::orchestrator::submodule::SubmoduleOutcome;

/// Accumulated state of a run.
///
/// Steps never mutate a shared context: each receives the current value
/// and returns a new one built with the `with_*` methods.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    manifest: Manifest,
    satisfied: Vec<Requirement>,
    report: BatchReport,
    resolution: Option<Resolution>,
    bootstrap: Option<BootstrapOutcome>,
    submodule: Option<SubmoduleOutcome>,
    steps: Vec<StepRecord>,
}

impl RunContext {
    /// The current manifest (deduplicated, then resolved).
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Requirements that were installed before the run touched anything.
    pub fn satisfied(&self) -> &[Requirement] {
        &self.satisfied
    }

    /// Results of the batch installs.
    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Version resolution, once it has run.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// Bootstrap outcome, once it has run.
    pub fn bootstrap(&self) -> Option<&BootstrapOutcome> {
        self.bootstrap.as_ref()
    }

    /// Submodule outcome, once it has run.
    pub fn submodule(&self) -> Option<SubmoduleOutcome> {
        self.submodule
    }

    /// Steps recorded so far, in run order.
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Replace the current manifest.
    pub fn with_manifest(self, manifest: Manifest) -> Self {
        Self { manifest, ..self }
    }

    /// Record the requirements found already installed.
    pub fn with_satisfied(self, satisfied: Vec<Requirement>) -> Self {
        Self { satisfied, ..self }
    }

    /// Store the batch install report.
    pub fn with_report(self, report: BatchReport) -> Self {
        Self { report, ..self }
    }

    /// Store `resolution` and adopt its manifest as current.
    pub fn with_resolution(self, resolution: Resolution) -> Self {
        Self {
            manifest: resolution.manifest.clone(),
            resolution: Some(resolution),
            ..self
        }
    }

    /// Record the bootstrap outcome.
    pub fn with_bootstrap(self, bootstrap: BootstrapOutcome) -> Self {
        Self {
            bootstrap: Some(bootstrap),
            ..self
        }
    }

    /// Record the submodule outcome.
    pub fn with_submodule(self, submodule: SubmoduleOutcome) -> Self {
        Self {
            submodule: Some(submodule),
            ..self
        }
    }

    /// Append a step record.
    pub fn with_step(mut self, record: StepRecord) -> Self {
        self.steps.push(record);
        self
    }
}

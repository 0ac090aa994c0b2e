//! End-of-run summary derived from the final context.

use crate::manifest::Requirement;
use crate::orchestrator::bootstrap::BootstrapOutcome;
use crate::orchestrator::context::RunContext;
use crate::orchestrator::step::{StepRecord, StepStatus};
use crate::orchestrator::submodule::SubmoduleOutcome;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// What a run did. Every run completes; failures are listed here.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Requirements already installed before the run.
    pub satisfied: Vec<String>,

    /// Requirements installed by a successful batch.
    pub installed: Vec<String>,

    /// Requirements whose batch failed, timed out, or never launched.
    pub failed: Vec<String>,

    /// Manifest entries kept verbatim because the host does not report them.
    pub fallbacks: Vec<String>,

    /// Final manifest lines.
    pub manifest: Vec<String>,

    /// Every step, in run order.
    pub steps: Vec<StepRecord>,

    pub bootstrap: Option<BootstrapOutcome>,
    pub submodule: Option<SubmoduleOutcome>,

    /// Wall-clock time of the whole run.
    pub elapsed: Duration,

    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Build a summary from the context a run ended with.
    pub fn from_context(ctx: &RunContext, elapsed: Duration) -> Self {
        let lines = |reqs: Vec<&Requirement>| {
            reqs.into_iter().map(|r| r.to_line()).collect::<Vec<_>>()
        };

        Self {
            satisfied: ctx.satisfied().iter().map(|r| r.to_line()).collect(),
            installed: lines(ctx.report().installed()),
            failed: lines(ctx.report().failed()),
            fallbacks: ctx
                .resolution()
                .map(|r| r.fallbacks.iter().map(|f| f.to_line()).collect())
                .unwrap_or_default(),
            manifest: ctx.manifest().to_lines(),
            steps: ctx.steps().to_vec(),
            bootstrap: ctx.bootstrap().cloned(),
            submodule: ctx.submodule(),
            elapsed,
            finished_at: Utc::now(),
        }
    }

    /// Steps that returned an error.
    pub fn failed_steps(&self) -> Vec<&StepRecord> {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Failed)
            .collect()
    }

    /// Whether any package or step failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty() || !self.failed_steps().is_empty()
    }
}

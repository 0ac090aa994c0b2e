//! Step isolation.
//!
//! A step is a function from the current [`RunContext`] to the next one.
//! [`run_step`] catches its error, logs it with the step name, and carries
//! the previous context forward so the run continues.

use crate::error::Result;
use crate::orchestrator::context::RunContext;
use std::fmt;
use std::time::{Duration, Instant};

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step returned successfully.
    Completed,

    /// Step returned an error; the run continued without its changes.
    Failed,

    /// Step was not run.
    Skipped,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// Record of one step in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Step name.
    pub name: String,

    /// Final status.
    pub status: StepStatus,

    /// Time spent in the step.
    pub duration: Duration,

    /// Error message when failed, reason when skipped.
    pub detail: Option<String>,
}

/// Run `step`, isolating its failure from the rest of the run.
pub fn run_step<F>(name: &str, ctx: RunContext, step: F) -> RunContext
where
    F: FnOnce(&RunContext) -> Result<RunContext>,
{
    let start = Instant::now();
    tracing::info!(step = name, "starting");

    match step(&ctx) {
        Ok(next) => {
            let duration = start.elapsed();
            tracing::info!(step = name, ?duration, "completed");
            next.with_step(StepRecord {
                name: name.to_string(),
                status: StepStatus::Completed,
                duration,
                detail: None,
            })
        }
        Err(e) => {
            tracing::error!(step = name, error = %e, "step failed");
            ctx.with_step(StepRecord {
                name: name.to_string(),
                status: StepStatus::Failed,
                duration: start.elapsed(),
                detail: Some(e.to_string()),
            })
        }
    }
}

/// Record `name` as skipped without running anything.
pub fn skip_step(name: &str, ctx: RunContext, reason: &str) -> RunContext {
    tracing::debug!(step = name, reason, "skipped");
    ctx.with_step(StepRecord {
        name: name.to_string(),
        status: StepStatus::Skipped,
        duration: Duration::ZERO,
        detail: Some(reason.to_string()),
    })
}

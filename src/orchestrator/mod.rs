//! Sequencing a sync run.
//!
//! # Modules
//!
//! - [`context`] - The immutable value threaded through every step
//! - [`step`] - Step isolation wrapper and step records
//! - [`submodule`] - Clone-if-absent step
//! - [`bootstrap`] - Bootstrap package install step
//! - [`workflow`] - The [`Orchestrator`] itself
//! - [`summary`] - End-of-run [`RunSummary`]

pub mod bootstrap;
pub mod context;
pub mod step;
pub mod submodule;
pub mod summary;
pub mod workflow;

pub use bootstrap::{install_bootstrap, BootstrapOutcome};
pub use context::RunContext;
pub use step::{run_step, skip_step, StepRecord, StepStatus};
pub use submodule::{clone_if_absent, SubmoduleOutcome};
pub use summary::RunSummary;
pub use workflow::{
    Orchestrator, RunOptions, CLONE_SUBMODULE, INSTALL_BOOTSTRAP, INSTALL_REQUIREMENTS,
    PIN_VERSIONS, PREPARE_MANIFEST,
};

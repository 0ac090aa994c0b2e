//! Installing what the manifest asks for and the host lacks.
//!
//! # Modules
//!
//! - [`checker`] - Filter requirements already satisfied by a snapshot
//! - [`batch`] - Batch partitioning and per-batch results
//! - [`installer`] - The installer capability and its pip implementation
//! - [`runner`] - Concurrent batch execution

pub mod batch;
pub mod checker;
pub mod installer;
pub mod runner;

pub use batch::{partition, Batch, BatchReport, InstallResult, DEFAULT_BATCH_SIZE};
pub use checker::InstallChecker;
pub use installer::{Installer, PipInstaller};
pub use runner::BatchInstaller;

//! depsync - Reconcile a requirements manifest with what the host has installed.
//!
//! A sync run makes sure the manifest exists, installs whatever the host is
//! missing in concurrent fail-soft batches, and rewrites the manifest with the
//! versions that ended up installed. No single failure aborts a run.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`install`] - Satisfaction checks and batch installation
//! - [`installed`] - Installed-package queries and snapshots
//! - [`manifest`] - Requirements, the manifest file, and version pinning
//! - [`orchestrator`] - Step sequencing and the run summary
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use depsync::installed::{InstalledPackageRecord, PackageSnapshot};
//! use depsync::manifest::{resolve, Manifest};
//!
//! let manifest = Manifest::parse("requests==2.0.0\nnumpy\nrequests==2.0.0\n");
//! assert_eq!(manifest.len(), 2);
//!
//! let snapshot: PackageSnapshot = [
//!     InstalledPackageRecord::new("requests", "2.31.0"),
//!     InstalledPackageRecord::new("numpy", "1.26.4"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let resolution = resolve(&manifest.requirements(), &snapshot);
//! assert_eq!(resolution.lines(), vec!["requests==2.31.0", "numpy==1.26.4"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod installed;
pub mod manifest;
pub mod orchestrator;
pub mod shell;
pub mod ui;

pub use error::{QueryError, Result, SyncError};

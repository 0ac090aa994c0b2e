//! What the host reports as installed.
//!
//! The engine only ever sees a [`PackageSnapshot`]; where it comes from is
//! behind the [`InstalledPackageQuery`] capability so each metadata store
//! gets its own implementation.
//!
//! # Modules
//!
//! - [`snapshot`] - Point-in-time name → version map
//! - [`pip`] - Query through `pip list --format=json`
//! - [`dist_info`] - Query by scanning `site-packages` metadata directories

pub mod dist_info;
pub mod pip;
pub mod snapshot;

pub use dist_info::DistInfoQuery;
pub use pip::PipListQuery;
pub use snapshot::{InstalledPackageRecord, PackageSnapshot};

use crate::config::{RegistryKind, SyncConfig};
use crate::error::QueryError;
use std::path::Path;

/// Capability to enumerate installed packages.
pub trait InstalledPackageQuery {
    /// Take a fresh snapshot of every installed package.
    ///
    /// An `Ok` empty snapshot means nothing is installed; a failed query
    /// is always an `Err`.
    fn snapshot(&self) -> Result<PackageSnapshot, QueryError>;
}

/// Build the query selected by `config.registry`, run from `project_root`.
pub fn from_config(config: &SyncConfig, project_root: &Path) -> Box<dyn InstalledPackageQuery> {
    match config.registry {
        RegistryKind::Pip => Box::new(
            PipListQuery::new(&config.python)
                .with_cwd(project_root)
                .timeout(config.command_timeout()),
        ),
        RegistryKind::DistInfo => Box::new(DistInfoQuery::new(config.site_packages.clone())),
    }
}

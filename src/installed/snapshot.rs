//! Point-in-time view of installed packages.

use crate::manifest::comparison_key;
use std::collections::HashMap;

/// One installed distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackageRecord {
    /// Lowercased distribution name.
    pub name: String,

    /// Installed version.
    pub version: String,
}

impl InstalledPackageRecord {
    /// Create a record, lowercasing the name.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            version: version.trim().to_string(),
        }
    }
}

/// Snapshot of the host's installed packages, queried by name.
///
/// Not live: a new snapshot must be taken to observe installs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSnapshot {
    packages: HashMap<String, String>,
}

impl PackageSnapshot {
    /// Whether `raw` names an installed package.
    ///
    /// `raw` may carry a version specifier (`Flask==2.0.1`); only its
    /// comparison key is matched, case-insensitively.
    pub fn contains(&self, raw: &str) -> bool {
        self.packages.contains_key(&comparison_key(raw))
    }

    /// Installed version for `raw`, if present.
    pub fn version_of(&self, raw: &str) -> Option<&str> {
        self.packages.get(&comparison_key(raw)).map(String::as_str)
    }

    /// Number of installed packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<InstalledPackageRecord> for PackageSnapshot {
    fn from_iter<I: IntoIterator<Item = InstalledPackageRecord>>(iter: I) -> Self {
        Self {
            packages: iter
                .into_iter()
                .map(|record| (record.name, record.version))
                .collect(),
        }
    }
}

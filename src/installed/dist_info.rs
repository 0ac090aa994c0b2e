//! Installed packages read straight from `site-packages` metadata.
//!
//! Each installed distribution leaves a `<name>-<version>.dist-info`
//! directory (or a legacy `.egg-info`) whose `METADATA` / `PKG-INFO` file
//! starts with RFC 822 style headers. Scanning those avoids starting an
//! interpreter at all.

use crate::error::QueryError;
use crate::installed::snapshot::{InstalledPackageRecord, PackageSnapshot};
use crate::installed::InstalledPackageQuery;
use std::fs;
use std::path::{Path, PathBuf};

/// Scans metadata directories in one or more `site-packages` roots.
#[derive(Debug, Clone)]
pub struct DistInfoQuery {
    dirs: Vec<PathBuf>,
}

impl DistInfoQuery {
    /// Create a query over `dirs`.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl InstalledPackageQuery for DistInfoQuery {
    fn snapshot(&self) -> Result<PackageSnapshot, QueryError> {
        let mut records = Vec::new();
        for dir in &self.dirs {
            records.extend(scan_dir(dir)?);
        }
        Ok(records.into_iter().collect())
    }
}

fn scan_dir(dir: &Path) -> Result<Vec<InstalledPackageRecord>, QueryError> {
    let io_err = |source| QueryError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut records = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let (stem, metadata_file) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
            (stem, "METADATA")
        } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
            (stem, "PKG-INFO")
        } else {
            continue;
        };

        let record = read_metadata(&path.join(metadata_file)).or_else(|| parse_dir_stem(stem));
        match record {
            Some(record) => records.push(record),
            None => tracing::debug!(path = %path.display(), "skipping unreadable metadata"),
        }
    }
    Ok(records)
}

fn read_metadata(path: &Path) -> Option<InstalledPackageRecord> {
    let content = fs::read_to_string(path).ok()?;
    parse_metadata(&content)
}

/// Extract `Name` and `Version` from a metadata header block.
pub fn parse_metadata(content: &str) -> Option<InstalledPackageRecord> {
    let mut name = None;
    let mut version = None;

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Name:") {
            name.get_or_insert(value.trim());
        } else if let Some(value) = line.strip_prefix("Version:") {
            version.get_or_insert(value.trim());
        }
    }

    match (name, version) {
        (Some(name), Some(version)) if !name.is_empty() => {
            Some(InstalledPackageRecord::new(name, version))
        }
        _ => None,
    }
}

/// Split `name-version` from a metadata directory stem.
///
/// Names in directory stems have `-` escaped to `_`, so the first `-`
/// separates name from version.
fn parse_dir_stem(stem: &str) -> Option<InstalledPackageRecord> {
    let (name, version) = stem.split_once('-')?;
    let version = version.split('-').next().unwrap_or_default();
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some(InstalledPackageRecord::new(name, version))
}

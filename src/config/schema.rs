//! Configuration schema definitions for depsync.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format. Every field has a documented default so an
//! absent config file is equivalent to `{}`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for `.depsync/config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Manifest path, relative to the project root.
    pub manifest: PathBuf,

    /// Interpreter used to run pip, the generator, and the registry query.
    pub python: String,

    /// Maximum number of requirements installed by one subprocess.
    pub batch_size: usize,

    /// Seconds before a batch install is killed. `0` waits forever.
    pub install_timeout: u64,

    /// Seconds before the generator, git clone, or registry query is
    /// killed. `0` waits forever.
    pub command_timeout: u64,

    /// Extra arguments passed to `pip install` for every batch.
    pub install_args: Vec<String>,

    /// Manifest generation when the manifest is absent.
    pub generator: GeneratorConfig,

    /// Packages installed unconditionally on every run.
    pub bootstrap: BootstrapConfig,

    /// Optional repository cloned into the project if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodule: Option<SubmoduleConfig>,

    /// Which installed-package metadata store to query.
    pub registry: RegistryKind,

    /// Directories scanned by the `dist-info` registry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub site_packages: Vec<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("requirements.txt"),
            python: default_python(),
            batch_size: default_batch_size(),
            install_timeout: default_install_timeout(),
            command_timeout: default_command_timeout(),
            install_args: default_install_args(),
            generator: GeneratorConfig::default(),
            bootstrap: BootstrapConfig::default(),
            submodule: None,
            registry: RegistryKind::default(),
            site_packages: Vec::new(),
        }
    }
}

impl SyncConfig {
    /// The batch timeout, or `None` when disabled.
    pub fn install_timeout(&self) -> Option<Duration> {
        seconds(self.install_timeout)
    }

    /// The timeout for every other external command, or `None` when disabled.
    pub fn command_timeout(&self) -> Option<Duration> {
        seconds(self.command_timeout)
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn default_python() -> String {
    if cfg!(target_os = "windows") {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

fn default_batch_size() -> usize {
    4
}

fn default_install_timeout() -> u64 {
    600
}

fn default_command_timeout() -> u64 {
    300
}

fn default_install_args() -> Vec<String> {
    [
        "--upgrade",
        "--no-cache-dir",
        "--disable-pip-version-check",
        "--quiet",
        "--no-warn-script-location",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Manifest generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Run the generator when the manifest file is missing.
    pub enabled: bool,

    /// Directories the generator must not scan.
    pub ignore: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore: ["venv", ".venv", "submodules", "node_modules"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Bootstrap package settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Requirement strings installed in one non-batched call.
    pub packages: Vec<String>,

    /// Only pass packages the registry does not already report.
    pub skip_installed: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            packages: [
                "urllib3",
                "pipreqs",
                "onnxruntime",
                "discord",
                "opencv-python-headless",
                "python-Levenshtein",
                "pip",
                "setuptools",
                "wheel",
                "colorthief",
                "emoji==1.7.0",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            skip_installed: false,
        }
    }
}

/// Repository cloned into the project tree when the path is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleConfig {
    /// Clone source passed to git.
    pub url: String,

    /// Destination, relative to the project root.
    pub path: PathBuf,
}

/// Installed-package metadata store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryKind {
    /// `python -m pip list --format=json`.
    #[default]
    Pip,
    /// Scan `*.dist-info` directories in `site_packages`.
    DistInfo,
}

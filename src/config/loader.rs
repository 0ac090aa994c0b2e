//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! various locations in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::SyncConfig;
use crate::config::validator::validate;
use crate::error::{Result, SyncError};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding depsync configuration, both per user and per project.
pub const CONFIG_DIR: &str = ".depsync";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.depsync/config.yml`)
/// 2. Project config (`.depsync/config.yml`)
/// 3. Local overrides (`.depsync/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config: ~/.depsync/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .depsync/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .depsync/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self::discover_with_home(project_root, dirs::home_dir().as_deref())
    }

    /// Discover config files using an explicit home directory.
    pub fn discover_with_home(project_root: &Path, home: Option<&Path>) -> Self {
        Self {
            user_global: home.and_then(|h| existing(h.join(CONFIG_DIR).join("config.yml"))),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }

}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.depsync` directory first, then a `.git` directory. The
/// home directory's `.depsync` holds the user global config and does not
/// mark a project.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let home = dirs::home_dir();
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() && home.as_ref() != Some(&current) {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into a [`SyncConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SyncConfig> {
    let value = load_config_value(path)?;
    from_value(merge_configs(&[value]), path)
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SyncError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| SyncError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every discovered config layer.
///
/// With no config files at all the defaults apply.
pub fn load_merged_config(paths: &ConfigPaths, project_root: &Path) -> Result<SyncConfig> {
    let mut layers = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!(path = %path.display(), "loading config layer");
        layers.push(load_config_value(path)?);
    }

    from_value(
        merge_configs(&layers),
        &project_root.join(CONFIG_DIR).join("config.yml"),
    )
}

/// Load and validate config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<SyncConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => load_merged_config(&ConfigPaths::discover(project_root), project_root)?,
    };
    validate(&config)?;
    Ok(config)
}

fn from_value(value: serde_yaml::Value, path: &Path) -> Result<SyncConfig> {
    serde_yaml::from_value(value).map_err(|e| SyncError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_config(root: &Path, name: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "config.yml", "batch_size: 2");
        write_project_config(temp.path(), "config.local.yml", "");

        let paths = ConfigPaths::discover_with_home(temp.path(), None);
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover_with_home(temp.path(), None);
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn find_project_root_finds_config_dir() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("foo").join("bar");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_prefers_config_dir_over_git() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("nested").join("project");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::create_dir_all(subdir.join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(subdir));
    }

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover_with_home(temp.path(), None);
        let config = load_merged_config(&paths, temp.path()).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn local_overrides_project_and_user_global() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_project_config(home.path(), "config.yml", "python: /usr/bin/python3.11\nbatch_size: 3");
        write_project_config(project.path(), "config.yml", "batch_size: 5\ninstall_timeout: 30");
        write_project_config(project.path(), "config.local.yml", "install_timeout: 90");

        let paths = ConfigPaths::discover_with_home(project.path(), Some(home.path()));
        let config = load_merged_config(&paths, project.path()).unwrap();

        assert_eq!(config.python, "/usr/bin/python3.11");
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.install_timeout, 90);
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/config.yml"));
        assert!(matches!(result, Err(SyncError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_file_returns_parse_error_for_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.yml");
        fs::write(&path, "batch_size: [").unwrap();
        let result = load_config_file(&path);
        assert!(matches!(result, Err(SyncError::ConfigParseError { .. })));
    }

    #[test]
    fn load_config_file_handles_empty_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), SyncConfig::default());
    }

    #[test]
    fn load_config_with_override_skips_merge() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "config.yml", "batch_size: 9");
        let override_path = temp.path().join("custom.yml");
        fs::write(&override_path, "batch_size: 1").unwrap();

        let config = load_config(temp.path(), Some(&override_path)).unwrap();
        assert_eq!(config.batch_size, 1);
    }

    #[test]
    fn load_config_validates() {
        let temp = TempDir::new().unwrap();
        let override_path = temp.path().join("custom.yml");
        fs::write(&override_path, "batch_size: 0").unwrap();

        let result = load_config(temp.path(), Some(&override_path));
        assert!(matches!(
            result,
            Err(SyncError::ConfigValidationError { .. })
        ));
    }
}

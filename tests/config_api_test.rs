//! Integration tests for the config module public API.

use depsync::config::{load_config, validate_config, RegistryKind, SyncConfig};
use depsync::SyncError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn defaults_match_documented_values() {
    let config = SyncConfig::default();
    assert_eq!(config.manifest, PathBuf::from("requirements.txt"));
    assert_eq!(config.batch_size, 4);
    assert_eq!(config.install_timeout, 600);
    assert_eq!(config.registry, RegistryKind::Pip);
    assert!(config.generator.enabled);
    assert!(config.bootstrap.packages.contains(&"emoji==1.7.0".to_string()));
    assert!(validate_config(&config).is_empty());
}

#[test]
fn full_config_file_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("depsync.yml");
    fs::write(
        &path,
        r#"
manifest: deps/requirements.txt
python: /usr/bin/python3.12
batch_size: 8
install_timeout: 0
generator:
  enabled: false
bootstrap:
  packages: [pip, wheel]
  skip_installed: true
submodule:
  url: https://example.com/autonamer.git
  path: submodules/autonamer
registry: dist-info
site_packages:
  - /usr/lib/python3/dist-packages
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), Some(&path)).unwrap();

    assert_eq!(config.batch_size, 8);
    assert_eq!(config.install_timeout(), None);
    assert!(!config.generator.enabled);
    assert_eq!(config.bootstrap.packages, vec!["pip", "wheel"]);
    assert!(config.bootstrap.skip_installed);
    assert_eq!(config.registry, RegistryKind::DistInfo);
    assert_eq!(
        config.submodule.map(|s| s.path),
        Some(PathBuf::from("submodules/autonamer"))
    );
}

#[test]
fn dist_info_without_site_packages_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("depsync.yml");
    fs::write(&path, "registry: dist-info\n").unwrap();

    let err = load_config(temp.path(), Some(&path)).unwrap_err();
    assert!(matches!(err, SyncError::ConfigValidationError { .. }));
}

#[test]
fn explicit_missing_config_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
    assert!(matches!(err, SyncError::ConfigNotFound { .. }));
}

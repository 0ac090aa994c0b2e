//! Manifest parsing, deduplication, and persistence.

use crate::error::{Result, SyncError};
use crate::manifest::generator::ManifestGenerator;
use crate::manifest::requirement::{comparison_key, Requirement};
use anyhow::Context;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Insertion-ordered requirements keyed by comparison key.
///
/// Inserting a requirement whose key is already present replaces the
/// stored entry in place, so a duplicate keeps the position of its first
/// occurrence and the contents of its last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: IndexMap<String, Requirement>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest text, deduplicating as lines are read.
    pub fn parse(content: &str) -> Self {
        content.lines().filter_map(Requirement::parse).collect()
    }

    /// Insert a requirement, returning the entry it replaced.
    pub fn insert(&mut self, requirement: Requirement) -> Option<Requirement> {
        self.entries.insert(requirement.key(), requirement)
    }

    /// Look up a requirement by raw name or comparison key.
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.entries.get(&comparison_key(name))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate requirements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.values()
    }

    /// Clone the requirements out in insertion order.
    pub fn requirements(&self) -> Vec<Requirement> {
        self.iter().cloned().collect()
    }

    /// Manifest lines in insertion order.
    pub fn to_lines(&self) -> Vec<String> {
        self.iter().map(Requirement::to_line).collect()
    }

    /// File contents: one line per entry, each newline-terminated.
    pub fn render(&self) -> String {
        self.iter().map(|r| format!("{}\n", r.to_line())).collect()
    }
}

impl FromIterator<Requirement> for Manifest {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for requirement in iter {
            manifest.insert(requirement);
        }
        manifest
    }
}

/// Reads and writes the manifest file.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    /// Create a store for the manifest at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The manifest path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the manifest file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Parse the manifest file without rewriting it.
    pub fn read(&self) -> Result<Manifest> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read manifest {}", self.path.display()))?;
        Ok(Manifest::parse(&content))
    }

    /// Write `manifest` in insertion order.
    pub fn write(&self, manifest: &Manifest) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&self.path, manifest.render())
            .with_context(|| format!("Failed to write manifest {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), entries = manifest.len(), "wrote manifest");
        Ok(())
    }

    /// Load the manifest, generating it first when absent.
    ///
    /// The parsed, deduplicated manifest is written straight back so the
    /// file on disk is canonical. Fails with `ManifestGenerationFailure`
    /// when the file is absent and `generator` is `None`, fails, or does
    /// not produce the file.
    pub fn ensure(&self, generator: Option<&dyn ManifestGenerator>) -> Result<Manifest> {
        if !self.exists() {
            let generator = generator.ok_or_else(|| SyncError::ManifestGenerationFailure {
                message: format!(
                    "{} is missing and generation is disabled",
                    self.path.display()
                ),
            })?;

            tracing::info!(path = %self.path.display(), "manifest missing, generating");
            generator
                .generate(&self.path)
                .map_err(|e| SyncError::ManifestGenerationFailure {
                    message: e.to_string(),
                })?;

            if !self.exists() {
                return Err(SyncError::ManifestGenerationFailure {
                    message: format!("generator did not create {}", self.path.display()),
                });
            }
        }

        let manifest = self.read()?;
        self.write(&manifest)?;
        tracing::info!(entries = manifest.len(), "manifest ready");
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct WritingGenerator(&'static str);

    impl ManifestGenerator for WritingGenerator {
        fn generate(&self, manifest: &Path) -> Result<()> {
            fs::write(manifest, self.0)?;
            Ok(())
        }
    }

    struct NoopGenerator;

    impl ManifestGenerator for NoopGenerator {
        fn generate(&self, _manifest: &Path) -> Result<()> {
            Ok(())
        }
    }

    struct FailingGenerator;

    impl ManifestGenerator for FailingGenerator {
        fn generate(&self, _manifest: &Path) -> Result<()> {
            Err(SyncError::CommandFailed {
                command: "pipreqs".into(),
                code: Some(1),
            })
        }
    }

    #[test]
    fn parse_dedups_last_occurrence_wins() {
        let manifest = Manifest::parse("a==1\nb==1\na==2\n");
        assert_eq!(manifest.to_lines(), vec!["a==2", "b==1"]);
    }

    #[test]
    fn parse_dedups_case_insensitively() {
        let manifest = Manifest::parse("Flask==1.0\nrequests\nflask==2.0\n");
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("FLASK").unwrap().to_line(), "flask==2.0");
    }

    #[test]
    fn parse_ignores_blank_and_comment_lines() {
        let manifest = Manifest::parse("# header\n\nnumpy\n   \n#scipy\n");
        assert_eq!(manifest.to_lines(), vec!["numpy"]);
    }

    #[test]
    fn duplicate_requests_collapse_to_two_lines() {
        let mut content = String::from("# deps\n\nrequests==2.0.0\n");
        for i in 0..37 {
            content.push_str(&format!("# filler {}\n", i));
        }
        content.push_str("requests==2.0.0\nnumpy\n");

        let manifest = Manifest::parse(&content);
        assert_eq!(manifest.render(), "requests==2.0.0\nnumpy\n");
    }

    #[test]
    fn ensure_rewrites_canonical_form() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "requests==2.0.0\n\n# c\nnumpy\nrequests==2.0.0\n").unwrap();

        let store = ManifestStore::new(&path);
        let manifest = store.ensure(None).unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "requests==2.0.0\nnumpy\n"
        );
    }

    #[test]
    fn ensure_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "b==1\na\nB==2\n  c==3  \n").unwrap();

        let store = ManifestStore::new(&path);
        store.ensure(None).unwrap();
        let first = fs::read(&path).unwrap();
        store.ensure(None).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn ensure_generates_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        let store = ManifestStore::new(&path);

        let manifest = store
            .ensure(Some(&WritingGenerator("numpy==1.26.4\nnumpy==1.26.4\n")))
            .unwrap();

        assert_eq!(manifest.to_lines(), vec!["numpy==1.26.4"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "numpy==1.26.4\n");
    }

    #[test]
    fn ensure_without_generator_fails_softly() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path().join("requirements.txt"));

        let err = store.ensure(None).unwrap_err();
        assert!(matches!(err, SyncError::ManifestGenerationFailure { .. }));
        assert!(!store.exists());
    }

    #[test]
    fn ensure_reports_generator_failure() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path().join("requirements.txt"));

        let err = store.ensure(Some(&FailingGenerator)).unwrap_err();
        assert!(matches!(err, SyncError::ManifestGenerationFailure { .. }));
        assert!(err.to_string().contains("pipreqs"));
    }

    #[test]
    fn ensure_reports_generator_that_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path().join("requirements.txt"));

        let err = store.ensure(Some(&NoopGenerator)).unwrap_err();
        assert!(err.to_string().contains("did not create"));
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path().join("deps").join("requirements.txt"));

        store.write(&Manifest::parse("wheel")).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "wheel\n");
    }

    #[test]
    fn read_failure_names_the_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        let err = ManifestStore::new(&path).read().unwrap_err();

        assert!(matches!(err, SyncError::Other(_)));
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}

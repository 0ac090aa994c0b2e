//! A single manifest line.

use std::fmt;

/// Characters that start a version specifier in a raw requirement string.
const SPECIFIER_CHARS: [char; 3] = ['<', '=', '>'];

/// Derive the comparison key for a raw requirement string.
///
/// The key is everything before the first `<`, `=` or `>`, trimmed and
/// lowercased. `"Flask==2.0.1"` and `"flask"` share the key `"flask"`.
pub fn comparison_key(raw: &str) -> String {
    strip_specifier(raw).to_lowercase()
}

fn strip_specifier(raw: &str) -> &str {
    raw.split(SPECIFIER_CHARS)
        .next()
        .unwrap_or_default()
        .trim()
}

/// One named package plus an optional pinned version.
///
/// `name` holds the text left of the first `==` exactly as written (minus
/// surrounding whitespace), so an unpinned line such as `numpy>=1.26`
/// round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    version: Option<String>,
}

impl Requirement {
    /// Create a requirement from its parts.
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version: version.filter(|v| !v.is_empty()),
        }
    }

    /// Parse a manifest line.
    ///
    /// Returns `None` for blank lines, `#` comments, and lines with no
    /// package name.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (name, version) = match line.split_once("==") {
            Some((name, version)) => (name.trim(), Some(version.trim().to_string())),
            None => (line, None),
        };

        if strip_specifier(name).is_empty() {
            return None;
        }

        Some(Self::new(name, version))
    }

    /// The name as written in the manifest.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pinned version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Lowercased name with any specifier stripped, used for registry matching.
    pub fn key(&self) -> String {
        comparison_key(&self.name)
    }

    /// The package name with any specifier stripped, original case kept.
    pub fn display_name(&self) -> &str {
        strip_specifier(&self.name)
    }

    /// A copy of this requirement pinned to `version`.
    pub fn pinned(&self, version: &str) -> Self {
        Self::new(self.display_name(), Some(version.to_string()))
    }

    /// Serialize as a manifest line: `name==version` or bare `name`.
    pub fn to_line(&self) -> String {
        match &self.version {
            Some(version) => format!("{}=={}", self.name, version),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

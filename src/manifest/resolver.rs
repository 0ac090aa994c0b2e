//! Pin manifest entries to the versions the host actually has.

use crate::installed::PackageSnapshot;
use crate::manifest::requirement::Requirement;
use crate::manifest::store::Manifest;

/// Outcome of re-resolving every manifest entry against a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The rewritten manifest, in the original order.
    pub manifest: Manifest,

    /// Entries pinned to a resolved version.
    pub pinned: Vec<Requirement>,

    /// Entries the snapshot does not report, preserved verbatim.
    pub fallbacks: Vec<Requirement>,
}

impl Resolution {
    /// Manifest lines in order.
    pub fn lines(&self) -> Vec<String> {
        self.manifest.to_lines()
    }
}

/// Resolve every requirement against `snapshot`.
///
/// A requirement the snapshot reports becomes `name==installed_version`.
/// One it does not report keeps its original line, so a failed install
/// never drops an entry.
pub fn resolve(requirements: &[Requirement], snapshot: &PackageSnapshot) -> Resolution {
    let mut resolution = Resolution::default();

    for requirement in requirements {
        match snapshot.version_of(requirement.name()) {
            Some(version) => {
                let pinned = requirement.pinned(version);
                resolution.manifest.insert(pinned.clone());
                resolution.pinned.push(pinned);
            }
            None => {
                tracing::debug!(requirement = %requirement, "not installed, keeping original line");
                resolution.manifest.insert(requirement.clone());
                resolution.fallbacks.push(requirement.clone());
            }
        }
    }

    resolution
}

//! Decide which requirements still need installing.

use crate::installed::PackageSnapshot;
use crate::manifest::Requirement;

/// Checks requirements against a registry snapshot.
///
/// Matching is by comparison key only: an installed package satisfies a
/// requirement whatever version either side names.
pub struct InstallChecker<'a> {
    snapshot: &'a PackageSnapshot,
}

impl<'a> InstallChecker<'a> {
    /// Create a checker over `snapshot`.
    pub fn new(snapshot: &'a PackageSnapshot) -> Self {
        Self { snapshot }
    }

    /// Whether `requirement` is already installed.
    pub fn is_satisfied(&self, requirement: &Requirement) -> bool {
        self.snapshot.contains(requirement.name())
    }

    /// The requirements not yet installed, in input order.
    pub fn filter_unsatisfied(&self, requirements: &[Requirement]) -> Vec<Requirement> {
        requirements
            .iter()
            .filter(|r| !self.is_satisfied(r))
            .cloned()
            .collect()
    }

    /// Raw requirement strings not yet installed, in input order.
    pub fn filter_unsatisfied_raw<'r>(&self, raw: &'r [String]) -> Vec<&'r str> {
        raw.iter()
            .map(String::as_str)
            .filter(|r| !self.snapshot.contains(r))
            .collect()
    }
}

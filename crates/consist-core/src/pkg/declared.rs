//! Declared dependency set.

use super::manifest::{DependencyKind, Manifest};
use std::collections::HashSet;

/// Which package.json categories count as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySelection {
    pub dependencies: bool,
    pub dev_dependencies: bool,
    pub optional_dependencies: bool,
}

impl Default for DependencySelection {
    fn default() -> Self {
        Self {
            dependencies: true,
            dev_dependencies: false,
            optional_dependencies: false,
        }
    }
}

impl DependencySelection {
    /// Every category enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            dependencies: true,
            dev_dependencies: true,
            optional_dependencies: true,
        }
    }

    #[must_use]
    pub fn includes(&self, kind: DependencyKind) -> bool {
        match kind {
            DependencyKind::Prod => self.dependencies,
            DependencyKind::Dev => self.dev_dependencies,
            DependencyKind::Optional => self.optional_dependencies,
        }
    }
}

/// Names declared in the enabled categories of `manifest`.
///
/// Categories are concatenated as dependencies, devDependencies,
/// optionalDependencies; each name appears once, at its first occurrence.
#[must_use]
pub fn declared_names(manifest: &Manifest, selection: DependencySelection) -> Vec<String> {
    let mut seen = HashSet::new();

    DependencyKind::ALL
        .into_iter()
        .filter(|kind| selection.includes(*kind))
        .flat_map(move |kind| manifest.table(kind).names())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

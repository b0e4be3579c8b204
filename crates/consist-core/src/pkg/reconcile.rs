//! Declared vs installed reconciliation.

use super::installed::{list_installed, InstalledPackage};
use crate::error::Error;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Declared names with no installed package of the same resolved name, in declared order.
///
/// Matching uses the name from each installed package's own package.json,
/// not its directory name.
#[must_use]
pub fn missing_from(declared: &[String], installed: &[InstalledPackage]) -> Vec<String> {
    let index: HashSet<&str> = installed.iter().map(|p| p.name.as_str()).collect();

    declared
        .iter()
        .filter(|name| !index.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Narrow `declared` to the missing names when `missed` is set.
///
/// `node_modules` is only scanned when `missed` is true.
pub async fn reconcile(
    dir: &Path,
    declared: Vec<String>,
    missed: bool,
) -> Result<Vec<String>, Error> {
    if !missed {
        return Ok(declared);
    }

    let installed = list_installed(dir).await?;
    let missing = missing_from(&declared, &installed);

    debug!(
        declared = declared.len(),
        installed = installed.len(),
        missing = missing.len(),
        "reconciled declared dependencies"
    );
    Ok(missing)
}

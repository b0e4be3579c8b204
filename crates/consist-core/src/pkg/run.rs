//! The reconcile-then-install entry point.

use super::declared::declared_names;
use super::install::{install_packages, ConsoleProgress, InstallProgress, NoProgress};
use super::manifest::read_manifest;
use super::options::InstallOptions;
use super::reconcile::reconcile;
use crate::error::Error;
use crate::paths;
use std::path::Path;
use tracing::debug;

/// Reconcile `dir` and, unless `options.list` is set, install the targets.
///
/// With `options.verbose` install progress is printed to stdout.
///
/// Returns the target names in list mode, otherwise the names that were attempted.
pub async fn run(dir: &Path, options: &InstallOptions) -> Result<Vec<String>, Error> {
    if options.verbose {
        run_with_progress(dir, options, &ConsoleProgress::new(options.jobs)).await
    } else {
        run_with_progress(dir, options, &NoProgress).await
    }
}

/// Like [`run`], reporting install progress to `progress`.
pub async fn run_with_progress(
    dir: &Path,
    options: &InstallOptions,
    progress: &dyn InstallProgress,
) -> Result<Vec<String>, Error> {
    let manifest_path = paths::manifest_path(dir);
    let manifest = read_manifest(&manifest_path).await?;

    let declared = declared_names(&manifest, options.selection());
    debug!(
        path = %manifest_path.display(),
        declared = declared.len(),
        "read declared dependencies"
    );

    let targets = reconcile(dir, declared, options.missed).await?;

    if options.list {
        return Ok(targets);
    }

    install_packages(dir, &targets, options, progress).await
}

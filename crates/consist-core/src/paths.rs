//! Fixed locations inside a project directory.

use std::path::{Path, PathBuf};

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the installed packages directory.
pub const PACKAGES_DIR: &str = "node_modules";

/// Path of the project manifest under `dir`.
#[must_use]
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

/// Path of the installed packages directory under `dir`.
#[must_use]
pub fn packages_dir(dir: &Path) -> PathBuf {
    dir.join(PACKAGES_DIR)
}

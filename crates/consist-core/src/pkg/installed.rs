//! Installed package scanning.
//!
//! Provides read-only scanning of the top level of `node_modules/`.

use super::manifest::read_manifest_document;
use crate::error::Error;
use crate::paths;
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, trace};

/// A package found in `node_modules/`.
#[derive(Debug, Clone, Serialize)]
pub struct InstalledPackage {
    /// The packages directory the entry was found in.
    pub base: PathBuf,
    /// Entry name under `base` (`@scope/name` for scoped packages).
    pub dir: String,
    /// Full path of the package directory.
    pub path: PathBuf,
    /// Name from the package's own package.json, falling back to `dir`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// The package's raw package.json.
    #[serde(skip)]
    pub manifest: Value,
}

/// List packages installed in `dir/node_modules`.
///
/// A missing `node_modules` is an empty list. Entries without a regular
/// `package.json` file are skipped, except `@scope` directories whose children
/// are scanned in turn. A malformed package.json fails the whole scan.
///
/// The order follows directory enumeration and is not stable across platforms.
pub async fn list_installed(dir: &Path) -> Result<Vec<InstalledPackage>, Error> {
    let base = paths::packages_dir(dir);

    let entries = match read_entry_names(&base).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %base.display(), "no packages directory");
            return Ok(Vec::new());
        }
        Err(source) => return Err(Error::PackagesRead { path: base, source }),
    };

    let scanned = try_join_all(entries.iter().map(|entry| scan_entry(&base, entry))).await?;
    let packages: Vec<InstalledPackage> = scanned.into_iter().flatten().collect();

    debug!(
        path = %base.display(),
        entries = entries.len(),
        packages = packages.len(),
        "scanned installed packages"
    );
    Ok(packages)
}

async fn read_entry_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}

async fn scan_entry(base: &Path, entry: &str) -> Result<Vec<InstalledPackage>, Error> {
    if let Some(package) = read_installed(base, entry).await? {
        return Ok(vec![package]);
    }

    if !entry.starts_with('@') {
        return Ok(Vec::new());
    }

    // Scope directory: its children are the packages.
    let children = match read_entry_names(&base.join(entry)).await {
        Ok(children) => children,
        Err(e) => {
            debug!(entry, error = %e, "skipping unreadable scope directory");
            return Ok(Vec::new());
        }
    };
    let scoped: Vec<String> = children
        .iter()
        .map(|child| format!("{entry}/{child}"))
        .collect();

    let found = try_join_all(scoped.iter().map(|name| read_installed(base, name))).await?;
    Ok(found.into_iter().flatten().collect())
}

async fn read_installed(base: &Path, entry: &str) -> Result<Option<InstalledPackage>, Error> {
    let path = base.join(entry);
    let manifest_path = paths::manifest_path(&path);

    match fs::metadata(&manifest_path).await {
        Ok(meta) if meta.is_file() => {}
        _ => {
            trace!(entry, "skipping entry without package.json");
            return Ok(None);
        }
    }

    let (manifest, raw) = match read_manifest_document(&manifest_path).await {
        Ok(document) => document,
        // Removed since the metadata check.
        Err(Error::ManifestNotFound { .. }) => return Ok(None),
        Err(e) => return Err(e),
    };

    Ok(Some(InstalledPackage {
        base: base.to_path_buf(),
        dir: entry.to_string(),
        path,
        name: manifest.name.unwrap_or_else(|| entry.to_string()),
        version: manifest.version,
        manifest: raw,
    }))
}

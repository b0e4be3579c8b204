//! Dependency reconciliation.
//!
//! Provides:
//! - Reading package.json into a typed manifest
//! - Building the declared dependency set from selected categories
//! - Scanning `node_modules` for installed packages
//! - Computing the declared packages that are missing
//! - Running an external install command per package

pub mod declared;
pub mod install;
pub mod installed;
pub mod manifest;
pub mod options;
pub mod reconcile;
pub mod run;

pub use declared::{declared_names, DependencySelection};
pub use install::{install_packages, ConsoleProgress, InstallEvent, InstallProgress, NoProgress};
pub use installed::{list_installed, InstalledPackage};
pub use manifest::{read_manifest, DependencyKind, DependencyTable, Manifest};
pub use options::{InstallCommand, InstallOptions};
pub use reconcile::{missing_from, reconcile};
pub use run::{run, run_with_progress};

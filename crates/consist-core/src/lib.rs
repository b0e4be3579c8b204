#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Core engine for npm-consist.
//!
//! Reconciles the dependencies declared in a project's `package.json` against
//! what is present in `node_modules/`, and drives an external install command
//! for the names that need it.

pub mod config;
pub mod error;
pub mod paths;
pub mod pkg;
pub mod version;

pub use config::Config;
pub use error::{codes, Error, InstallFailure};
pub use pkg::{
    declared_names, install_packages, list_installed, missing_from, read_manifest, reconcile,
    run, run_with_progress, ConsoleProgress, DependencyKind, DependencySelection, InstallCommand,
    InstallEvent, InstallOptions, InstallProgress, InstalledPackage, Manifest, NoProgress,
};
pub use version::VERSION;

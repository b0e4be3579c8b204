//! `npm-consist installed` command implementation.

use super::{ErrorInfo, EXIT_ERROR};
use consist_core::{Config, InstalledPackage};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tracing::info;

/// Installed list result for JSON output.
#[derive(Serialize)]
struct InstalledJsonResult {
    ok: bool,
    packages: Vec<InstalledPackage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

/// Run the installed command.
pub fn run(config: &Config) -> Result<()> {
    info!(cwd = %config.cwd.display(), "INSTALLED command invoked");

    let rt = tokio::runtime::Runtime::new().into_diagnostic()?;
    let result = rt
        .block_on(consist_core::list_installed(&config.cwd))
        .map(|mut packages| {
            // Enumeration order is platform dependent; sort for display.
            packages.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.dir.cmp(&b.dir)));
            packages
        });

    if config.json_logs {
        let output = match result {
            Ok(packages) => InstalledJsonResult {
                ok: true,
                packages,
                error: None,
            },
            Err(err) => InstalledJsonResult {
                ok: false,
                packages: Vec::new(),
                error: Some(ErrorInfo::from(&err)),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);

        if !output.ok {
            std::process::exit(EXIT_ERROR);
        }
        return Ok(());
    }

    let packages = result.into_diagnostic()?;
    for package in &packages {
        print_package(package, config.verbose());
    }
    Ok(())
}

fn print_package(package: &InstalledPackage, verbose: bool) {
    let label = match &package.version {
        Some(version) => format!("{}@{version}", package.name),
        None => package.name.clone(),
    };

    if verbose {
        println!("{label}\t{}", package.path.display());
    } else {
        println!("{label}");
    }
}

//! `npm-consist install` command implementation.

use super::{ErrorInfo, EXIT_ERROR};
use consist_core::{Config, InstallEvent, InstallOptions, InstallProgress};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::cell::RefCell;
use tracing::info;

/// Install result for JSON output.
#[derive(Serialize)]
struct InstallJsonResult {
    ok: bool,
    /// Listed names in list mode, attempted names otherwise.
    packages: Vec<String>,
    /// Names whose install failed (only with `--continue`, or the one that aborted the run).
    failed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

/// Collects the names of failed installs.
#[derive(Default)]
struct FailureCollector(RefCell<Vec<String>>);

impl InstallProgress for FailureCollector {
    fn on_event(&self, event: &InstallEvent<'_>) {
        if let InstallEvent::Failed { name, .. } = event {
            self.0.borrow_mut().push((*name).to_string());
        }
    }
}

/// Run the install command.
pub fn run(config: &Config, options: &InstallOptions) -> Result<()> {
    let span = tracing::info_span!("install", cmd = "install", cwd = %config.cwd.display());
    let _guard = span.enter();
    info!(
        missed = options.missed,
        list = options.list,
        keep_going = options.keep_going,
        jobs = options.jobs,
        "INSTALL command invoked"
    );

    let rt = tokio::runtime::Runtime::new().into_diagnostic()?;

    if config.json_logs {
        let failures = FailureCollector::default();
        let result = rt.block_on(consist_core::run_with_progress(
            &config.cwd,
            options,
            &failures,
        ));
        let failed = failures.0.into_inner();

        let output = match &result {
            Ok(packages) => InstallJsonResult {
                ok: true,
                packages: packages.clone(),
                failed,
                error: None,
            },
            Err(err) => InstallJsonResult {
                ok: false,
                packages: Vec::new(),
                failed,
                error: Some(ErrorInfo::from(err)),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);

        if result.is_err() {
            std::process::exit(EXIT_ERROR);
        }
        return Ok(());
    }

    let packages = rt
        .block_on(consist_core::run(&config.cwd, options))
        .into_diagnostic()?;
    info!(count = packages.len(), "install finished");

    print_packages(&packages, options.verbose);
    Ok(())
}

fn print_packages(packages: &[String], verbose: bool) {
    if verbose {
        println!("Installed: {}", packages.len());
    } else if !packages.is_empty() {
        println!("{}", packages.join("\n"));
    }
}

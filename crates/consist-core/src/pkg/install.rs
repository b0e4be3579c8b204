//! Running the external install command.

use super::options::InstallOptions;
use crate::error::{Error, InstallFailure};
use futures::stream::{self, StreamExt};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace, warn};

/// Progress of a single package install.
#[derive(Debug, Clone, Copy)]
pub enum InstallEvent<'a> {
    Started { name: &'a str },
    Succeeded { name: &'a str },
    Failed { name: &'a str, failure: &'a InstallFailure },
}

/// Receives install progress notifications.
pub trait InstallProgress {
    fn on_event(&self, event: &InstallEvent<'_>);
}

/// Progress sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl InstallProgress for NoProgress {
    fn on_event(&self, _event: &InstallEvent<'_>) {}
}

/// Prints `Install: <name>` followed by ` DONE` or ` FAIL` to stdout.
///
/// With concurrent installs each package gets a single line on completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress {
    concurrent: bool,
}

impl ConsoleProgress {
    #[must_use]
    pub fn new(jobs: usize) -> Self {
        Self {
            concurrent: jobs > 1,
        }
    }
}

impl ConsoleProgress {
    fn write_event(&self, out: &mut impl Write, event: &InstallEvent<'_>) -> io::Result<()> {
        match (event, self.concurrent) {
            (InstallEvent::Started { name }, false) => write!(out, "Install: {name}"),
            (InstallEvent::Started { .. }, true) => Ok(()),
            (InstallEvent::Succeeded { .. }, false) => writeln!(out, " DONE"),
            (InstallEvent::Failed { .. }, false) => writeln!(out, " FAIL"),
            (InstallEvent::Succeeded { name }, true) => writeln!(out, "Install: {name} DONE"),
            (InstallEvent::Failed { name, .. }, true) => writeln!(out, "Install: {name} FAIL"),
        }?;
        out.flush()
    }
}

impl InstallProgress for ConsoleProgress {
    fn on_event(&self, event: &InstallEvent<'_>) {
        let _ = self.write_event(&mut io::stdout().lock(), event);
    }
}

/// Install each of `names` into `dir` with the configured install command.
///
/// Packages are installed one at a time unless `options.jobs` allows more;
/// outcomes are always handled in input order. A failure aborts with
/// [`Error::Install`] unless `options.keep_going` is set, in which case it is
/// reported and the package still counts as processed.
///
/// Returns the names that were attempted, in input order.
pub async fn install_packages(
    dir: &Path,
    names: &[String],
    options: &InstallOptions,
    progress: &dyn InstallProgress,
) -> Result<Vec<String>, Error> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let program = resolve_program(&options.command.program);
    let program = program.as_path();
    let jobs = options.jobs.max(1);
    debug!(
        program = %program.display(),
        packages = names.len(),
        jobs,
        "installing packages"
    );

    let mut outcomes = stream::iter(names)
        .map(move |name| {
            let name = name.as_str();
            async move {
                progress.on_event(&InstallEvent::Started { name });
                let result = install_one(dir, program, name, options).await;
                (name, result)
            }
        })
        .buffered(jobs);

    let mut attempted = Vec::with_capacity(names.len());

    while let Some((name, result)) = outcomes.next().await {
        match result {
            Ok(()) => progress.on_event(&InstallEvent::Succeeded { name }),
            Err(failure) => {
                progress.on_event(&InstallEvent::Failed {
                    name,
                    failure: &failure,
                });
                if !options.keep_going {
                    return Err(Error::install(name, failure));
                }
                warn!(package = name, %failure, "install failed, continuing");
            }
        }
        attempted.push(name.to_string());
    }

    Ok(attempted)
}

/// Resolve the program through PATH (picks up `npm.cmd` on Windows).
///
/// Falls back to the bare name so a missing program surfaces as a spawn error.
fn resolve_program(program: &str) -> PathBuf {
    which::which(program).unwrap_or_else(|_| PathBuf::from(program))
}

/// Runs one install to completion.
///
/// The child is killed if the returned future is dropped.
async fn install_one(
    dir: &Path,
    program: &Path,
    name: &str,
    options: &InstallOptions,
) -> Result<(), InstallFailure> {
    let mut cmd = Command::new(program);
    cmd.args(&options.command.args)
        .arg(name)
        .current_dir(dir)
        .kill_on_drop(true);

    if options.debug {
        cmd.stdin(Stdio::inherit()).stderr(Stdio::inherit());
        if options.stdout_to_stderr {
            cmd.stdout(io::stderr());
        } else {
            cmd.stdout(Stdio::inherit());
        }
    } else {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
    }

    trace!(package = name, "spawning install command");
    let status = cmd.status().await.map_err(InstallFailure::Spawn)?;
    debug!(package = name, code = ?status.code(), "install command exited");

    if status.success() {
        Ok(())
    } else {
        Err(InstallFailure::Status(status.code()))
    }
}

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use consist_core::{Config, InstallCommand, InstallOptions};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

/// Environment variable overriding the install program.
const INSTALLER_ENV: &str = "NPM_CONSIST_INSTALLER";

#[derive(Parser, Debug)]
#[command(name = "npm-consist")]
#[command(author, version, about = "Keep node_modules consistent with package.json", long_about = None)]
struct Cli {
    /// Print install progress; repeat to raise log verbosity (-vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Target project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Install dependencies declared in package.json, one package at a time
    #[command(visible_alias = "i")]
    Install {
        /// Show the install command's own output (also enabled by DEBUG=1)
        #[arg(short, long)]
        debug: bool,

        /// Keep going when a package fails to install
        #[arg(short = 'i', long = "continue")]
        keep_going: bool,

        /// Only target packages missing from node_modules
        #[arg(short, long)]
        missed: bool,

        /// List target packages instead of installing them
        #[arg(short, long)]
        list: bool,

        /// Include devDependencies
        #[arg(long)]
        dev: bool,

        /// Include optionalDependencies
        #[arg(long)]
        optional: bool,

        /// Skip dependencies
        #[arg(long)]
        no_prod: bool,

        /// Number of packages to install concurrently
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=64))]
        jobs: u32,

        /// npm-compatible program, run as `<PROGRAM> install <name>`
        #[arg(long, env = INSTALLER_ENV, value_name = "PROGRAM", default_value = "npm")]
        installer: String,
    },

    /// List packages installed in node_modules
    #[command(visible_alias = "ls")]
    Installed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Install {
            debug,
            keep_going,
            missed,
            list,
            dev,
            optional,
            no_prod,
            jobs,
            installer,
        }) => {
            let options = InstallOptions {
                // JSON mode keeps stdout for the result object.
                verbose: config.verbose() && !config.json_logs,
                debug: debug || debug_from_env(),
                stdout_to_stderr: config.json_logs,
                keep_going,
                dependencies: !no_prod,
                dev_dependencies: dev,
                optional_dependencies: optional,
                missed,
                list,
                jobs: jobs as usize,
                command: InstallCommand::new(installer, ["install"]),
            };
            commands::install::run(&config, &options)
        }
        Some(Commands::Installed) => commands::installed::run(&config),
        None => {
            Cli::command().print_help().into_diagnostic()?;
            Ok(())
        }
    }
}

/// `DEBUG=1` turns on pass-through installer output.
fn debug_from_env() -> bool {
    std::env::var("DEBUG").is_ok_and(|v| v == "1")
}

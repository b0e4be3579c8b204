use super::declared::DependencySelection;

/// External command run once per package, with the package name appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for InstallCommand {
    fn default() -> Self {
        Self::new("npm", ["install"])
    }
}

impl InstallCommand {
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Options for a reconcile/install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Print install progress.
    pub verbose: bool,
    /// Let the install command write to the terminal instead of discarding its output.
    pub debug: bool,
    /// With `debug`, send the install command's stdout to our stderr so stdout
    /// stays machine-readable.
    pub stdout_to_stderr: bool,
    /// Keep installing after a failed package.
    pub keep_going: bool,
    pub dependencies: bool,
    pub dev_dependencies: bool,
    pub optional_dependencies: bool,
    /// Only target declared names that are not installed.
    pub missed: bool,
    /// Return the target names without installing.
    pub list: bool,
    /// Maximum concurrent installs (default 1).
    pub jobs: usize,
    pub command: InstallCommand,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
            stdout_to_stderr: false,
            keep_going: false,
            dependencies: true,
            dev_dependencies: false,
            optional_dependencies: false,
            missed: false,
            list: false,
            jobs: 1,
            command: InstallCommand::default(),
        }
    }
}

impl InstallOptions {
    /// The categories that count as declared.
    #[must_use]
    pub fn selection(&self) -> DependencySelection {
        DependencySelection {
            dependencies: self.dependencies,
            dev_dependencies: self.dev_dependencies,
            optional_dependencies: self.optional_dependencies,
        }
    }

    #[must_use]
    pub fn with_missed(mut self, missed: bool) -> Self {
        self.missed = missed;
        self
    }

    #[must_use]
    pub fn with_list(mut self, list: bool) -> Self {
        self.list = list;
        self
    }

    #[must_use]
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: InstallCommand) -> Self {
        self.command = command;
        self
    }
}

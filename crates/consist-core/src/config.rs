use std::path::PathBuf;

/// Runtime configuration for the npm-consist CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target project directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Whether install progress should be printed.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbosity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::new(PathBuf::from("/work"))
            .with_verbosity(2)
            .with_json_logs(true);

        assert_eq!(config.cwd, PathBuf::from("/work"));
        assert_eq!(config.verbosity, 2);
        assert!(config.json_logs);
        assert!(config.verbose());
    }

    #[test]
    fn test_default_is_quiet() {
        let config = Config::new(PathBuf::from("."));
        assert!(!config.verbose());
        assert!(!config.json_logs);
    }
}

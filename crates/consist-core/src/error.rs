use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes, one per [`Error`] variant.
pub mod codes {
    pub const CONSIST_MANIFEST_NOT_FOUND: &str = "CONSIST_MANIFEST_NOT_FOUND";
    pub const CONSIST_MANIFEST_READ_FAILED: &str = "CONSIST_MANIFEST_READ_FAILED";
    pub const CONSIST_MANIFEST_INVALID: &str = "CONSIST_MANIFEST_INVALID";
    pub const CONSIST_PACKAGES_READ_FAILED: &str = "CONSIST_PACKAGES_READ_FAILED";
    pub const CONSIST_INSTALL_FAILED: &str = "CONSIST_INSTALL_FAILED";
}

/// Core error type for npm-consist operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("package.json not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Package content is not a valid JSON: '{}': {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read packages directory {}: {source}", path.display())]
    PackagesRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while installing \"{name}\": {failure}")]
    Install { name: String, failure: InstallFailure },
}

impl Error {
    /// Get the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ManifestNotFound { .. } => codes::CONSIST_MANIFEST_NOT_FOUND,
            Self::ManifestRead { .. } => codes::CONSIST_MANIFEST_READ_FAILED,
            Self::ManifestParse { .. } => codes::CONSIST_MANIFEST_INVALID,
            Self::PackagesRead { .. } => codes::CONSIST_PACKAGES_READ_FAILED,
            Self::Install { .. } => codes::CONSIST_INSTALL_FAILED,
        }
    }

    #[must_use]
    pub fn install(name: impl Into<String>, failure: InstallFailure) -> Self {
        Self::Install {
            name: name.into(),
            failure,
        }
    }
}

/// Why a single external install invocation failed.
#[derive(Debug)]
pub enum InstallFailure {
    /// The install command could not be started.
    Spawn(io::Error),
    /// The install command exited unsuccessfully. `None` when killed by a signal.
    Status(Option<i32>),
}

impl fmt::Display for InstallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to spawn install command: {e}"),
            Self::Status(Some(code)) => write!(f, "install command exited with status {code}"),
            Self::Status(None) => write!(f, "install command was terminated by a signal"),
        }
    }
}

impl std::error::Error for InstallFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_uppercase() {
        let all_codes = [
            codes::CONSIST_MANIFEST_NOT_FOUND,
            codes::CONSIST_MANIFEST_READ_FAILED,
            codes::CONSIST_MANIFEST_INVALID,
            codes::CONSIST_PACKAGES_READ_FAILED,
            codes::CONSIST_INSTALL_FAILED,
        ];

        for code in all_codes {
            assert!(
                code.chars().all(|c| c.is_uppercase() || c == '_'),
                "Error code '{code}' should be SCREAMING_SNAKE_CASE"
            );
        }
    }

    #[test]
    fn test_install_error_mentions_package() {
        let err = Error::install("left-pad", InstallFailure::Status(Some(1)));
        assert_eq!(err.code(), codes::CONSIST_INSTALL_FAILED);
        let msg = err.to_string();
        assert!(msg.contains("\"left-pad\""));
        assert!(msg.contains("status 1"));
    }

    #[test]
    fn test_spawn_failure_keeps_source() {
        let failure = InstallFailure::Spawn(io::Error::new(io::ErrorKind::NotFound, "no npm"));
        assert!(std::error::Error::source(&failure).is_some());
        assert!(failure.to_string().contains("no npm"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::ManifestNotFound {
            path: PathBuf::from("/tmp/project/package.json"),
        };
        assert_eq!(err.code(), codes::CONSIST_MANIFEST_NOT_FOUND);
        assert!(err.to_string().contains("/tmp/project/package.json"));
    }
}

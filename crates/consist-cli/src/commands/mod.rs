pub mod install;
pub mod installed;
pub mod version;

use serde::Serialize;

/// Error info for JSON output.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

impl From<&consist_core::Error> for ErrorInfo {
    fn from(err: &consist_core::Error) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Exit code for failed commands in JSON mode.
pub const EXIT_ERROR: i32 = 1;

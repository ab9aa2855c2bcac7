// Dispatch error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Dispatch error code constants
///
/// Error code range: 3001-3003
pub struct DispatchErrorCodes {}

impl DispatchErrorCodes {
    /// Selector token has no catalog entry
    pub const UNKNOWN_SELECTOR: i32 = 3001;

    /// Scenario entry point returned instead of panicking
    pub const SCENARIO_RETURNED: i32 = 3002;

    /// Writing the banner or diagnostics to the output stream failed
    pub const OUTPUT_FAILED: i32 = 3003;
}

/// Log a dispatch error with structured context
///
/// Records go to the stderr subscriber; stdout stays reserved for the
/// banner and selector diagnostics.
pub fn log_dispatch_error(err: &DispatchError, context: &str) {
    error!(
        "Dispatch error in {}: code={}, component=Dispatcher, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors produced by the dispatcher instead of a fixture crash
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Selector did not match any catalog token
    UnknownSelector {
        token: String,
        available: Vec<&'static str>,
    },

    /// Entry point came back normally; the fixture is broken
    ScenarioReturned { token: &'static str },

    /// Output stream rejected the banner or diagnostic lines
    OutputFailed { details: String },
}

impl ErrorCode for DispatchError {
    fn code(&self) -> i32 {
        match self {
            DispatchError::UnknownSelector { .. } => DispatchErrorCodes::UNKNOWN_SELECTOR,
            DispatchError::ScenarioReturned { .. } => DispatchErrorCodes::SCENARIO_RETURNED,
            DispatchError::OutputFailed { .. } => DispatchErrorCodes::OUTPUT_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            DispatchError::UnknownSelector { token, available } => {
                format!(
                    "Unknown test type '{}' (available: {})",
                    token,
                    available.join(", ")
                )
            }
            DispatchError::ScenarioReturned { token } => {
                format!("Scenario '{}' returned without panicking", token)
            }
            DispatchError::OutputFailed { details } => {
                format!("Failed to write fixture output: {}", details)
            }
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DispatchError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for DispatchError {}

/// Convert from std::io::Error to DispatchError
impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        DispatchError::OutputFailed {
            details: err.to_string(),
        }
    }
}

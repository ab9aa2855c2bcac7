// Catalog error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Catalog error code constants
///
/// Error code range: 3101-3102
pub struct CatalogErrorCodes {}

impl CatalogErrorCodes {
    /// Two scenarios share a token
    pub const DUPLICATE_TOKEN: i32 = 3101;

    /// Catalog built without any scenario
    pub const EMPTY: i32 = 3102;
}

/// Log a catalog error with structured context
pub fn log_catalog_error(err: &CatalogError, context: &str) {
    error!(
        "Catalog error in {}: code={}, component=ScenarioCatalog, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while building a scenario catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Token already registered by an earlier scenario
    DuplicateToken { token: &'static str },

    /// No scenarios were supplied
    Empty,
}

impl ErrorCode for CatalogError {
    fn code(&self) -> i32 {
        match self {
            CatalogError::DuplicateToken { .. } => CatalogErrorCodes::DUPLICATE_TOKEN,
            CatalogError::Empty => CatalogErrorCodes::EMPTY,
        }
    }

    fn message(&self) -> String {
        match self {
            CatalogError::DuplicateToken { token } => {
                format!("Duplicate scenario token: {}", token)
            }
            CatalogError::Empty => "Catalog must contain at least one scenario".to_string(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CatalogError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CatalogError {}

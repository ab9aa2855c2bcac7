// Error types for the stack trace fixture
//
// Fixture-triggered failures are panics and never pass through these types.
// The enums here cover the invocation side: catalog construction and
// selector dispatch, each with a stable numeric code.

mod catalog;
mod dispatch;

pub use catalog::{log_catalog_error, CatalogError, CatalogErrorCodes};
pub use dispatch::{log_dispatch_error, DispatchError, DispatchErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so the binary can map them onto exit statuses
/// and log lines consistently.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

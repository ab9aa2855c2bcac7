// Stack Trace Fixture - deterministic panic scenarios
// Each run picks one catalog scenario and lets its panic reach the default hook

// Module declarations
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod failure_paths;

// Re-exports for convenience
pub use catalog::{catalog, Scenario, ScenarioCatalog, ScenarioSummary};
pub use config::{BacktraceMode, FixtureConfig, LogLevel};
pub use dispatch::Dispatcher;
pub use error::{DispatchError, ErrorCode};
pub use failure_paths::FailureKind;

use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, Registry};

/// Handle for adjusting the log level after the subscriber is installed.
pub struct LoggingHandle {
    filter: reload::Handle<LevelFilter, Registry>,
}

impl LoggingHandle {
    pub fn set_level(&self, level: LogLevel) {
        if let Err(err) = self.filter.reload(level.as_filter()) {
            tracing::warn!("failed to change log level: {err}");
        }
    }
}

/// Install the stderr log subscriber
///
/// Stdout carries the banner contract, so logs never go there. Colour is
/// only used when stderr is a terminal. Returns `None` when a subscriber is
/// already installed.
pub fn init_logging(level: LogLevel) -> Option<LoggingHandle> {
    let (filter, handle) = reload::Layer::new(level.as_filter());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()?;
    tracing::trace!(?level, "logging initialised");
    Some(LoggingHandle { filter: handle })
}

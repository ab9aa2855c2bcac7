//! Configuration for banner text, default selector, backtraces and logging
//!
//! Values come from defaults, an optional JSON file, and environment
//! variables, in that order. The binary applies command-line overrides last.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use tracing::level_filters::LevelFilter;

/// Environment variable read by the Rust runtime's panic hook.
pub const RUST_BACKTRACE_ENV: &str = "RUST_BACKTRACE";
/// Environment override for [`FixtureConfig::backtrace`].
pub const BACKTRACE_ENV: &str = "STACKTRACE_FIXTURE_BACKTRACE";
/// Environment override for [`FixtureConfig::log_level`].
pub const LOG_LEVEL_ENV: &str = "STACKTRACE_FIXTURE_LOG";

/// Complete fixture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// First banner line
    pub title: String,
    /// Number of `=` characters in the separator line
    pub separator_width: usize,
    /// Selector used when none is given on the command line
    pub default_scenario: String,
    pub backtrace: BacktraceMode,
    /// Max level of the stderr log subscriber
    pub log_level: LogLevel,
    /// Overwrite an existing RUST_BACKTRACE instead of deferring to it
    #[serde(skip)]
    pub force_backtrace: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            title: "Rust Stack Trace Test Script".to_string(),
            separator_width: 50,
            default_scenario: "value".to_string(),
            backtrace: BacktraceMode::Short,
            log_level: LogLevel::Warn,
            force_backtrace: false,
        }
    }
}

impl FixtureConfig {
    /// Parse configuration JSON. Missing fields keep their defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(data).context("parsing fixture configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.separator_width == 0 {
            bail!("separator_width must be at least 1");
        }
        Ok(())
    }

    /// Load configuration from a JSON file
    ///
    /// Unlike the environment layer, an unreadable or malformed file is an
    /// error: the caller asked for it explicitly.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config =
            Self::from_json(&contents).with_context(|| format!("loading {}", path.display()))?;
        log::info!("[Config] Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(BACKTRACE_ENV) {
            match raw.parse() {
                Ok(mode) => self.backtrace = mode,
                Err(err) => log::warn!("[Config] Ignoring {}: {}", BACKTRACE_ENV, err),
            }
        }
        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            match raw.parse() {
                Ok(level) => self.log_level = level,
                Err(err) => log::warn!("[Config] Ignoring {}: {}", LOG_LEVEL_ENV, err),
            }
        }
    }

    pub fn separator(&self) -> String {
        "=".repeat(self.separator_width)
    }

    /// Export the backtrace mode for the panic hook.
    ///
    /// Must run before the first panic: the runtime caches the style once
    /// it has been read.
    pub fn export_backtrace(&self) {
        let already_set = std::env::var_os(RUST_BACKTRACE_ENV).is_some();
        if self.force_backtrace || !already_set {
            std::env::set_var(RUST_BACKTRACE_ENV, self.backtrace.env_value());
            tracing::debug!(
                mode = %self.backtrace,
                "exported {}={}",
                RUST_BACKTRACE_ENV,
                self.backtrace.env_value()
            );
        }
    }
}

/// Backtrace detail printed by the default panic hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktraceMode {
    Off,
    #[default]
    Short,
    Full,
}

impl BacktraceMode {
    /// Value understood by `RUST_BACKTRACE`.
    pub fn env_value(self) -> &'static str {
        match self {
            BacktraceMode::Off => "0",
            BacktraceMode::Short => "1",
            BacktraceMode::Full => "full",
        }
    }
}

impl fmt::Display for BacktraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BacktraceMode::Off => "off",
            BacktraceMode::Short => "short",
            BacktraceMode::Full => "full",
        })
    }
}

impl FromStr for BacktraceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Ok(BacktraceMode::Off),
            "short" | "1" => Ok(BacktraceMode::Short),
            "full" => Ok(BacktraceMode::Full),
            other => Err(format!("unknown backtrace mode '{other}'")),
        }
    }
}

/// Log verbosity for the stderr subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

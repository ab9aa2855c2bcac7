use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stacktrace_fixture::config::LOG_LEVEL_ENV;
use stacktrace_fixture::error::log_dispatch_error;
use stacktrace_fixture::{
    catalog, BacktraceMode, DispatchError, Dispatcher, FixtureConfig, LogLevel, ScenarioCatalog,
};

#[derive(Parser, Debug)]
#[command(
    name = "stacktrace_fixture",
    about = "Deterministic panic fixtures for stack-trace rendering tools"
)]
struct Cli {
    /// Scenario to run: value, type, index or attr (defaults to value)
    selector: Option<String>,
    /// List the scenario catalog instead of running a scenario
    #[arg(long)]
    list: bool,
    /// Print the catalog listing as JSON
    #[arg(long, requires = "list")]
    json: bool,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backtrace detail for the panic report (overrides RUST_BACKTRACE)
    #[arg(long, value_enum)]
    backtrace: Option<BacktraceArg>,
    /// Log level for diagnostics on stderr
    #[arg(long, value_enum)]
    log_level: Option<LogLevelArg>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum BacktraceArg {
    Off,
    Short,
    Full,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    // Logging comes first so configuration warnings are not lost.
    let logging = stacktrace_fixture::init_logging(bootstrap_log_level(&cli));
    let config = resolve_config(&cli)?;
    if let Some(handle) = &logging {
        handle.set_level(config.log_level);
    }
    tracing::debug!(?config, "configuration resolved");

    if cli.list {
        return run_list(catalog(), cli.json);
    }

    let dispatcher = Dispatcher::new(catalog(), &config);
    let mut stdout = io::stdout().lock();
    match dispatcher.run(cli.selector.as_deref(), &mut stdout) {
        Ok(never) => match never {},
        Err(err @ DispatchError::UnknownSelector { .. }) => {
            log_dispatch_error(&err, "stacktrace_fixture");
            Ok(ExitCode::from(1))
        }
        Err(err @ DispatchError::ScenarioReturned { .. }) => {
            log_dispatch_error(&err, "stacktrace_fixture");
            eprintln!("{err}");
            Ok(ExitCode::from(3))
        }
        Err(err) => Err(err).context("dispatching scenario"),
    }
}

/// Level used until the full configuration is resolved.
fn bootstrap_log_level(cli: &Cli) -> LogLevel {
    cli.log_level
        .map(log_level)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok()?.parse().ok())
        .unwrap_or_default()
}

fn resolve_config(cli: &Cli) -> Result<FixtureConfig> {
    let mut config = match &cli.config {
        Some(path) => FixtureConfig::load_from_file(path)?,
        None => FixtureConfig::default(),
    };
    config.apply_env();

    if let Some(mode) = cli.backtrace {
        config.backtrace = backtrace_mode(mode);
        config.force_backtrace = true;
    }
    if let Some(level) = cli.log_level {
        config.log_level = log_level(level);
    }
    Ok(config)
}

fn run_list(catalog: &ScenarioCatalog, json: bool) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    if json {
        let payload = serde_json::to_string_pretty(&catalog.summaries())
            .context("serializing scenario catalog")?;
        writeln!(stdout, "{payload}")?;
    } else {
        for scenario in catalog.iter() {
            writeln!(
                stdout,
                "{}\t{}\tdepth={}\t{}",
                scenario.token,
                scenario.kind,
                scenario.depth(),
                scenario.label
            )?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn backtrace_mode(arg: BacktraceArg) -> BacktraceMode {
    match arg {
        BacktraceArg::Off => BacktraceMode::Off,
        BacktraceArg::Short => BacktraceMode::Short,
        BacktraceArg::Full => BacktraceMode::Full,
    }
}

fn log_level(arg: LogLevelArg) -> LogLevel {
    match arg {
        LogLevelArg::Off => LogLevel::Off,
        LogLevelArg::Error => LogLevel::Error,
        LogLevelArg::Warn => LogLevel::Warn,
        LogLevelArg::Info => LogLevel::Info,
        LogLevelArg::Debug => LogLevel::Debug,
        LogLevelArg::Trace => LogLevel::Trace,
    }
}

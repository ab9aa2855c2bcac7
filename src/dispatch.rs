//! Dispatcher: banner, catalog lookup, scenario invocation.
//!
//! Per run: `START -> BANNER_PRINTED -> DISPATCHED_OK -> CRASHED` or
//! `START -> BANNER_PRINTED -> DISPATCHED_UNKNOWN -> CLEAN_EXIT`. The crash
//! leg never comes back to the caller; the panic unwinds straight through
//! [`Dispatcher::run`] to the default hook.

use std::convert::Infallible;
use std::io::Write;

use crate::catalog::{Scenario, ScenarioCatalog};
use crate::config::FixtureConfig;
use crate::error::DispatchError;

pub struct Dispatcher<'a> {
    catalog: &'a ScenarioCatalog,
    config: &'a FixtureConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(catalog: &'a ScenarioCatalog, config: &'a FixtureConfig) -> Self {
        Self { catalog, config }
    }

    /// Selector actually used for a run.
    pub fn resolve_token<'s>(&'s self, selector: Option<&'s str>) -> &'s str {
        selector.unwrap_or(&self.config.default_scenario)
    }

    /// Write the four banner lines and flush them.
    pub fn write_banner<W: Write>(&self, token: &str, out: &mut W) -> Result<(), DispatchError> {
        writeln!(out, "{}", self.config.title)?;
        writeln!(out, "{}", self.config.separator())?;
        writeln!(out, "Running test: {token}")?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub fn lookup(&self, token: &str) -> Result<&'a Scenario, DispatchError> {
        self.catalog
            .lookup(token)
            .ok_or_else(|| DispatchError::UnknownSelector {
                token: token.to_string(),
                available: self.catalog.tokens(),
            })
    }

    /// Write the two unknown-selector diagnostic lines.
    pub fn write_unknown<W: Write>(
        &self,
        token: &str,
        available: &[&str],
        out: &mut W,
    ) -> Result<(), DispatchError> {
        writeln!(out, "Unknown test type: {token}")?;
        writeln!(out, "Available types: {}", available.join(", "))?;
        out.flush()?;
        Ok(())
    }

    /// Run one scenario.
    ///
    /// A known selector panics inside the scenario and this never returns.
    /// An unknown selector writes its diagnostics and returns
    /// [`DispatchError::UnknownSelector`].
    pub fn run<W: Write>(
        &self,
        selector: Option<&str>,
        out: &mut W,
    ) -> Result<Infallible, DispatchError> {
        let token = self.resolve_token(selector);
        self.write_banner(token, out)?;

        let scenario = match self.lookup(token) {
            Ok(scenario) => scenario,
            Err(err) => {
                if let DispatchError::UnknownSelector { available, .. } = &err {
                    self.write_unknown(token, available, out)?;
                }
                return Err(err);
            }
        };

        self.config.export_backtrace();
        tracing::debug!(
            token = scenario.token,
            kind = %scenario.kind,
            depth = scenario.depth(),
            "dispatching scenario"
        );
        scenario.trigger();

        Err(DispatchError::ScenarioReturned {
            token: scenario.token,
        })
    }
}

//! Scenario catalog: the static token -> failure path mapping.
//!
//! The catalog is data. Adding a scenario means adding an entry to
//! [`BUILTIN_SCENARIOS`]; the dispatcher never branches on tokens itself, so
//! an unknown selector is just a lookup miss.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{log_catalog_error, CatalogError};
use crate::failure_paths::{
    missing_capability, out_of_range, type_mismatch, value_domain, FailureKind,
};

/// Built-in scenarios, in listing order.
pub const BUILTIN_SCENARIOS: [Scenario; 4] = [
    Scenario {
        token: "value",
        label: "value-domain error raised three frames deep",
        kind: FailureKind::ValueDomain,
        frames: value_domain::FRAMES,
        entry: value_domain::outer,
    },
    Scenario {
        token: "type",
        label: "key subscript on a JSON null",
        kind: FailureKind::TypeMismatch,
        frames: type_mismatch::FRAMES,
        entry: type_mismatch::subscript_null,
    },
    Scenario {
        token: "index",
        label: "index 10 of a three element vector",
        kind: FailureKind::OutOfRange,
        frames: out_of_range::FRAMES,
        entry: out_of_range::index_past_end,
    },
    Scenario {
        token: "attr",
        label: "method call through an empty reference",
        kind: FailureKind::MissingCapability,
        frames: missing_capability::FRAMES,
        entry: missing_capability::call_on_empty,
    },
];

/// Global catalog shared across the crate.
static CATALOG: Lazy<ScenarioCatalog> = Lazy::new(ScenarioCatalog::builtin);

/// Access the built-in scenario catalog.
pub fn catalog() -> &'static ScenarioCatalog {
    &CATALOG
}

/// One named failure scenario.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub token: &'static str,
    pub label: &'static str,
    pub kind: FailureKind,
    /// Fixture chain function names, outermost first.
    pub frames: &'static [&'static str],
    pub entry: fn(),
}

impl Scenario {
    /// Number of fixture frames beneath the dispatch point.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Run the entry point. Returns only if the fixture is broken.
    pub fn trigger(&self) {
        (self.entry)()
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            token: self.token,
            label: self.label,
            kind: self.kind,
            depth: self.depth(),
            signature: self.kind.signature(),
        }
    }
}

/// Serializable view of a scenario for listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScenarioSummary {
    pub token: &'static str,
    pub label: &'static str,
    pub kind: FailureKind,
    pub depth: usize,
    pub signature: &'static str,
}

/// Ordered scenarios plus a token index.
#[derive(Debug)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    index: HashMap<&'static str, usize>,
}

impl ScenarioCatalog {
    /// Build a catalog, rejecting empty input and duplicate tokens.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(scenarios.len());
        for (position, scenario) in scenarios.iter().enumerate() {
            if index.insert(scenario.token, position).is_some() {
                return Err(CatalogError::DuplicateToken {
                    token: scenario.token,
                });
            }
        }

        Ok(Self { scenarios, index })
    }

    pub fn builtin() -> Self {
        match Self::new(BUILTIN_SCENARIOS.to_vec()) {
            Ok(catalog) => catalog,
            Err(err) => {
                log_catalog_error(&err, "ScenarioCatalog::builtin");
                panic!("built-in scenario table is invalid: {err}");
            }
        }
    }

    /// Return the scenario registered under `token`, if any.
    pub fn lookup(&self, token: &str) -> Option<&Scenario> {
        self.index
            .get(token)
            .map(|&position| &self.scenarios[position])
    }

    pub fn tokens(&self) -> Vec<&'static str> {
        self.scenarios.iter().map(|scenario| scenario.token).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn summaries(&self) -> Vec<ScenarioSummary> {
        self.scenarios.iter().map(Scenario::summary).collect()
    }
}

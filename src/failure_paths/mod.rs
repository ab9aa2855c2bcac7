//! Failure paths: the call chains that end in a deliberate panic.
//!
//! Every public entry point here panics unconditionally and never catches
//! anything. Functions are `#[inline(never)]` and keep their calls out of
//! tail position so each one owns a frame in the backtrace.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod missing_capability;
pub mod out_of_range;
pub mod type_mismatch;
pub mod value_domain;

/// Category of failure a scenario produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Operation invalid for the given value.
    ValueDomain,
    /// Operation invalid for the given type.
    TypeMismatch,
    /// Access past the end of a sequence.
    OutOfRange,
    /// Method invoked through a reference that holds nothing.
    MissingCapability,
}

impl FailureKind {
    pub const ALL: [FailureKind; 4] = [
        FailureKind::ValueDomain,
        FailureKind::TypeMismatch,
        FailureKind::OutOfRange,
        FailureKind::MissingCapability,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::ValueDomain => "value_domain",
            FailureKind::TypeMismatch => "type_mismatch",
            FailureKind::OutOfRange => "out_of_range",
            FailureKind::MissingCapability => "missing_capability",
        }
    }

    /// Message fragment that identifies this kind inside a panic report.
    pub fn signature(self) -> &'static str {
        match self {
            FailureKind::ValueDomain => value_domain::INNER_ERROR_MESSAGE,
            FailureKind::TypeMismatch => type_mismatch::SIGNATURE,
            FailureKind::OutOfRange => out_of_range::SIGNATURE,
            FailureKind::MissingCapability => missing_capability::SIGNATURE,
        }
    }

    /// Classify a captured panic report by the first signature it contains.
    pub fn classify(report: &str) -> Option<FailureKind> {
        Self::ALL
            .into_iter()
            .find(|kind| report.contains(kind.signature()))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

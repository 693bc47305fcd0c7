//! Build errors for transition and table builders.

use crate::table::TableViolation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors that can occur when building transitions and tables.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition '{from}' -> '{to}' has no handler. Call .handler(f), or target EXIT for a terminal arc")]
    MissingHandler { from: String, to: String },

    #[error("Terminal arc '{from}' -> EXIT cannot carry a handler")]
    HandlerOnExitArc { from: String },

    #[error("Transition table is invalid: {}", summarize(.0))]
    InvalidTable(NonEmptyVec<TableViolation>),
}

fn summarize(violations: &NonEmptyVec<TableViolation>) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

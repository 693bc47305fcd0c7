//! Engine errors.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while creating or running a machine.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("Could not allocate {requested} bytes for machine name")]
    AllocationFailure {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("{machine}: no transition defined from '{from}' to '{to}'")]
    NoTransition {
        machine: String,
        from: String,
        to: String,
    },

    #[error("{machine}: handler for '{from}' -> '{to}' reported a fault")]
    HandlerFault {
        machine: String,
        from: String,
        to: String,
    },
}

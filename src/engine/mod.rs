//! The execution engine.
//!
//! This module is the imperative shell around the pure `core` and `table`
//! types: it owns machine metadata, drives the run loop, and fires the
//! lifecycle hooks.
//!
//! # Key Concepts
//!
//! - **Metadata**: name, position and hooks of one machine instance
//! - **Step**: one iteration of the loop from an explicit `Cursor`
//! - **Run**: steps until EXIT, a missing transition, or a handler fault

mod error;
mod hooks;
mod metadata;
mod run;

pub use error::FsmError;
pub use hooks::{BadTransitionHook, DidChangeHook, Hooks, WillChangeHook};
pub use metadata::{MachineMetadata, VerboseSink};
pub use run::{run, step, Cursor, RunReport, RunStatus, StepResult};

//! Tabular FSM: a table-driven finite state machine engine
//!
//! The caller supplies a transition table binding `(from, to)` pairs to
//! handlers; the engine looks up the handler for the current pair, invokes
//! it to compute the next state, and repeats until the machine reaches
//! `EXIT`. Tables are validated lazily, one arc at a time, so cycles,
//! unreachable states and run-time branching are all legal.
//!
//! # Core Concepts
//!
//! - **State**: caller enumeration wrapped in `StateId` with synthetic `Init` / `Exit`
//! - **Transition table**: ordered records, first exact match wins
//! - **Metadata**: machine name, resumable position, lifecycle hooks
//! - **Run**: the loop, reporting the final pair and a status
//!
//! # Example
//!
//! ```rust
//! use tabular_fsm::{state_enum, MachineMetadata, RunStatus, StateId, TransitionTable};
//!
//! state_enum! {
//!     enum Word {
//!         Process,
//!         Upper,
//!         Lower,
//!     }
//! }
//!
//! let table = TransitionTable::builder()
//!     .on(StateId::Init, Word::Process, |input: &mut String| {
//!         if input.starts_with(char::is_uppercase) {
//!             StateId::User(Word::Upper)
//!         } else {
//!             StateId::User(Word::Lower)
//!         }
//!     })
//!     .on(Word::Process, Word::Upper, |input: &mut String| {
//!         *input = input.to_uppercase();
//!         StateId::Exit
//!     })
//!     .on(Word::Process, Word::Lower, |input: &mut String| {
//!         *input = input.to_lowercase();
//!         StateId::Exit
//!     })
//!     .terminal(Word::Upper)
//!     .terminal(Word::Lower)
//!     .build()
//!     .unwrap();
//!
//! let mut machine = MachineMetadata::create("word", None).unwrap();
//! let mut input = "Hello".to_string();
//! let report = machine.run(&table, &mut input);
//!
//! assert_eq!(report.status, RunStatus::Success);
//! assert_eq!(report.to, StateId::User(Word::Upper));
//! assert_eq!(input, "HELLO");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod table;

// Re-export commonly used types
pub use crate::config::{FsmConfig, ReportPolicy};
pub use crate::core::{State, StateId};
pub use crate::engine::{Cursor, FsmError, MachineMetadata, RunReport, RunStatus, StepResult};
pub use crate::table::{Handler, Outcome, TransitionRecord, TransitionTable};

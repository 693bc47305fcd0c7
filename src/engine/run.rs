//! The run loop.
//!
//! `step` executes exactly one iteration from an explicit [`Cursor`]:
//! trace, `will_change`, lookup, commit, handler, `did_change`. `run` loops
//! over `step` starting from the position stored in the metadata.
//!
//! Metadata is written at two commit points only:
//! 1. before a handler runs, the metadata becomes `(from, to)`;
//! 2. when a handler returns EXIT, the metadata becomes `(to, EXIT)`.
//!
//! Nothing is committed when a lookup fails.

use super::error::FsmError;
use super::metadata::MachineMetadata;
use crate::config::ReportPolicy;
use crate::core::{State, StateId};
use crate::table::{Outcome, TransitionTable};
use stillwater::validation::Validation;
use uuid::Uuid;

/// A `(from, to)` position in the machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor<S> {
    pub from: StateId<S>,
    pub to: StateId<S>,
}

impl<S> Cursor<S> {
    pub fn new(from: StateId<S>, to: StateId<S>) -> Self {
        Self { from, to }
    }
}

/// Result of executing a single step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<S> {
    /// The handler ran; continue from the returned cursor.
    Advanced(Cursor<S>),

    /// The machine reached EXIT.
    ///
    /// `last` is the transition whose handler returned EXIT and `exit` the
    /// arc into EXIT. When the step landed on a terminal record no handler
    /// ran and both are that record's pair.
    Exited {
        last: Cursor<S>,
        exit: Cursor<S>,
        invoked: bool,
    },

    /// The handler for `at` reported a fault, asking for `next`.
    Faulted { at: Cursor<S>, next: StateId<S> },

    /// No record exists for the pair.
    Unresolved(Cursor<S>),
}

/// How a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Reached EXIT.
    Success,
    /// The table has no record for the reported pair.
    NoTransitionFound,
    /// The handler for the reported pair signalled a fault.
    HandlerFault,
}

/// Outcome of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport<S> {
    pub run_id: Uuid,
    pub machine: String,
    pub from: StateId<S>,
    pub to: StateId<S>,
    pub status: RunStatus,
    /// State requested by a faulting handler.
    pub next: Option<StateId<S>>,
    /// Number of handlers invoked.
    pub steps: usize,
}

impl<S: State> RunReport<S> {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Turn a failed run into an error.
    pub fn into_result(self) -> Result<Self, FsmError> {
        match self.status {
            RunStatus::Success => Ok(self),
            RunStatus::NoTransitionFound => Err(FsmError::NoTransition {
                machine: self.machine,
                from: self.from.to_string(),
                to: self.to.to_string(),
            }),
            RunStatus::HandlerFault => Err(FsmError::HandlerFault {
                machine: self.machine,
                from: self.from.to_string(),
                to: self.to.to_string(),
            }),
        }
    }
}

/// Execute one iteration of the run loop from `cursor`.
pub fn step<S: State, C>(
    meta: &mut MachineMetadata<S>,
    cursor: Cursor<S>,
    table: &TransitionTable<S, C>,
    ctx: &mut C,
) -> StepResult<S> {
    meta.trace_move(&cursor.from, &cursor.to);
    meta.notify_will_change(&cursor.from, &cursor.to);

    let Some(record) = table.find(&cursor.from, &cursor.to) else {
        tracing::warn!(
            machine = %meta.name(),
            from = %cursor.from,
            to = %cursor.to,
            "no transition defined"
        );
        meta.notify_bad_transition(&cursor.from, &cursor.to);
        return StepResult::Unresolved(cursor);
    };

    let Some(handler) = record.handler() else {
        meta.commit(cursor.from.clone(), cursor.to.clone());
        return StepResult::Exited {
            last: cursor.clone(),
            exit: cursor,
            invoked: false,
        };
    };

    meta.commit(cursor.from.clone(), cursor.to.clone());
    let outcome = handler(ctx);
    meta.notify_did_change(&cursor.from, &cursor.to, outcome.state());

    match outcome {
        Outcome::Fault(next) => {
            tracing::debug!(
                machine = %meta.name(),
                from = %cursor.from,
                to = %cursor.to,
                %next,
                "handler reported a fault"
            );
            StepResult::Faulted { at: cursor, next }
        }
        Outcome::Next(StateId::Exit) => {
            let exit = Cursor::new(cursor.to.clone(), StateId::Exit);
            meta.commit(exit.from.clone(), StateId::Exit);
            StepResult::Exited {
                last: cursor,
                exit,
                invoked: true,
            }
        }
        Outcome::Next(next) => StepResult::Advanced(Cursor::new(cursor.to, next)),
    }
}

/// Drive `meta` through `table` until it reaches EXIT or stops on an error.
///
/// The run starts from whatever pair the metadata holds, so a finished
/// machine sits at `(EXIT-predecessor, EXIT)` and a second run ends on the
/// terminal record without invoking any handler.
pub fn run<S: State, C>(
    meta: &mut MachineMetadata<S>,
    table: &TransitionTable<S, C>,
    ctx: &mut C,
) -> RunReport<S> {
    let run_id = Uuid::new_v4();
    let span = tracing::debug_span!("fsm_run", machine = %meta.name(), %run_id);
    let _enter = span.enter();

    if meta.config().check_tables {
        if let Validation::Failure(violations) = table.validate() {
            for violation in violations.iter() {
                tracing::warn!(machine = %meta.name(), %violation, "transition table violation");
            }
        }
    }

    let mut cursor = meta.cursor();
    let mut steps = 0;

    let (pair, status, next) = loop {
        match step(meta, cursor, table, ctx) {
            StepResult::Advanced(next) => {
                steps += 1;
                cursor = next;
            }
            StepResult::Exited {
                last,
                exit,
                invoked,
            } => {
                if invoked {
                    steps += 1;
                }
                let pair = match meta.config().report {
                    ReportPolicy::LastTransition => last,
                    ReportPolicy::ExitArc => exit,
                };
                break (pair, RunStatus::Success, None);
            }
            StepResult::Faulted { at, next } => {
                steps += 1;
                break (at, RunStatus::HandlerFault, Some(next));
            }
            StepResult::Unresolved(at) => break (at, RunStatus::NoTransitionFound, None),
        }
    };

    tracing::debug!(
        machine = %meta.name(),
        from = %pair.from,
        to = %pair.to,
        ?status,
        steps,
        "run finished"
    );

    RunReport {
        run_id,
        machine: meta.name().to_string(),
        from: pair.from,
        to: pair.to,
        status,
        next,
        steps,
    }
}

//! Committed-transition history.
//!
//! When enabled through `FsmConfig::history_capacity`, a machine records
//! every `(from, to)` pair it commits. The history is bounded: once full,
//! the oldest records are dropped so a cycling machine cannot grow it
//! without limit.

use super::state::{State, StateId};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq)]
pub struct StateTransition<S> {
    /// The state being transitioned from
    pub from: StateId<S>,
    /// The state being transitioned to
    pub to: StateId<S>,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of committed transitions.
///
/// # Example
///
/// ```rust
/// use tabular_fsm::core::{State, StateHistory, StateId, StateTransition};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Step { A, B }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///         }
///     }
///
///     fn user_start() -> Self {
///         Self::A
///     }
/// }
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: StateId::Init,
///     to: StateId::User(Step::A),
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: StateId::User(Step::A),
///     to: StateId::User(Step::B),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // INIT -> A -> B
/// ```
#[derive(Clone, Debug)]
pub struct StateHistory<S> {
    transitions: VecDeque<StateTransition<S>>,
    capacity: usize,
}

impl<S: State> StateHistory<S> {
    /// Create an empty history holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Append a transition, dropping the oldest record if the history is full.
    /// A zero-capacity history records nothing.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition.
    pub fn get_path(&self) -> Vec<&StateId<S>> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<StateTransition<S>> {
        &self.transitions
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

//! Transition tables.
//!
//! A table is an ordered sequence of [`TransitionRecord`]s binding a
//! `(from, to)` pair to the handler that runs when the machine takes that
//! arc. Lookup is exact equality on both states, in table order; the first
//! matching record wins.
//!
//! Tables are read-only once built and hold their handlers behind `Arc`, so
//! a single table can be shared by any number of machines, including across
//! threads.

mod validate;

pub use validate::TableViolation;

use crate::core::{State, StateId};
use std::fmt;
use std::sync::Arc;

/// What a handler asks the engine to do next.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<S> {
    /// Move on to the given state.
    Next(StateId<S>),

    /// The handler hit a fatal condition. The state is the one it would have
    /// moved to; the details stay in the caller's context.
    Fault(StateId<S>),
}

impl<S> Outcome<S> {
    /// The state the handler asked for, fault or not.
    pub fn state(&self) -> &StateId<S> {
        match self {
            Self::Next(state) | Self::Fault(state) => state,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}

impl<S> From<StateId<S>> for Outcome<S> {
    fn from(state: StateId<S>) -> Self {
        Self::Next(state)
    }
}

/// Function computing the next state from the caller's context.
pub type Handler<S, C> = Arc<dyn Fn(&mut C) -> Outcome<S> + Send + Sync>;

/// Wrap a closure returning anything convertible to an [`Outcome`].
pub fn handler<S, C, F, O>(f: F) -> Handler<S, C>
where
    F: Fn(&mut C) -> O + Send + Sync + 'static,
    O: Into<Outcome<S>>,
{
    Arc::new(move |ctx: &mut C| f(ctx).into())
}

/// One arc of the machine's control-flow graph.
pub struct TransitionRecord<S, C> {
    from: StateId<S>,
    to: StateId<S>,
    handler: Option<Handler<S, C>>,
}

impl<S: State, C> TransitionRecord<S, C> {
    /// A record whose handler runs when the machine moves `from -> to`.
    pub fn new<F, O>(from: impl Into<StateId<S>>, to: impl Into<StateId<S>>, f: F) -> Self
    where
        F: Fn(&mut C) -> O + Send + Sync + 'static,
        O: Into<Outcome<S>>,
    {
        Self::with_handler(from.into(), to.into(), handler(f))
    }

    pub fn with_handler(from: StateId<S>, to: StateId<S>, handler: Handler<S, C>) -> Self {
        Self {
            from,
            to,
            handler: Some(handler),
        }
    }

    /// The handler-less arc `from -> EXIT` that ends a run.
    pub fn terminal(from: impl Into<StateId<S>>) -> Self {
        Self {
            from: from.into(),
            to: StateId::Exit,
            handler: None,
        }
    }

    pub fn from(&self) -> &StateId<S> {
        &self.from
    }

    pub fn to(&self) -> &StateId<S> {
        &self.to
    }

    pub fn handler(&self) -> Option<&Handler<S, C>> {
        self.handler.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.handler.is_none()
    }

    /// Exact match on both ends of the arc (pure).
    pub fn matches(&self, from: &StateId<S>, to: &StateId<S>) -> bool {
        self.from == *from && self.to == *to
    }
}

impl<S: Clone, C> Clone for TransitionRecord<S, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<S: fmt::Debug, C> fmt::Debug for TransitionRecord<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRecord")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("handler", &self.handler.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Ordered sequence of transition records.
pub struct TransitionTable<S, C> {
    records: Vec<TransitionRecord<S, C>>,
}

impl<S: State, C> TransitionTable<S, C> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Start a validated table; see [`crate::builder::TableBuilder`].
    pub fn builder() -> crate::builder::TableBuilder<S, C> {
        crate::builder::TableBuilder::new()
    }

    /// Append a record without validation.
    pub fn push(&mut self, record: TransitionRecord<S, C>) {
        self.records.push(record);
    }

    /// First record matching `(from, to)` exactly, in table order.
    pub fn find(&self, from: &StateId<S>, to: &StateId<S>) -> Option<&TransitionRecord<S, C>> {
        self.records.iter().find(|record| record.matches(from, to))
    }

    /// Handler bound to `(from, to)`.
    ///
    /// Returns `None` when no record matches and also for the terminal
    /// `(x, EXIT)` arc, which has no handler.
    pub fn resolve(&self, from: &StateId<S>, to: &StateId<S>) -> Option<&Handler<S, C>> {
        self.find(from, to).and_then(TransitionRecord::handler)
    }

    pub fn records(&self) -> &[TransitionRecord<S, C>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<S: State, C> Default for TransitionTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, C> Clone for TransitionTable<S, C> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<S: fmt::Debug, C> fmt::Debug for TransitionTable<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.records).finish()
    }
}

impl<S: State, C> From<Vec<TransitionRecord<S, C>>> for TransitionTable<S, C> {
    fn from(records: Vec<TransitionRecord<S, C>>) -> Self {
        Self { records }
    }
}

impl<S: State, C> FromIterator<TransitionRecord<S, C>> for TransitionTable<S, C> {
    fn from_iter<I: IntoIterator<Item = TransitionRecord<S, C>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

//! Builder for constructing validated transition tables.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, StateId};
use crate::table::{Outcome, TransitionRecord, TransitionTable};
use stillwater::validation::Validation;

/// Builder for constructing transition tables with a fluent API.
///
/// Unlike pushing records onto a [`TransitionTable`] directly, `build`
/// rejects tables that fail [`TransitionTable::validate`].
pub struct TableBuilder<S: State, C> {
    records: Vec<TransitionRecord<S, C>>,
}

impl<S: State, C> TableBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Bind `f` to the arc `from -> to`.
    pub fn on<F, O>(mut self, from: impl Into<StateId<S>>, to: impl Into<StateId<S>>, f: F) -> Self
    where
        F: Fn(&mut C) -> O + Send + Sync + 'static,
        O: Into<Outcome<S>>,
    {
        self.records.push(TransitionRecord::new(from, to, f));
        self
    }

    /// Add the handler-less arc `from -> EXIT`.
    pub fn terminal(mut self, from: impl Into<StateId<S>>) -> Self {
        self.records.push(TransitionRecord::terminal(from));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, C>) -> Result<Self, BuildError> {
        let record = builder.build()?;
        self.records.push(record);
        Ok(self)
    }

    /// Add a pre-built record.
    pub fn add_record(mut self, record: TransitionRecord<S, C>) -> Self {
        self.records.push(record);
        self
    }

    /// Add multiple records at once.
    pub fn records(mut self, records: Vec<TransitionRecord<S, C>>) -> Self {
        self.records.extend(records);
        self
    }

    /// Build the table.
    /// Returns an error if it is empty or structurally invalid.
    pub fn build(self) -> Result<TransitionTable<S, C>, BuildError> {
        if self.records.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let table = TransitionTable::from(self.records);
        match table.validate() {
            Validation::Success(()) => Ok(table),
            Validation::Failure(violations) => Err(BuildError::InvalidTable(violations)),
        }
    }
}

impl<S: State, C> Default for TableBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

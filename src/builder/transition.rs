//! Builder for constructing transition records.

use crate::builder::error::BuildError;
use crate::core::{State, StateId};
use crate::table::{handler, Handler, Outcome, TransitionRecord};

/// Builder for constructing transition records with a fluent API.
///
/// A record targeting EXIT is built as the handler-less terminal arc; every
/// other record needs a handler.
pub struct TransitionBuilder<S: State, C> {
    from: Option<StateId<S>>,
    to: Option<StateId<S>>,
    handler: Option<Handler<S, C>>,
}

impl<S: State, C> TransitionBuilder<S, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            handler: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<StateId<S>>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId<S>>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the handler (required unless the target is EXIT).
    pub fn handler<F, O>(mut self, f: F) -> Self
    where
        F: Fn(&mut C) -> O + Send + Sync + 'static,
        O: Into<Outcome<S>>,
    {
        self.handler = Some(handler(f));
        self
    }

    /// Set a handler that always moves to `next`.
    pub fn advances_to(self, next: impl Into<StateId<S>>) -> Self {
        let next = next.into();
        self.handler(move |_: &mut C| next.clone())
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionRecord<S, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        match (to, self.handler) {
            (StateId::Exit, None) => Ok(TransitionRecord::terminal(from)),
            (StateId::Exit, Some(_)) => Err(BuildError::HandlerOnExitArc {
                from: from.to_string(),
            }),
            (to, None) => Err(BuildError::MissingHandler {
                from: from.to_string(),
                to: to.to_string(),
            }),
            (to, Some(handler)) => Ok(TransitionRecord::with_handler(from, to, handler)),
        }
    }
}

impl<S: State, C> Default for TransitionBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

//! Machine metadata: identity, position and observers of one machine.

use super::error::FsmError;
use super::hooks::Hooks;
use super::run::{self, Cursor, RunReport, StepResult};
use crate::config::FsmConfig;
use crate::core::{State, StateHistory, StateId, StateTransition};
use crate::table::TransitionTable;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Write;

/// Output stream receiving one trace line per transition.
pub type VerboseSink = Box<dyn Write + Send>;

/// Identity and position of a single machine instance.
///
/// The metadata remembers where the machine is between runs, so a run
/// always resumes from the last committed `(from, to)` pair. It is owned
/// exclusively by the caller and must not be driven by two runs at once.
pub struct MachineMetadata<S> {
    name: String,
    verbose: Option<VerboseSink>,
    from_state: StateId<S>,
    current_state: StateId<S>,
    hooks: Hooks<S>,
    config: FsmConfig,
    history: StateHistory<S>,
    created_at: DateTime<Utc>,
}

impl<S: State> MachineMetadata<S> {
    /// Create metadata positioned at `INIT -> S::user_start()`.
    pub fn create(name: &str, verbose: Option<VerboseSink>) -> Result<Self, FsmError> {
        Self::with_config(name, verbose, FsmConfig::default())
    }

    pub fn with_config(
        name: &str,
        verbose: Option<VerboseSink>,
        config: FsmConfig,
    ) -> Result<Self, FsmError> {
        let name = owned_copy(name, name.len())?;
        let (from_state, current_state) = StateId::start_pair();

        tracing::debug!(machine = %name, "created machine metadata");

        Ok(Self {
            name,
            verbose,
            from_state,
            current_state,
            hooks: Hooks::default(),
            history: StateHistory::with_capacity(config.history_capacity),
            config,
            created_at: Utc::now(),
        })
    }

    /// Release the metadata. Consuming `self` makes any later use of the
    /// handle a compile error.
    pub fn destroy(mut self) {
        tracing::debug!(machine = %self.name, "destroying machine metadata");

        if self.config.zero_on_destroy {
            drop(scrub(std::mem::take(&mut self.name)));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from_state(&self) -> &StateId<S> {
        &self.from_state
    }

    pub fn current_state(&self) -> &StateId<S> {
        &self.current_state
    }

    /// The pair the next run starts from.
    pub fn cursor(&self) -> Cursor<S> {
        Cursor::new(self.from_state.clone(), self.current_state.clone())
    }

    /// Reposition the machine; the next run starts at `(from, to)`.
    pub fn set_position(&mut self, from: impl Into<StateId<S>>, to: impl Into<StateId<S>>) {
        self.from_state = from.into();
        self.current_state = to.into();
    }

    /// Return to `INIT -> S::user_start()` and forget the history.
    pub fn reset(&mut self) {
        let (from, to) = StateId::start_pair();
        self.from_state = from;
        self.current_state = to;
        self.history.clear();
    }

    pub fn config(&self) -> &FsmConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn hooks(&self) -> &Hooks<S> {
        &self.hooks
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.is_some()
    }

    pub fn set_will_change<F>(&mut self, hook: F)
    where
        F: Fn(&MachineMetadata<S>, &StateId<S>, &StateId<S>) + Send + Sync + 'static,
    {
        self.hooks.will_change = Some(Box::new(hook));
    }

    pub fn set_did_change<F>(&mut self, hook: F)
    where
        F: Fn(&MachineMetadata<S>, &StateId<S>, &StateId<S>, &StateId<S>) + Send + Sync + 'static,
    {
        self.hooks.did_change = Some(Box::new(hook));
    }

    pub fn set_bad_transition<F>(&mut self, hook: F)
    where
        F: Fn(&MachineMetadata<S>, &StateId<S>, &StateId<S>) + Send + Sync + 'static,
    {
        self.hooks.bad_transition = Some(Box::new(hook));
    }

    /// Drive the machine until it reaches EXIT or stops on an error.
    pub fn run<C>(&mut self, table: &TransitionTable<S, C>, ctx: &mut C) -> RunReport<S> {
        run::run(self, table, ctx)
    }

    /// Execute a single iteration of the run loop from `cursor`.
    pub fn step<C>(
        &mut self,
        cursor: Cursor<S>,
        table: &TransitionTable<S, C>,
        ctx: &mut C,
    ) -> StepResult<S> {
        run::step(self, cursor, table, ctx)
    }

    pub(crate) fn commit(&mut self, from: StateId<S>, to: StateId<S>) {
        if self.history.capacity() > 0 {
            self.history.record(StateTransition {
                from: from.clone(),
                to: to.clone(),
                timestamp: Utc::now(),
            });
        }
        self.from_state = from;
        self.current_state = to;
    }

    pub(crate) fn trace_move(&mut self, from: &StateId<S>, to: &StateId<S>) {
        tracing::trace!(machine = %self.name, %from, %to, "moving between states");

        if let Some(sink) = self.verbose.as_mut() {
            if let Err(error) = writeln!(
                sink,
                "{} - moving from state: {} to state: {}",
                self.name, from, to
            ) {
                tracing::warn!(machine = %self.name, %error, "verbose sink write failed");
            }
        }
    }

    pub(crate) fn notify_will_change(&self, from: &StateId<S>, to: &StateId<S>) {
        if let Some(hook) = &self.hooks.will_change {
            hook(self, from, to);
        }
    }

    pub(crate) fn notify_did_change(&self, from: &StateId<S>, to: &StateId<S>, next: &StateId<S>) {
        if let Some(hook) = &self.hooks.did_change {
            hook(self, from, to, next);
        }
    }

    pub(crate) fn notify_bad_transition(&self, from: &StateId<S>, to: &StateId<S>) {
        if let Some(hook) = &self.hooks.bad_transition {
            hook(self, from, to);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for MachineMetadata<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineMetadata")
            .field("name", &self.name)
            .field("verbose", &self.verbose.is_some())
            .field("from_state", &self.from_state)
            .field("current_state", &self.current_state)
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Overwrite the bytes of `name` with zeros and hand back the buffer.
///
/// The buffer goes through `black_box` so the stores are not elided as dead
/// before the allocation is freed.
fn scrub(name: String) -> Vec<u8> {
    let mut bytes = name.into_bytes();
    bytes.fill(0);
    std::hint::black_box(&mut bytes);
    bytes
}

/// Copy `name` into freshly reserved storage of `capacity` bytes.
fn owned_copy(name: &str, capacity: usize) -> Result<String, FsmError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(capacity)
        .map_err(|source| FsmError::AllocationFailure {
            requested: capacity,
            source,
        })?;
    owned.push_str(name);
    Ok(owned)
}

//! Lifecycle notification hooks.
//!
//! Hooks observe the run loop without influencing it. Each receives the
//! machine metadata so it can read the machine's name and position.

use super::metadata::MachineMetadata;
use crate::core::StateId;

/// Fired before the handler for `(from, to)` is looked up.
pub type WillChangeHook<S> =
    Box<dyn Fn(&MachineMetadata<S>, &StateId<S>, &StateId<S>) + Send + Sync>;

/// Fired after the handler for `(from, to)` returned `next`.
pub type DidChangeHook<S> =
    Box<dyn Fn(&MachineMetadata<S>, &StateId<S>, &StateId<S>, &StateId<S>) + Send + Sync>;

/// Fired when no record exists for `(from, to)`.
pub type BadTransitionHook<S> =
    Box<dyn Fn(&MachineMetadata<S>, &StateId<S>, &StateId<S>) + Send + Sync>;

/// The optional hooks installed on a machine. Setting one replaces it.
pub struct Hooks<S> {
    pub(crate) will_change: Option<WillChangeHook<S>>,
    pub(crate) did_change: Option<DidChangeHook<S>>,
    pub(crate) bad_transition: Option<BadTransitionHook<S>>,
}

impl<S> Hooks<S> {
    pub fn has_will_change(&self) -> bool {
        self.will_change.is_some()
    }

    pub fn has_did_change(&self) -> bool {
        self.did_change.is_some()
    }

    pub fn has_bad_transition(&self) -> bool {
        self.bad_transition.is_some()
    }
}

impl<S> Default for Hooks<S> {
    fn default() -> Self {
        Self {
            will_change: None,
            did_change: None,
            bad_transition: None,
        }
    }
}

impl<S> std::fmt::Debug for Hooks<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("will_change", &self.has_will_change())
            .field("did_change", &self.has_did_change())
            .field("bad_transition", &self.has_bad_transition())
            .finish()
    }
}

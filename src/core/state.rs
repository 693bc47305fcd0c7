//! State identity for table-driven machines.
//!
//! Callers describe their business states with an ordinary enum implementing
//! [`State`]. The engine wraps those in [`StateId`], which adds the two
//! synthetic states every machine has: `Init` (where a run starts) and
//! `Exit` (where a run ends).

use std::fmt::{self, Debug, Display};

/// Trait for caller-defined machine states.
///
/// All methods are pure. A `State` never needs to know about the synthetic
/// `Init` / `Exit` states; those live in [`StateId`] and cannot collide with
/// caller values.
///
/// # Example
///
/// ```rust
/// use tabular_fsm::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Light {
///     Red,
///     Green,
///     Yellow,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///             Self::Yellow => "Yellow",
///         }
///     }
///
///     fn user_start() -> Self {
///         Self::Red
///     }
/// }
///
/// assert_eq!(Light::user_start(), Light::Red);
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// The first state a freshly created machine moves to out of `Init`.
    fn user_start() -> Self;
}

/// A state as the engine sees it.
///
/// `Init` is never the target of a transition and `Exit` is never the
/// source of one; everything else is the caller's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateId<S> {
    /// Synthetic start state.
    Init,
    /// Synthetic terminal state. Reaching it ends a run.
    Exit,
    /// A caller-defined state.
    User(S),
}

impl<S: State> StateId<S> {
    /// The position of a machine that has never run: `Init` moving to
    /// the caller's first state.
    pub fn start_pair() -> (Self, Self) {
        (Self::Init, Self::User(S::user_start()))
    }

    pub fn is_init(&self) -> bool {
        matches!(self, Self::Init)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// The caller state, if this is one.
    pub fn user(&self) -> Option<&S> {
        match self {
            Self::User(state) => Some(state),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Init => "INIT",
            Self::Exit => "EXIT",
            Self::User(state) => state.name(),
        }
    }
}

impl<S> From<S> for StateId<S> {
    fn from(state: S) -> Self {
        Self::User(state)
    }
}

impl<S: State> Display for StateId<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Builder API for ergonomic table construction.
//!
//! This module provides fluent builders and a macro for declaring states
//! and transition tables with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod table;
pub mod transition;

pub use error::BuildError;
pub use table::TableBuilder;
pub use transition::TransitionBuilder;

use crate::core::{State, StateId};
use crate::table::TransitionRecord;

/// Create a transition whose handler always moves to `next`.
///
/// # Example
///
/// ```
/// use tabular_fsm::builder::advance;
/// use tabular_fsm::{state_enum, StateId, TransitionRecord};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// let record: TransitionRecord<MyState, ()> = advance(MyState::Start, MyState::End, StateId::Exit);
/// assert!(!record.is_terminal());
/// ```
pub fn advance<S, C>(
    from: impl Into<StateId<S>>,
    to: impl Into<StateId<S>>,
    next: impl Into<StateId<S>>,
) -> TransitionRecord<S, C>
where
    S: State,
{
    let next = next.into();
    TransitionRecord::new(from, to, move |_: &mut C| next.clone())
}

//! Core state types.
//!
//! This module contains the pure part of the engine:
//! - Caller states via the `State` trait
//! - The `StateId` union adding the synthetic `Init` / `Exit` states
//! - Bounded history of committed transitions

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::{State, StateId};

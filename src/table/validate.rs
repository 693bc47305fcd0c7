//! Structural checks for transition tables.
//!
//! The run loop validates lazily, one arc at a time, so a malformed table
//! only shows up when the machine walks into the bad spot. `validate`
//! inspects the whole table up front and accumulates every violation
//! instead of stopping at the first one.

use super::TransitionTable;
use crate::core::State;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A structural problem in a transition table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableViolation {
    #[error("Duplicate transition '{from}' -> '{to}' at records {first} and {second}; record {first} wins")]
    DuplicateTransition {
        from: String,
        to: String,
        first: usize,
        second: usize,
    },

    #[error("Record {index} moves '{from}' -> INIT, but INIT is never a target")]
    TargetsInit { from: String, index: usize },

    #[error("Record {index} moves EXIT -> '{to}', but EXIT is never a source")]
    LeavesExit { to: String, index: usize },

    #[error("Record {index} binds a handler to the terminal arc '{from}' -> EXIT")]
    HandlerOnExitArc { from: String, index: usize },

    #[error("No transition leaves INIT")]
    MissingEntry,

    #[error("No terminal transition into EXIT")]
    MissingTerminal,
}

impl<S: State, C> TransitionTable<S, C> {
    /// Check the whole table, accumulating ALL violations.
    /// Returns Validation::Success(()) for a well-formed table.
    /// Returns Validation::Failure with ALL violations otherwise.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableViolation>> {
        let records = self.records();
        let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            // Duplicate pair
            let check = match records[..index]
                .iter()
                .position(|earlier| earlier.matches(record.from(), record.to()))
            {
                Some(first) => Validation::fail(TableViolation::DuplicateTransition {
                    from: record.from().to_string(),
                    to: record.to().to_string(),
                    first,
                    second: index,
                }),
                None => Validation::success(()),
            };
            checks.push(check);

            let check = if record.to().is_init() {
                Validation::fail(TableViolation::TargetsInit {
                    from: record.from().to_string(),
                    index,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);

            let check = if record.from().is_exit() {
                Validation::fail(TableViolation::LeavesExit {
                    to: record.to().to_string(),
                    index,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);

            let check = if record.to().is_exit() && !record.is_terminal() {
                Validation::fail(TableViolation::HandlerOnExitArc {
                    from: record.from().to_string(),
                    index,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        // Entry and terminal arcs
        let check = if records.iter().any(|record| record.from().is_init()) {
            Validation::success(())
        } else {
            Validation::fail(TableViolation::MissingEntry)
        };
        checks.push(check);

        let check = if records.iter().any(|record| record.is_terminal()) {
            Validation::success(())
        } else {
            Validation::fail(TableViolation::MissingTerminal)
        };
        checks.push(check);

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use crate::table::TransitionRecord;
    use std::sync::Arc;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Red,
        Green,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Red => "Red",
                Self::Green => "Green",
            }
        }

        fn user_start() -> Self {
            Self::Red
        }
    }

    fn to(next: StateId<TestState>) -> impl Fn(&mut ()) -> StateId<TestState> + Send + Sync {
        move |_: &mut ()| next.clone()
    }

    fn failures(table: &TransitionTable<TestState, ()>) -> Vec<TableViolation> {
        match table.validate() {
            Validation::Failure(violations) => violations.into_vec(),
            Validation::Success(_) => Vec::new(),
        }
    }

    #[test]
    fn well_formed_table_passes() {
        let table = TransitionTable::from(vec![
            TransitionRecord::new(StateId::Init, TestState::Red, to(TestState::Green.into())),
            TransitionRecord::new(TestState::Red, TestState::Green, to(StateId::Exit)),
            TransitionRecord::terminal(TestState::Green),
        ]);

        assert!(matches!(table.validate(), Validation::Success(())));
    }

    #[test]
    fn single_violation_fails_with_that_violation() {
        let table = TransitionTable::from(vec![TransitionRecord::new(
            StateId::Init,
            TestState::Red,
            to(StateId::Exit),
        )]);

        match table.validate() {
            Validation::Failure(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations.head(), &TableViolation::MissingTerminal);
            }
            Validation::Success(_) => panic!("Expected missing terminal arc"),
        }
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let table = TransitionTable::from(vec![
            TransitionRecord::new(TestState::Red, TestState::Green, to(StateId::Exit)),
            TransitionRecord::new(TestState::Red, TestState::Green, to(StateId::Exit)),
            TransitionRecord::new(TestState::Green, StateId::Init, to(StateId::Exit)),
            TransitionRecord::new(StateId::Exit, TestState::Red, to(StateId::Exit)),
            TransitionRecord::new(TestState::Green, StateId::Exit, to(StateId::Exit)),
        ]);

        let violations = failures(&table);
        assert_eq!(violations.len(), 6);
        assert_eq!(
            violations[0],
            TableViolation::DuplicateTransition {
                from: "Red".to_string(),
                to: "Green".to_string(),
                first: 0,
                second: 1,
            }
        );
        assert!(violations.contains(&TableViolation::TargetsInit {
            from: "Green".to_string(),
            index: 2,
        }));
        assert!(violations.contains(&TableViolation::LeavesExit {
            to: "Red".to_string(),
            index: 3,
        }));
        assert!(violations.contains(&TableViolation::HandlerOnExitArc {
            from: "Green".to_string(),
            index: 4,
        }));
        assert!(violations.contains(&TableViolation::MissingEntry));
        assert!(violations.contains(&TableViolation::MissingTerminal));
    }

    #[test]
    fn duplicate_is_reported_once_per_repeat() {
        let shared = Arc::new(to(StateId::Exit));
        let table: TransitionTable<TestState, ()> = (0..3)
            .map(|_| {
                let shared = Arc::clone(&shared);
                TransitionRecord::new(StateId::Init, TestState::Red, move |ctx: &mut ()| shared(ctx))
            })
            .chain(std::iter::once(TransitionRecord::terminal(TestState::Red)))
            .collect();

        let duplicates: Vec<_> = failures(&table)
            .into_iter()
            .filter(|v| matches!(v, TableViolation::DuplicateTransition { .. }))
            .collect();

        assert_eq!(duplicates.len(), 2);
        assert!(duplicates
            .iter()
            .all(|v| matches!(v, TableViolation::DuplicateTransition { first: 0, .. })));
    }

    #[test]
    fn violation_messages_name_the_states() {
        let violation = TableViolation::HandlerOnExitArc {
            from: "Green".to_string(),
            index: 4,
        };
        assert_eq!(
            violation.to_string(),
            "Record 4 binds a handler to the terminal arc 'Green' -> EXIT"
        );
    }
}

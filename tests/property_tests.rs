//! Property-based tests for table lookup and the run loop.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated tables and positions.

use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use stillwater::validation::Validation;
use tabular_fsm::builder::advance;
use tabular_fsm::{
    FsmConfig, MachineMetadata, RunStatus, State, StateId, TransitionRecord, TransitionTable,
};

const NAMES: [&str; 8] = ["N0", "N1", "N2", "N3", "N4", "N5", "N6", "N7"];

#[derive(Clone, Copy, PartialEq, Debug)]
struct Node(usize);

impl State for Node {
    fn name(&self) -> &str {
        NAMES[self.0]
    }

    fn user_start() -> Self {
        Node(0)
    }
}

/// INIT -> N0 -> N1 -> ... -> N(len-1) -> EXIT, each handler counting itself.
fn chain(len: usize) -> TransitionTable<Node, usize> {
    let mut records = Vec::with_capacity(len + 1);
    for i in 0..len {
        let from = if i == 0 {
            StateId::Init
        } else {
            StateId::User(Node(i - 1))
        };
        let next = if i + 1 == len {
            StateId::Exit
        } else {
            StateId::User(Node(i + 1))
        };
        records.push(TransitionRecord::new(from, Node(i), move |count: &mut usize| {
            *count += 1;
            next
        }));
    }
    records.push(TransitionRecord::terminal(Node(len - 1)));
    TransitionTable::from(records)
}

prop_compose! {
    fn arbitrary_state()(variant in 0..10usize) -> StateId<Node> {
        match variant {
            8 => StateId::Init,
            9 => StateId::Exit,
            n => StateId::User(Node(n)),
        }
    }
}

proptest! {
    #[test]
    fn chains_terminate_successfully(len in 1..=8usize) {
        let table = chain(len);
        let mut machine = MachineMetadata::create("chain", None).unwrap();
        let mut count = 0;

        let report = machine.run(&table, &mut count);

        prop_assert_eq!(report.status, RunStatus::Success);
        prop_assert_eq!(report.steps, len);
        prop_assert_eq!(count, len);
        prop_assert_eq!(report.to, StateId::User(Node(len - 1)));
        let expected_from = if len == 1 { StateId::Init } else { StateId::User(Node(len - 2)) };
        prop_assert_eq!(report.from, expected_from);
        prop_assert_eq!(machine.current_state(), &StateId::Exit);
    }

    #[test]
    fn absent_pairs_are_reported_unresolved(
        len in 1..=8usize,
        from in arbitrary_state(),
        to in arbitrary_state(),
    ) {
        let table = chain(len);
        prop_assume!(table.find(&from, &to).is_none());

        let bad = Arc::new(Mutex::new(Vec::new()));
        let did = Arc::new(Mutex::new(0usize));
        let config = FsmConfig { check_tables: false, ..FsmConfig::default() };
        let mut machine: MachineMetadata<Node> =
            MachineMetadata::with_config("chain", None, config).unwrap();
        let log = Arc::clone(&bad);
        machine.set_bad_transition(move |_, f, t| log.lock().unwrap().push((*f, *t)));
        let counter = Arc::clone(&did);
        machine.set_did_change(move |_, _, _, _| *counter.lock().unwrap() += 1);
        machine.set_position(from, to);

        let mut count = 0;
        let report = machine.run(&table, &mut count);

        prop_assert_eq!(report.status, RunStatus::NoTransitionFound);
        prop_assert_eq!(report.from, from);
        prop_assert_eq!(report.to, to);
        prop_assert_eq!(report.steps, 0);
        prop_assert_eq!(bad.lock().unwrap().clone(), vec![(from, to)]);
        prop_assert_eq!(*did.lock().unwrap(), 0);
        prop_assert_eq!(machine.cursor().from, from);
        prop_assert_eq!(machine.cursor().to, to);
    }

    #[test]
    fn resolve_is_idempotent(
        len in 1..=8usize,
        from in arbitrary_state(),
        to in arbitrary_state(),
    ) {
        let table = chain(len);
        let first = table.resolve(&from, &to);
        let second = table.resolve(&from, &to);

        match (first, second) {
            (Some(a), Some(b)) => prop_assert!(Arc::ptr_eq(a, b)),
            (None, None) => {}
            _ => prop_assert!(false, "resolve changed its answer"),
        }
    }

    #[test]
    fn first_match_wins_on_duplicates(target in 0..8usize, shadow in 0..8usize) {
        let table: TransitionTable<Node, ()> = TransitionTable::from(vec![
            advance(StateId::Init, Node(0), Node(target)),
            advance(StateId::Init, Node(0), Node(shadow)),
        ]);

        let handler = table.resolve(&StateId::Init, &StateId::User(Node(0))).unwrap();
        let outcome = handler(&mut ());
        prop_assert_eq!(outcome.state(), &StateId::User(Node(target)));
    }

    #[test]
    fn chain_validation_passes(len in 1..=8usize) {
        prop_assert!(matches!(chain(len).validate(), Validation::Success(())));
    }
}

//! One read-only table driving several machines on different threads.

use std::sync::Arc;
use tabular_fsm::{state_enum, MachineMetadata, RunStatus, StateId, TransitionTable};

state_enum! {
    enum Counter {
        Counting,
        Done,
    }
}

struct Tally {
    remaining: u32,
    ticks: u32,
}

fn counting_table() -> TransitionTable<Counter, Tally> {
    TransitionTable::builder()
        .on(StateId::Init, Counter::Counting, tick)
        .on(Counter::Counting, Counter::Counting, tick)
        .on(Counter::Counting, Counter::Done, |_: &mut Tally| StateId::Exit)
        .terminal(Counter::Done)
        .build()
        .unwrap()
}

fn tick(tally: &mut Tally) -> StateId<Counter> {
    tally.ticks += 1;
    if tally.remaining == 0 {
        StateId::User(Counter::Done)
    } else {
        tally.remaining -= 1;
        StateId::User(Counter::Counting)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn machines_share_one_table_across_threads() {
    let table = Arc::new(counting_table());

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let table = Arc::clone(&table);
            tokio::task::spawn_blocking(move || {
                let mut machine = MachineMetadata::create(&format!("counter-{i}"), None)?;
                let mut tally = Tally {
                    remaining: i * 10,
                    ticks: 0,
                };
                let report = machine.run(&table, &mut tally);
                machine.destroy();
                Ok::<_, tabular_fsm::FsmError>((i, report, tally.ticks))
            })
        })
        .collect();

    for handle in handles {
        let (i, report, ticks) = handle.await.unwrap().unwrap();
        assert_eq!(report.status, RunStatus::Success);
        assert_eq!(report.machine, format!("counter-{i}"));
        assert_eq!(ticks, i * 10 + 1);
        assert_eq!(report.steps, ticks as usize + 1);
        assert_eq!(report.to, StateId::User(Counter::Done));
    }
}

#[test]
fn self_loop_is_a_legal_cycle() {
    let table = counting_table();
    let mut machine = MachineMetadata::create("counter", None).unwrap();
    let mut tally = Tally {
        remaining: 3,
        ticks: 0,
    };

    let report = machine.run(&table, &mut tally);

    assert!(report.is_success());
    assert_eq!(tally.ticks, 4);
    assert_eq!(report.from, StateId::User(Counter::Counting));
}

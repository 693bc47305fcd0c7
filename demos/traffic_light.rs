//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic table-driven machine with an error
//! branch.
//!
//! Key concepts:
//! - Cyclic transitions (RED -> GREEN -> YELLOW -> RED ...)
//! - Handlers that block (each light sleeps for its duration)
//! - A run-time branch to ERROR, which then exits
//! - Lifecycle hooks and the verbose trace sink
//!
//! Run with: cargo run --example traffic_light -- [cycles]

use std::thread;
use std::time::Duration;
use tabular_fsm::{state_enum, MachineMetadata, StateId, TransitionTable};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
        Error,
    }
}

struct Timing {
    red: Duration,
    green: Duration,
    yellow: Duration,
    cycles_left: u32,
}

fn red(timing: &mut Timing) -> StateId<TrafficLight> {
    println!("RED");
    thread::sleep(timing.red);

    if timing.cycles_left == 0 {
        return StateId::User(TrafficLight::Error);
    }
    timing.cycles_left -= 1;
    StateId::User(TrafficLight::Green)
}

fn green(timing: &mut Timing) -> StateId<TrafficLight> {
    println!("GREEN");
    thread::sleep(timing.green);
    StateId::User(TrafficLight::Yellow)
}

fn yellow(timing: &mut Timing) -> StateId<TrafficLight> {
    println!("YELLOW");
    thread::sleep(timing.yellow);
    StateId::User(TrafficLight::Red)
}

fn state_error(_: &mut Timing) -> StateId<TrafficLight> {
    println!("ERROR: light out of service");
    StateId::Exit
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let cycles = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2);

    let table = TransitionTable::builder()
        .on(StateId::Init, TrafficLight::Red, red)
        .on(TrafficLight::Red, TrafficLight::Green, green)
        .on(TrafficLight::Green, TrafficLight::Yellow, yellow)
        .on(TrafficLight::Yellow, TrafficLight::Red, red)
        .on(TrafficLight::Red, TrafficLight::Error, state_error)
        .on(TrafficLight::Green, TrafficLight::Error, state_error)
        .on(TrafficLight::Yellow, TrafficLight::Error, state_error)
        .terminal(TrafficLight::Error)
        .build()
        .unwrap();

    let mut machine: MachineMetadata<TrafficLight> =
        MachineMetadata::create("traffic", Some(Box::new(std::io::stderr()))).unwrap();
    machine.set_will_change(|info, from, to| {
        println!("{}: will change {} -> {}", info.name(), from, to);
    });
    machine.set_did_change(|info, from, to, next| {
        println!("{}: did change {} -> {} moving to {}", info.name(), from, to, next);
    });
    machine.set_bad_transition(|info, from, to| {
        println!("{}: bad change {} -> {}", info.name(), from, to);
    });

    let mut timing = Timing {
        red: Duration::from_millis(500),
        green: Duration::from_millis(500),
        yellow: Duration::from_millis(200),
        cycles_left: cycles,
    };

    let report = machine.run(&table, &mut timing);
    println!(
        "\nStopped with {:?} after {} steps at {} -> {}",
        report.status, report.steps, report.from, report.to
    );

    machine.destroy();
    println!("\n=== Example Complete ===");
}

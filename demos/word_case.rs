//! Word Case Converter
//!
//! This example demonstrates run-time branching: the first character of
//! the argument decides whether the word is upper-cased, lower-cased, or
//! echoed unchanged.
//!
//! Run with: cargo run --example word_case -- Hello

use std::process::ExitCode;
use tabular_fsm::{state_enum, MachineMetadata, StateId, TransitionTable};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Case {
        Process,
        Upper,
        Lower,
        Nothing,
    }
}

fn process(word: &mut String) -> StateId<Case> {
    match word.chars().next() {
        Some(c) if c.is_uppercase() => StateId::User(Case::Upper),
        Some(c) if c.is_lowercase() => StateId::User(Case::Lower),
        _ => StateId::User(Case::Nothing),
    }
}

fn convert(word: &mut String, converter: fn(char) -> char) -> StateId<Case> {
    let converted: String = word.chars().map(converter).collect();
    println!("{converted}");
    StateId::Exit
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(mut word) = std::env::args().nth(1) else {
        eprintln!("usage: word_case <word>");
        return ExitCode::FAILURE;
    };

    let table = TransitionTable::builder()
        .on(StateId::Init, Case::Process, process)
        .on(Case::Process, Case::Upper, |w: &mut String| {
            convert(w, |c| c.to_ascii_uppercase())
        })
        .on(Case::Process, Case::Lower, |w: &mut String| {
            convert(w, |c| c.to_ascii_lowercase())
        })
        .on(Case::Process, Case::Nothing, |w: &mut String| convert(w, |c| c))
        .terminal(Case::Upper)
        .terminal(Case::Lower)
        .terminal(Case::Nothing)
        .build();

    let table = match table {
        Ok(table) => table,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut machine: MachineMetadata<Case> = match MachineMetadata::create("word", None) {
        Ok(machine) => machine,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    machine.set_bad_transition(|info, from, to| {
        eprintln!("{}: bad change {} -> {}", info.name(), from, to);
    });

    let result = machine.run(&table, &mut word).into_result();
    machine.destroy();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

//! Driving-loop termination behavior.

use armsim_core::common::error::{EmuError, InternalError, MemFault};
use armsim_core::sim::RunError;
use armsim_core::{Config, Simulator};
use pretty_assertions::assert_eq;

use crate::common::encoder;
use crate::common::harness::PROG_BASE;

fn simulator_with(config: &Config, words: &[u32]) -> Simulator {
    let mut sim = Simulator::new(config);
    let mach = sim.machine_mut();
    for (i, word) in words.iter().enumerate() {
        mach.mem.write_u32(PROG_BASE + (i as u64) * 4, *word).unwrap();
    }
    mach.pc = PROG_BASE;
    sim
}

#[test]
fn run_returns_the_halt_code() {
    let config = Config::default();
    let mut sim = simulator_with(&config, &[encoder::nop(), encoder::hlt(3)]);
    assert_eq!(sim.run().unwrap(), 3);
    assert_eq!(sim.machine().stats.retired, 2);
}

#[test]
fn step_limit_stops_a_runaway_program() {
    let mut config = Config::default();
    config.general.max_steps = 16;
    // b . loops forever.
    let mut sim = simulator_with(&config, &[encoder::b(0)]);
    assert_eq!(sim.run(), Err(RunError::StepLimit { limit: 16 }));
}

#[test]
fn halt_is_failure_turns_halt_into_an_error() {
    let mut config = Config::default();
    config.general.halt_is_failure = true;
    let mut sim = simulator_with(&config, &[encoder::hlt(9)]);
    assert_eq!(sim.run(), Err(RunError::HaltedWithFailure { code: 9 }));
}

#[test]
fn fetch_outside_memory_is_a_fatal_run_error() {
    let config = Config::default();
    let mut sim = Simulator::new(&config);
    sim.machine_mut().pc = 0;
    match sim.run() {
        Err(RunError::Emu(EmuError::Memory(MemFault::OutOfRange { .. }))) => {}
        other => panic!("expected fetch fault, got {other:?}"),
    }
}

#[test]
fn invalid_instruction_is_a_fatal_run_error() {
    let config = Config::default();
    // All-zero words classify to the invalid sentinel.
    let mut sim = simulator_with(&config, &[0]);
    match sim.run() {
        Err(RunError::Emu(EmuError::Internal(InternalError::UnassignedOpcode { .. }))) => {}
        other => panic!("expected decode failure, got {other:?}"),
    }
}

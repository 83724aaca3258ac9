//! Test harness around the simulator.

use armsim_core::core::StepOutcome;
use armsim_core::{Config, Machine, Simulator};

/// Default guest address test programs are loaded at.
pub const PROG_BASE: u64 = 0x0010_0000;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();

        let config = Config::default();
        Self {
            sim: Simulator::new(&config),
        }
    }

    /// Convenience accessor for the machine.
    pub fn machine(&self) -> &Machine {
        self.sim.machine()
    }

    /// Mutable convenience accessor for the machine.
    pub fn machine_mut(&mut self) -> &mut Machine {
        self.sim.machine_mut()
    }

    /// Load a sequence of instruction words at `PROG_BASE` and set the PC.
    pub fn load_program(self, words: &[u32]) -> Self {
        self.load_program_at(PROG_BASE, words)
    }

    /// Load a sequence of instruction words at `addr` and set the PC.
    pub fn load_program_at(mut self, addr: u64, words: &[u32]) -> Self {
        let mach = self.sim.machine_mut();
        for (i, word) in words.iter().enumerate() {
            mach.mem
                .write_u32(addr + (i as u64) * 4, *word)
                .expect("test program must fit in memory");
        }
        mach.pc = addr;
        self
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: u8, val: u64) {
        self.sim.machine_mut().regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: u8) -> u64 {
        self.sim.machine().regs.read(reg)
    }

    /// Run a single instruction, panicking on any fault.
    pub fn step(&mut self) -> StepOutcome {
        self.sim.step().expect("step must not fault")
    }

    /// Run until `HLT`, returning the halt code. Panics on any fault or if
    /// the program runs away.
    pub fn run_to_halt(&mut self) -> u16 {
        for _ in 0..10_000 {
            match self.sim.step().expect("step must not fault") {
                StepOutcome::Continue => {}
                StepOutcome::Halt(code) => return code,
            }
        }
        panic!("program did not halt within 10000 steps");
    }
}

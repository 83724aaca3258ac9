//! The driving loop.
//!
//! `Simulator` owns a machine and pushes one instruction record at a time
//! through the six stages. A run ends at `HLT`, on any fatal error, or when
//! the configured step limit trips.

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::common::error::EmuError;
use crate::config::Config;
use crate::core::stages::{
    decode_stage, execute_stage, fetch_stage, memory_stage, update_pc_stage, writeback_stage,
};
use crate::core::{Instruction, Machine, StepOutcome};

/// A failed run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// A stage reported a fatal fault.
    #[error(transparent)]
    Emu(#[from] EmuError),
    /// The configured step limit tripped before the program halted.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimit {
        /// The configured limit.
        limit: u64,
    },
    /// The program halted but the configuration treats `HLT` as failure.
    #[error("program halted with code {code:#x}")]
    HaltedWithFailure {
        /// The `HLT` immediate.
        code: u16,
    },
}

/// Owns a machine and drives it instruction by instruction.
#[derive(Debug)]
pub struct Simulator {
    mach: Machine,
    trace_instructions: bool,
    max_steps: u64,
    halt_is_failure: bool,
}

impl Simulator {
    /// Creates a simulator with a fresh machine built from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            mach: Machine::new(config),
            trace_instructions: config.general.trace_instructions,
            max_steps: config.general.max_steps,
            halt_is_failure: config.general.halt_is_failure,
        }
    }

    /// Wraps an already-prepared machine.
    ///
    /// Used when the caller has loaded a program or poked registers before
    /// handing the machine over.
    pub fn from_machine(mach: Machine, config: &Config) -> Self {
        Self {
            mach,
            trace_instructions: config.general.trace_instructions,
            max_steps: config.general.max_steps,
            halt_is_failure: config.general.halt_is_failure,
        }
    }

    /// The machine being driven.
    pub fn machine(&self) -> &Machine {
        &self.mach
    }

    /// Mutable access to the machine being driven.
    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.mach
    }

    /// Runs one instruction through all six stages.
    ///
    /// # Errors
    ///
    /// Any `EmuError` raised by a stage. The machine state reflects every
    /// stage that completed before the fault.
    pub fn step(&mut self) -> Result<StepOutcome, EmuError> {
        let mut insn = Instruction::new();
        let pc = self.mach.pc;

        fetch_stage(&self.mach, &mut insn)?;
        decode_stage(&self.mach, &mut insn)?;
        execute_stage(&self.mach, &mut insn)?;
        memory_stage(&mut self.mach, &mut insn)?;
        writeback_stage(&mut self.mach, &insn)?;
        let outcome = update_pc_stage(&mut self.mach, &insn)?;

        self.mach.stats.retired += 1;
        if self.trace_instructions {
            debug!(
                target: "armsim::sim",
                pc = format_args!("{pc:#x}"),
                word = format_args!("{:#010x}", insn.insnbits),
                op = insn.op.mnemonic(),
                "retired"
            );
        } else {
            trace!(target: "armsim::sim", pc = format_args!("{pc:#x}"), op = insn.op.mnemonic(), "retired");
        }
        Ok(outcome)
    }

    /// Runs until `HLT`, a fatal error, or the step limit.
    ///
    /// # Returns
    ///
    /// The `HLT` immediate of the halting instruction.
    ///
    /// # Errors
    ///
    /// `RunError::Emu` on a fatal stage fault, `RunError::StepLimit` if the
    /// program never halts, and `RunError::HaltedWithFailure` when the
    /// configuration asks for it.
    pub fn run(&mut self) -> Result<u16, RunError> {
        let mut steps = 0u64;
        loop {
            if steps >= self.max_steps {
                return Err(RunError::StepLimit {
                    limit: self.max_steps,
                });
            }
            match self.step()? {
                StepOutcome::Continue => steps += 1,
                StepOutcome::Halt(code) => {
                    info!(
                        target: "armsim::sim",
                        code = format_args!("{code:#x}"),
                        retired = self.mach.stats.retired,
                        "halted"
                    );
                    if self.halt_is_failure {
                        return Err(RunError::HaltedWithFailure { code });
                    }
                    return Ok(code);
                }
            }
        }
    }
}

//! Machine context and the instruction-processing engine.
//!
//! The machine context owns everything an instruction can observe or
//! mutate: the register file, the NZCV flags, the program counter, memory,
//! the opcode class table, and run statistics. It is created by the driving
//! loop and lent to each stage call; there is no process-wide state.

/// ALU operations (arithmetic, logic, shifts and bitfield moves).
pub mod alu;
/// The per-cycle instruction record.
pub mod insn;
/// The six stage dispatchers.
pub mod stages;

use crate::arch::{Flags, RegisterFile};
use crate::config::Config;
use crate::isa::OpcodeTable;
use crate::mem::Memory;
use crate::stats::Stats;

pub use insn::Instruction;

/// Outcome of one full fetch-to-update-PC cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The PC has been advanced or redirected; fetch the next instruction.
    Continue,
    /// A `HLT` was executed; the run is over. Carries the halt immediate.
    Halt(u16),
}

/// The complete state of the emulated machine.
#[derive(Debug)]
pub struct Machine {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Committed NZCV flags.
    pub flags: Flags,
    /// Program counter.
    pub pc: u64,
    /// Guest memory.
    pub mem: Memory,
    /// Opcode class table, built once at construction.
    pub itable: OpcodeTable,
    /// Run counters.
    pub stats: Stats,
}

impl Machine {
    /// Creates a machine from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory geometry and entry point.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            flags: Flags::default(),
            pc: config.general.start_pc,
            mem: Memory::new(config.memory.ram_base, config.memory.ram_size),
            itable: OpcodeTable::new(),
            stats: Stats::default(),
        }
    }
}

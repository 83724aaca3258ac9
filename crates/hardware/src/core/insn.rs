//! The per-cycle instruction record.
//!
//! One `Instruction` is created fresh for every fetch-to-update-PC cycle,
//! owned by the driving loop, and discarded once the PC for the next cycle
//! is known. It accumulates state as it passes through the stages; fields
//! that are not meaningful for a given opcode keep their zero/`None`
//! defaults.

use crate::arch::Flags;
use crate::common::error::MemFault;
use crate::isa::opcode::{Cond, Opcode};

/// Load/store addressing mode.
///
/// Only base-plus-offset is produced by the implemented opcode subset;
/// pre- and post-index exist as a modeled extension (base register updated
/// before or after the access) and literal is PC-relative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddrMode {
    /// Address is the base register value.
    BaseOnly,
    /// Address is base plus the decoded offset.
    #[default]
    BasePlusOffset,
    /// Address is base plus offset; the base register is updated to it.
    PreIndex,
    /// Address is the base register value; the base is updated afterwards.
    PostIndex,
    /// Address is PC-relative.
    Literal,
}

/// One instruction in flight.
#[derive(Debug, Default)]
pub struct Instruction {
    // Set at fetch.
    /// Raw bits of the instruction word.
    pub insnbits: u32,

    // Set at decode.
    /// Decoded opcode, from the class table.
    pub op: Opcode,
    /// Whether this is the 32-bit (`W`-register) form.
    pub is_32: bool,
    /// Branch condition; `None` for everything but `BCond`.
    pub cond: Option<Cond>,
    /// Destination register written at writeback, if any.
    pub dst: Option<u8>,
    /// First source register, if any.
    pub src1: Option<u8>,
    /// Second source register (second ALU input, or the value stored by a
    /// store), if any.
    pub src2: Option<u8>,
    /// Sign-extended immediate operand.
    pub imm: i64,
    /// Shift amount, if any.
    pub shift: u8,
    /// Address of the sequentially next instruction.
    pub next_pc: u64,
    /// Branch target; meaningful only for branch opcodes.
    pub branch_pc: u64,
    /// Addressing mode for loads and stores.
    pub addr_mode: AddrMode,
    /// Base-register update flag for pre/post-index addressing.
    pub wback: bool,
    /// First operand value, from `src1`.
    pub opnd1: u64,
    /// Second operand value, from `src2` or the immediate.
    pub opnd2: u64,

    // Set at execute.
    /// ALU output: result value or computed address.
    pub val_ex: u64,
    /// Condition-code output of the ALU, committed at writeback for
    /// flag-setting opcodes.
    pub cc: Flags,
    /// Conditional-branch outcome, consumed by update-PC.
    pub taken: bool,

    // Set at memory.
    /// Value returned by a memory read.
    pub val_mem: u64,
    /// Status reported by the memory collaborator, if it faulted.
    pub mem_status: Option<MemFault>,
}

impl Instruction {
    /// Creates an empty record for a new cycle.
    pub fn new() -> Self {
        Self::default()
    }
}

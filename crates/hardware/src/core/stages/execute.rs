//! Execute stage.
//!
//! Computes the ALU result, memory address, or branch outcome for the
//! decoded record. Flag-setting variants leave their NZCV output on the
//! record; writeback commits it. Conditional branches are resolved here,
//! against the committed flags for `B.cond` or against the tested register
//! value or bit for the compare/test-and-branch family, and the outcome
//! feeds update-PC.

use tracing::trace;

use crate::common::error::{EmuError, InternalError};
use crate::core::alu::{arithmetic, logic, shifts};
use crate::core::insn::AddrMode;
use crate::core::{Instruction, Machine};
use crate::isa::opcode::Opcode;

/// Executes the opcode-specific computation for the record.
///
/// # Errors
///
/// `EmuError::Internal` if a sentinel opcode reaches this dispatcher.
pub fn execute_stage(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    match insn.op {
        Opcode::Ldurb
        | Opcode::Ldurh
        | Opcode::Ldur
        | Opcode::Sturb
        | Opcode::Sturh
        | Opcode::Stur => {
            insn.val_ex = address(mach, insn);
        }

        Opcode::AddImm | Opcode::AddReg => {
            insn.val_ex = arithmetic::add(insn.opnd1, operand2(insn), insn.is_32);
        }
        Opcode::AddsImm | Opcode::AddsReg => {
            let (val, cc) = arithmetic::add_with_flags(insn.opnd1, operand2(insn), insn.is_32);
            insn.val_ex = val;
            insn.cc = cc;
        }
        Opcode::SubImm | Opcode::SubReg => {
            insn.val_ex = arithmetic::sub(insn.opnd1, operand2(insn), insn.is_32);
        }
        Opcode::SubsImm | Opcode::SubsReg => {
            let (val, cc) = arithmetic::sub_with_flags(insn.opnd1, operand2(insn), insn.is_32);
            insn.val_ex = val;
            insn.cc = cc;
        }

        Opcode::Mvn => {
            let shifted = shifts::lsl(insn.opnd1, u32::from(insn.shift), insn.is_32);
            insn.val_ex = logic::not(shifted, insn.is_32);
        }
        Opcode::OrrImm | Opcode::OrrReg => {
            insn.val_ex = logic::orr(insn.opnd1, operand2(insn), insn.is_32);
        }
        Opcode::EorImm | Opcode::EorReg => {
            insn.val_ex = logic::eor(insn.opnd1, operand2(insn), insn.is_32);
        }
        Opcode::AndImm | Opcode::AndReg => {
            insn.val_ex = logic::and(insn.opnd1, operand2(insn), insn.is_32);
        }
        Opcode::AndsImm | Opcode::AndsReg => {
            insn.val_ex = logic::and(insn.opnd1, operand2(insn), insn.is_32);
            insn.cc = logic::nz_flags(insn.val_ex, insn.is_32);
        }

        Opcode::Movz => {
            insn.val_ex = (insn.imm as u64) << insn.shift;
        }
        Opcode::Movk => {
            let lane = 0xFFFFu64 << insn.shift;
            insn.val_ex = (insn.opnd1 & !lane) | ((insn.imm as u64) << insn.shift);
        }

        Opcode::Lsl => {
            insn.val_ex = shifts::lsl(insn.opnd1, u32::from(insn.shift), insn.is_32);
        }
        Opcode::Lsr => {
            insn.val_ex = shifts::lsr(insn.opnd1, u32::from(insn.shift), insn.is_32);
        }
        Opcode::Asr => {
            insn.val_ex = shifts::asr(insn.opnd1, u32::from(insn.shift), insn.is_32);
        }
        Opcode::Ubfm => {
            insn.val_ex = shifts::ubfm(
                insn.opnd1,
                u32::from(insn.shift),
                insn.imm as u32,
                insn.is_32,
            );
        }

        // PC-relative targets were computed at decode; register-indirect
        // targets come from the operand read.
        Opcode::B | Opcode::Bl => {}
        Opcode::Br | Opcode::Blr | Opcode::Ret => {
            insn.branch_pc = insn.opnd1;
        }
        Opcode::BCond => {
            insn.taken = insn.cond.is_some_and(|c| mach.flags.satisfies(c));
        }
        Opcode::Cbz | Opcode::Cbnz => {
            let val = if insn.is_32 {
                insn.opnd1 & 0xFFFF_FFFF
            } else {
                insn.opnd1
            };
            insn.taken = (val == 0) == (insn.op == Opcode::Cbz);
        }
        Opcode::Tbz | Opcode::Tbnz => {
            let bit = (insn.opnd1 >> (insn.imm as u32)) & 1;
            insn.taken = (bit == 0) == (insn.op == Opcode::Tbz);
        }

        Opcode::Nop | Opcode::Hlt => {}

        Opcode::Unassigned | Opcode::Invalid => {
            return Err(InternalError::UnassignedOpcode {
                op: insn.op,
                stage: "execute",
            }
            .into());
        }
    }

    trace!(
        target: "armsim::execute",
        op = insn.op.mnemonic(),
        val_ex = format_args!("{:#x}", insn.val_ex),
        taken = insn.taken,
    );
    Ok(())
}

/// Second ALU input: the shifted register for register-register forms,
/// the decoded immediate otherwise.
///
/// Decode rejects non-LSL shift types, so the shift here is always a
/// logical left shift.
fn operand2(insn: &Instruction) -> u64 {
    match insn.op {
        Opcode::AddReg
        | Opcode::AddsReg
        | Opcode::SubReg
        | Opcode::SubsReg
        | Opcode::OrrReg
        | Opcode::EorReg
        | Opcode::AndReg
        | Opcode::AndsReg => shifts::lsl(insn.opnd2, u32::from(insn.shift), insn.is_32),
        _ => insn.opnd2,
    }
}

/// Effective address for a load or store, honoring the addressing mode.
fn address(mach: &Machine, insn: &Instruction) -> u64 {
    let off = insn.imm as u64;
    match insn.addr_mode {
        AddrMode::BaseOnly | AddrMode::PostIndex => insn.opnd1,
        AddrMode::BasePlusOffset | AddrMode::PreIndex => insn.opnd1.wrapping_add(off),
        AddrMode::Literal => mach.pc.wrapping_add(off),
    }
}

//! PC-update stage.
//!
//! Selects the next program counter and reports whether the machine keeps
//! running. All branch statistics are counted here, after the outcome of
//! conditional branches is known.

use tracing::trace;

use crate::common::error::{EmuError, InternalError};
use crate::core::{Instruction, Machine, StepOutcome};
use crate::isa::opcode::Opcode;

/// Advances the program counter for the record.
///
/// # Arguments
///
/// * `mach` - The machine whose PC is being advanced.
/// * `insn` - The completed record.
///
/// # Returns
///
/// `StepOutcome::Halt` with the halt code for `HLT`, `StepOutcome::Continue`
/// otherwise.
///
/// # Errors
///
/// `EmuError::Internal` if a sentinel opcode reaches this dispatcher.
pub fn update_pc_stage(mach: &mut Machine, insn: &Instruction) -> Result<StepOutcome, EmuError> {
    match insn.op {
        Opcode::B | Opcode::Bl | Opcode::Br | Opcode::Blr | Opcode::Ret => {
            mach.stats.branches += 1;
            mach.stats.branches_taken += 1;
            mach.pc = insn.branch_pc;
            trace!(target: "armsim::update_pc", pc = format_args!("{:#x}", mach.pc), "branch");
            Ok(StepOutcome::Continue)
        }

        Opcode::BCond | Opcode::Cbnz | Opcode::Cbz | Opcode::Tbnz | Opcode::Tbz => {
            mach.stats.branches += 1;
            if insn.taken {
                mach.stats.branches_taken += 1;
                mach.pc = insn.branch_pc;
            } else {
                mach.pc = insn.next_pc;
            }
            trace!(
                target: "armsim::update_pc",
                pc = format_args!("{:#x}", mach.pc),
                taken = insn.taken,
                "conditional branch"
            );
            Ok(StepOutcome::Continue)
        }

        Opcode::Hlt => Ok(StepOutcome::Halt(insn.imm as u16)),

        Opcode::Ldurb
        | Opcode::Ldurh
        | Opcode::Ldur
        | Opcode::Sturb
        | Opcode::Sturh
        | Opcode::Stur
        | Opcode::Movk
        | Opcode::Movz
        | Opcode::AddImm
        | Opcode::AddReg
        | Opcode::AddsImm
        | Opcode::AddsReg
        | Opcode::SubImm
        | Opcode::SubReg
        | Opcode::SubsImm
        | Opcode::SubsReg
        | Opcode::Mvn
        | Opcode::OrrImm
        | Opcode::OrrReg
        | Opcode::EorImm
        | Opcode::EorReg
        | Opcode::AndImm
        | Opcode::AndReg
        | Opcode::AndsImm
        | Opcode::AndsReg
        | Opcode::Lsl
        | Opcode::Lsr
        | Opcode::Ubfm
        | Opcode::Asr
        | Opcode::Nop => {
            mach.pc = insn.next_pc;
            Ok(StepOutcome::Continue)
        }

        Opcode::Unassigned | Opcode::Invalid => Err(InternalError::UnassignedOpcode {
            op: insn.op,
            stage: "update_pc",
        }
        .into()),
    }
}

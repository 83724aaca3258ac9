//! Write-back stage.
//!
//! Commits the architectural effects of one record: destination register
//! writes, flag updates for the flag-setting forms, and the link-register
//! write for call-style branches. Branch targets are not committed here;
//! the PC-update stage owns those.

use tracing::trace;

use crate::common::constants::LINK_REG;
use crate::common::error::{EmuError, InternalError};
use crate::core::{Instruction, Machine};
use crate::isa::opcode::Opcode;

/// Commits register and flag state for the record.
///
/// # Errors
///
/// `EmuError::Internal` if a sentinel opcode reaches this dispatcher.
pub fn writeback_stage(mach: &mut Machine, insn: &Instruction) -> Result<(), EmuError> {
    match insn.op {
        Opcode::Ldurb | Opcode::Ldurh | Opcode::Ldur => {
            write_dst(mach, insn, insn.val_mem);
            Ok(())
        }

        Opcode::Movk
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
        | Opcode::Asr => {
            write_dst(mach, insn, insn.val_ex);
            if insn.op.sets_flags() {
                mach.flags = insn.cc;
                trace!(target: "armsim::writeback", flags = %mach.flags, "flags committed");
            }
            Ok(())
        }

        // The return address is architecturally visible only once the
        // instruction completes, so the link write lands here rather
        // than at execute.
        Opcode::Bl | Opcode::Blr => {
            mach.regs.write(LINK_REG, insn.next_pc);
            Ok(())
        }

        Opcode::Sturb
        | Opcode::Sturh
        | Opcode::Stur
        | Opcode::B
        | Opcode::Br
        | Opcode::BCond
        | Opcode::Cbnz
        | Opcode::Cbz
        | Opcode::Tbnz
        | Opcode::Tbz
        | Opcode::Ret
        | Opcode::Nop
        | Opcode::Hlt => Ok(()),

        Opcode::Unassigned | Opcode::Invalid => Err(InternalError::UnassignedOpcode {
            op: insn.op,
            stage: "writeback",
        }
        .into()),
    }
}

fn write_dst(mach: &mut Machine, insn: &Instruction, val: u64) {
    if let Some(dst) = insn.dst {
        if insn.is_32 {
            mach.regs.write_w(dst, val);
        } else {
            mach.regs.write(dst, val);
        }
    }
}

//! Memory stage.
//!
//! Routes each record to a shared load routine, a shared store routine, or
//! a no-op. The access width comes from the opcode; the computed address
//! comes from execute. Any fault from the memory collaborator is recorded
//! on the instruction and ends the run; there is no partial-instruction
//! recovery.

use tracing::trace;

use crate::common::error::{EmuError, InternalError};
use crate::core::{Instruction, Machine};
use crate::isa::opcode::Opcode;

/// Access width of one load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemWidth {
    Byte,
    Half,
    Word,
    Double,
}

/// Performs the memory access for the record, if its opcode has one.
///
/// # Errors
///
/// `EmuError::Memory` when the collaborator reports a fault;
/// `EmuError::Internal` if a sentinel opcode reaches this dispatcher.
pub fn memory_stage(mach: &mut Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    match insn.op {
        Opcode::Ldurb => load(mach, insn, MemWidth::Byte),
        Opcode::Ldurh => load(mach, insn, MemWidth::Half),
        Opcode::Ldur => load(mach, insn, data_width(insn)),
        Opcode::Sturb => store(mach, insn, MemWidth::Byte),
        Opcode::Sturh => store(mach, insn, MemWidth::Half),
        Opcode::Stur => store(mach, insn, data_width(insn)),

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
        | Opcode::Asr
        | Opcode::B
        | Opcode::Br
        | Opcode::BCond
        | Opcode::Cbnz
        | Opcode::Cbz
        | Opcode::Tbnz
        | Opcode::Tbz
        | Opcode::Bl
        | Opcode::Blr
        | Opcode::Ret
        | Opcode::Nop
        | Opcode::Hlt => Ok(()),

        Opcode::Unassigned | Opcode::Invalid => Err(InternalError::UnassignedOpcode {
            op: insn.op,
            stage: "memory",
        }
        .into()),
    }
}

/// Word/double-word width select for `LDUR`/`STUR`.
fn data_width(insn: &Instruction) -> MemWidth {
    if insn.is_32 {
        MemWidth::Word
    } else {
        MemWidth::Double
    }
}

/// Shared load routine: read at the computed address, zero-extending into
/// the record's memory-value field.
fn load(mach: &mut Machine, insn: &mut Instruction, width: MemWidth) -> Result<(), EmuError> {
    let addr = insn.val_ex;
    let result = match width {
        MemWidth::Byte => mach.mem.read_u8(addr).map(u64::from),
        MemWidth::Half => mach.mem.read_u16(addr).map(u64::from),
        MemWidth::Word => mach.mem.read_u32(addr).map(u64::from),
        MemWidth::Double => mach.mem.read_u64(addr),
    };
    match result {
        Ok(val) => {
            insn.val_mem = val;
            mach.stats.loads += 1;
            update_base(mach, insn);
            trace!(target: "armsim::memory", addr = format_args!("{addr:#x}"), val = format_args!("{val:#x}"), "load");
            Ok(())
        }
        Err(fault) => {
            insn.mem_status = Some(fault);
            Err(fault.into())
        }
    }
}

/// Shared store routine: write the second operand at the computed address,
/// truncated to the access width.
fn store(mach: &mut Machine, insn: &mut Instruction, width: MemWidth) -> Result<(), EmuError> {
    let addr = insn.val_ex;
    let val = insn.opnd2;
    let result = match width {
        MemWidth::Byte => mach.mem.write_u8(addr, val as u8),
        MemWidth::Half => mach.mem.write_u16(addr, val as u16),
        MemWidth::Word => mach.mem.write_u32(addr, val as u32),
        MemWidth::Double => mach.mem.write_u64(addr, val),
    };
    match result {
        Ok(()) => {
            mach.stats.stores += 1;
            update_base(mach, insn);
            trace!(target: "armsim::memory", addr = format_args!("{addr:#x}"), val = format_args!("{val:#x}"), "store");
            Ok(())
        }
        Err(fault) => {
            insn.mem_status = Some(fault);
            Err(fault.into())
        }
    }
}

/// Pre/post-index base-register update.
///
/// Both index modes leave the base register at base plus offset once the
/// access has completed; they differ only in which address the access
/// itself used, and execute already chose that.
fn update_base(mach: &mut Machine, insn: &Instruction) {
    if insn.wback {
        if let Some(base) = insn.src1 {
            mach.regs
                .write(base, insn.opnd1.wrapping_add(insn.imm as u64));
        }
    }
}

//! Decode stage.
//!
//! Extracts the 11-bit class key, consults the opcode table, populates the
//! decode fields for the opcode's family, and materializes the operand
//! values from the register file. Fields that have no meaning for a given
//! opcode keep their defaults.
//!
//! `NOP` carries an exact-pattern integrity check: the class key alone is
//! enough to identify it, so a word that reaches the `NOP` decode routine
//! with any other bit pattern means the table or the key extraction is
//! broken, and the run stops with an internal error.

use tracing::trace;

use crate::common::bits::{bitfield, decode_bit_masks, sign_extend};
use crate::common::constants::{INSTRUCTION_SIZE, LINK_REG, NOP_ENCODING, SF_BIT};
use crate::common::error::{EmuError, InternalError};
use crate::core::insn::AddrMode;
use crate::core::{Instruction, Machine};
use crate::isa::abi::reg_name;
use crate::isa::opcode::{Cond, Opcode};

/// Decodes the fetched word and reads its operands.
///
/// # Errors
///
/// `EmuError::Internal` when a sentinel opcode comes out of the table, a
/// fixed-pattern check fails, or a reserved immediate encoding appears
/// under a valid key.
pub fn decode_stage(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    let word = insn.insnbits as i32;
    insn.op = mach.itable.classify(insn.insnbits);
    insn.next_pc = mach.pc.wrapping_add(INSTRUCTION_SIZE);

    match insn.op {
        Opcode::Ldurb | Opcode::Ldurh | Opcode::Ldur => decode_load(mach, insn),
        Opcode::Sturb | Opcode::Sturh | Opcode::Stur => decode_store(mach, insn),
        Opcode::Movk | Opcode::Movz => decode_move_wide(mach, insn),
        Opcode::AddImm | Opcode::AddsImm | Opcode::SubImm | Opcode::SubsImm => {
            decode_arith_imm(mach, insn);
        }
        Opcode::AddReg | Opcode::AddsReg | Opcode::SubReg | Opcode::SubsReg => {
            decode_reg_reg(mach, insn)?;
        }
        Opcode::OrrImm | Opcode::EorImm | Opcode::AndImm | Opcode::AndsImm => {
            decode_logic_imm(mach, insn)?;
        }
        Opcode::OrrReg | Opcode::EorReg | Opcode::AndReg | Opcode::AndsReg => {
            decode_reg_reg(mach, insn)?;
        }
        Opcode::Mvn => decode_mvn(mach, insn)?,
        Opcode::Ubfm => decode_ubfm(mach, insn)?,
        Opcode::Asr => decode_asr(mach, insn)?,
        Opcode::B | Opcode::Bl => decode_branch_imm(mach, insn),
        Opcode::BCond => decode_bcond(mach, insn),
        Opcode::Cbz | Opcode::Cbnz => decode_compare_branch(mach, insn),
        Opcode::Tbz | Opcode::Tbnz => decode_test_branch(mach, insn),
        Opcode::Br | Opcode::Blr | Opcode::Ret => decode_branch_reg(mach, insn),
        Opcode::Nop => {
            if insn.insnbits != NOP_ENCODING {
                return Err(InternalError::DecodeIntegrity {
                    expected: NOP_ENCODING,
                    got: insn.insnbits,
                }
                .into());
            }
        }
        Opcode::Hlt => {
            insn.imm = i64::from(bitfield(word, 5, 16));
        }
        // Shift aliases are produced by the UBFM decode routine below,
        // never by the class table itself.
        Opcode::Lsl | Opcode::Lsr | Opcode::Unassigned | Opcode::Invalid => {
            return Err(InternalError::UnassignedOpcode {
                op: insn.op,
                stage: "decode",
            }
            .into());
        }
    }

    trace!(
        target: "armsim::decode",
        pc = format_args!("{:#x}", mach.pc),
        op = insn.op.mnemonic(),
        cond = insn.cond.map_or("--", Cond::mnemonic),
        dst = insn.dst.map_or_else(|| "--".into(), |r| reg_name(r, insn.is_32)),
        imm = insn.imm,
        shift = insn.shift,
    );
    Ok(())
}

fn rd(word: i32) -> u8 {
    bitfield(word, 0, 5) as u8
}

fn rn(word: i32) -> u8 {
    bitfield(word, 5, 5) as u8
}

fn rm(word: i32) -> u8 {
    bitfield(word, 16, 5) as u8
}

fn is_32(word: i32) -> bool {
    bitfield(word, SF_BIT, 1) == 0
}

fn decode_load(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.dst = Some(rd(word));
    insn.src1 = Some(rn(word));
    insn.imm = sign_extend(u64::from(bitfield(word, 12, 9)), 9);
    insn.is_32 = match insn.op {
        // Byte and half-word loads always target a W register; the
        // word/double-word form selects the width with bit 30.
        Opcode::Ldurb | Opcode::Ldurh => true,
        _ => bitfield(word, 30, 1) == 0,
    };
    insn.addr_mode = AddrMode::BasePlusOffset;
    insn.opnd1 = mach.regs.read(rn(word));
}

fn decode_store(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.src1 = Some(rn(word));
    insn.src2 = Some(rd(word));
    insn.imm = sign_extend(u64::from(bitfield(word, 12, 9)), 9);
    insn.is_32 = match insn.op {
        Opcode::Sturb | Opcode::Sturh => true,
        _ => bitfield(word, 30, 1) == 0,
    };
    insn.addr_mode = AddrMode::BasePlusOffset;
    insn.opnd1 = mach.regs.read(rn(word));
    insn.opnd2 = mach.regs.read(rd(word));
}

fn decode_move_wide(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    insn.dst = Some(rd(word));
    insn.imm = i64::from(bitfield(word, 5, 16));
    insn.shift = (bitfield(word, 21, 2) * 16) as u8;
    if insn.op == Opcode::Movk {
        // MOVK keeps the untouched lanes of the destination's prior value.
        insn.src1 = insn.dst;
        insn.opnd1 = mach.regs.read(rd(word));
    }
    insn.opnd2 = insn.imm as u64;
}

fn decode_arith_imm(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    insn.dst = Some(rd(word));
    insn.src1 = Some(rn(word));
    let imm12 = i64::from(bitfield(word, 10, 12));
    insn.imm = if bitfield(word, 22, 2) == 1 {
        imm12 << 12
    } else {
        imm12
    };
    insn.opnd1 = mach.regs.read(rn(word));
    insn.opnd2 = insn.imm as u64;
}

/// Shared by the register-register arithmetic and logical families: both
/// carry `Rm` and an optional shift amount for the second operand.
fn decode_reg_reg(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    insn.dst = Some(rd(word));
    insn.src1 = Some(rn(word));
    insn.src2 = Some(rm(word));
    if bitfield(word, 22, 2) != 0 {
        // Only the LSL shift type is in the modeled subset.
        return Err(InternalError::ReservedEncoding {
            word: insn.insnbits,
        }
        .into());
    }
    insn.shift = bitfield(word, 10, 6) as u8;
    insn.opnd1 = mach.regs.read(rn(word));
    insn.opnd2 = mach.regs.read(rm(word));
    Ok(())
}

fn decode_logic_imm(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    insn.dst = Some(rd(word));
    insn.src1 = Some(rn(word));
    let n = bitfield(word, 22, 1);
    let immr = bitfield(word, 16, 6);
    let imms = bitfield(word, 10, 6);
    let mask = decode_bit_masks(n, immr, imms, !insn.is_32).ok_or(
        InternalError::ReservedEncoding {
            word: insn.insnbits,
        },
    )?;
    insn.imm = mask as i64;
    insn.opnd1 = mach.regs.read(rn(word));
    insn.opnd2 = mask;
    Ok(())
}

fn decode_mvn(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    insn.dst = Some(rd(word));
    insn.src1 = Some(rm(word));
    if bitfield(word, 22, 2) != 0 {
        // Only the LSL shift type is in the modeled subset.
        return Err(InternalError::ReservedEncoding {
            word: insn.insnbits,
        }
        .into());
    }
    insn.shift = bitfield(word, 10, 6) as u8;
    insn.opnd1 = mach.regs.read(rm(word));
    Ok(())
}

fn decode_ubfm(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    let size = if insn.is_32 { 32 } else { 64 };
    insn.dst = Some(rd(word));
    insn.src1 = Some(rn(word));
    let immr = bitfield(word, 16, 6);
    let imms = bitfield(word, 10, 6);
    if insn.is_32 && (immr >= 32 || imms >= 32) {
        // Rotate and source fields must fit the 32-bit operation width.
        return Err(InternalError::ReservedEncoding {
            word: insn.insnbits,
        }
        .into());
    }
    if imms + 1 == size {
        insn.op = Opcode::Lsr;
        insn.shift = immr as u8;
    } else if imms + 1 == immr {
        insn.op = Opcode::Lsl;
        insn.shift = (size - 1 - imms) as u8;
    } else {
        insn.shift = immr as u8;
        insn.imm = i64::from(imms);
    }
    insn.opnd1 = mach.regs.read(rn(word));
    Ok(())
}

fn decode_asr(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    let size = if insn.is_32 { 32 } else { 64 };
    insn.dst = Some(rd(word));
    insn.src1 = Some(rn(word));
    let immr = bitfield(word, 16, 6);
    let imms = bitfield(word, 10, 6);
    if imms + 1 != size {
        // Only the ASR alias of the signed bitfield move is in the
        // modeled subset.
        return Err(InternalError::ReservedEncoding {
            word: insn.insnbits,
        }
        .into());
    }
    insn.shift = immr as u8;
    insn.opnd1 = mach.regs.read(rn(word));
    Ok(())
}

fn decode_branch_imm(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    let imm26 = sign_extend(u64::from(bitfield(word, 0, 26)), 26);
    insn.branch_pc = mach.pc.wrapping_add((imm26 as u64).wrapping_mul(4));
    if insn.op == Opcode::Bl {
        insn.dst = Some(LINK_REG);
    }
}

fn decode_bcond(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.cond = Some(Cond::from_bits(bitfield(word, 0, 4)));
    let imm19 = sign_extend(u64::from(bitfield(word, 5, 19)), 19);
    insn.branch_pc = mach.pc.wrapping_add((imm19 as u64).wrapping_mul(4));
}

fn decode_compare_branch(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.is_32 = is_32(word);
    insn.src1 = Some(rd(word));
    let imm19 = sign_extend(u64::from(bitfield(word, 5, 19)), 19);
    insn.branch_pc = mach.pc.wrapping_add((imm19 as u64).wrapping_mul(4));
    insn.opnd1 = mach.regs.read(rd(word));
}

fn decode_test_branch(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    let b5 = bitfield(word, 31, 1);
    let b40 = bitfield(word, 19, 5);
    insn.is_32 = b5 == 0;
    insn.imm = i64::from((b5 << 5) | b40);
    insn.src1 = Some(rd(word));
    let imm14 = sign_extend(u64::from(bitfield(word, 5, 14)), 14);
    insn.branch_pc = mach.pc.wrapping_add((imm14 as u64).wrapping_mul(4));
    insn.opnd1 = mach.regs.read(rd(word));
}

fn decode_branch_reg(mach: &Machine, insn: &mut Instruction) {
    let word = insn.insnbits as i32;
    insn.src1 = Some(rn(word));
    insn.opnd1 = mach.regs.read(rn(word));
    if insn.op == Opcode::Blr {
        insn.dst = Some(LINK_REG);
    }
}

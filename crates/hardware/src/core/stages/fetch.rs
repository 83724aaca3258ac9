//! Fetch stage.
//!
//! The same for all instructions: read the 32-bit word at the current PC.
//! A fetch fault is fatal to the run.

use tracing::trace;

use crate::common::error::EmuError;
use crate::core::{Instruction, Machine};

/// Fetches the instruction word at the current PC into the record.
///
/// # Errors
///
/// `EmuError::Memory` if the PC points outside memory or is misaligned.
pub fn fetch_stage(mach: &Machine, insn: &mut Instruction) -> Result<(), EmuError> {
    insn.insnbits = mach.mem.read_u32(mach.pc)?;
    trace!(target: "armsim::fetch", pc = format_args!("{:#x}", mach.pc), word = format_args!("{:#010x}", insn.insnbits));
    Ok(())
}

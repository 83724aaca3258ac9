//! General-purpose register file.
//!
//! This module implements the register file for the emulated machine. It
//! performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`X0`-`X30` plus the zero
//!    register at index 31).
//! 2. **Invariant Enforcement:** Index 31 (`XZR`/`WZR`) reads as zero and
//!    discards writes.
//! 3. **Width Views:** 64-bit and zero-extending 32-bit access paths.

use crate::common::constants::ZERO_REG;

/// General-purpose register file.
///
/// Contains 32 registers. Index 31 is the zero register: it always reads
/// as zero and cannot be modified. The program counter is held separately
/// by the machine context, matching the architecture.
#[derive(Debug)]
pub struct RegisterFile {
    regs: [u64; 32],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads the full 64-bit value of a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Index 31 always returns 0.
    pub fn read(&self, idx: u8) -> u64 {
        if idx == ZERO_REG {
            0
        } else {
            self.regs[idx as usize]
        }
    }

    /// Reads the 32-bit (`W`) view of a register, zero-extended.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Index 31 always returns 0.
    pub fn read_w(&self, idx: u8) -> u64 {
        self.read(idx) & 0xFFFF_FFFF
    }

    /// Writes the full 64-bit value of a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to index 31 are ignored.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: u8, val: u64) {
        if idx != ZERO_REG {
            self.regs[idx as usize] = val;
        }
    }

    /// Writes the 32-bit (`W`) view of a register.
    ///
    /// The upper 32 bits of the destination are cleared; a 32-bit write
    /// never leaves stale upper bits behind.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to index 31 are ignored.
    /// * `val` - Value whose low 32 bits are written.
    pub fn write_w(&mut self, idx: u8, val: u64) {
        self.write(idx, val & 0xFFFF_FFFF);
    }

    /// Dumps the contents of all registers to stderr.
    ///
    /// Useful for debugging guest programs during a run.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            eprintln!(
                "x{:<2}={:#018x} x{:<2}={:#018x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

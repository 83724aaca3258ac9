//! Opcode class table.
//!
//! Every instruction word carries an 11-bit class key in bits 21-31. The
//! table maps all 2048 possible keys to an `Opcode`, with unoccupied keys
//! holding the `Invalid` sentinel so that lookup never faults. Some
//! instruction classes interleave with others in key space (a flag bit of
//! the encoding lands inside the key), which is why the builder supports
//! stride-2 ranges in addition to single entries and contiguous ranges.
//!
//! Construction is deterministic: entries are assigned in a fixed order and
//! later assignments overwrite earlier ones, so rebuilding the table always
//! yields the same mapping.

use crate::common::bits::bitfield;
use crate::common::constants::{CLASS_KEY_BITS, CLASS_KEY_SHIFT, CLASS_TABLE_SIZE};
use crate::isa::opcode::Opcode;

/// Fixed-size mapping from 11-bit class key to opcode.
pub struct OpcodeTable {
    entries: Box<[Opcode; CLASS_TABLE_SIZE]>,
}

impl std::fmt::Debug for OpcodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpcodeTable").finish_non_exhaustive()
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpcodeTable {
    /// Builds the fully populated table.
    pub fn new() -> Self {
        let mut t = Self {
            entries: Box::new([Opcode::Invalid; CLASS_TABLE_SIZE]),
        };

        // Unscaled loads/stores: the two LDUR/STUR entries differ in the
        // size bit that selects the W or X form.
        t.entry(Opcode::Ldurb, 0x1C2);
        t.entry(Opcode::Ldurh, 0x3C2);
        t.entry(Opcode::Ldur, 0x5C2);
        t.entry(Opcode::Ldur, 0x7C2);
        t.entry(Opcode::Sturb, 0x1C0);
        t.entry(Opcode::Sturh, 0x3C0);
        t.entry(Opcode::Stur, 0x5C0);
        t.entry(Opcode::Stur, 0x7C0);
        t.range(Opcode::Movk, 0x394, 0x397);
        t.range(Opcode::Movk, 0x794, 0x797);
        t.range(Opcode::Movz, 0x294, 0x297);
        t.range(Opcode::Movz, 0x694, 0x697);
        t.range(Opcode::AddImm, 0x088, 0x08B);
        t.range(Opcode::AddImm, 0x488, 0x48B);
        t.range(Opcode::AddReg, 0x058, 0x05F);
        t.range(Opcode::AddReg, 0x458, 0x45F);
        t.range(Opcode::AddsImm, 0x188, 0x18B);
        t.range(Opcode::AddsImm, 0x588, 0x58B);
        t.range(Opcode::AddsReg, 0x1A8, 0x1AF);
        t.range(Opcode::AddsReg, 0x5A8, 0x5AF);
        t.range(Opcode::SubImm, 0x288, 0x28B);
        t.range(Opcode::SubImm, 0x688, 0x68B);
        t.range(Opcode::SubReg, 0x258, 0x25F);
        t.range(Opcode::SubReg, 0x658, 0x65F);
        t.range(Opcode::SubsImm, 0x388, 0x38B);
        t.range(Opcode::SubsImm, 0x788, 0x78B);
        t.range(Opcode::SubsReg, 0x358, 0x35F);
        t.range(Opcode::SubsReg, 0x758, 0x75F);
        t.range_step2(Opcode::Mvn, 0x151, 0x157);
        t.range_step2(Opcode::Mvn, 0x551, 0x557);
        t.range(Opcode::OrrImm, 0x190, 0x193);
        t.range(Opcode::OrrImm, 0x590, 0x593);
        t.range_step2(Opcode::OrrReg, 0x150, 0x156);
        t.range_step2(Opcode::OrrReg, 0x550, 0x556);
        t.range(Opcode::EorImm, 0x290, 0x293);
        t.range(Opcode::EorImm, 0x690, 0x693);
        t.range_step2(Opcode::EorReg, 0x250, 0x256);
        t.range_step2(Opcode::EorReg, 0x650, 0x656);
        t.range(Opcode::AndImm, 0x090, 0x093);
        t.range(Opcode::AndImm, 0x490, 0x493);
        t.range_step2(Opcode::AndReg, 0x050, 0x056);
        t.range_step2(Opcode::AndReg, 0x450, 0x456);
        t.range(Opcode::AndsImm, 0x390, 0x393);
        t.range(Opcode::AndsImm, 0x790, 0x793);
        t.range_step2(Opcode::AndsReg, 0x350, 0x356);
        t.range_step2(Opcode::AndsReg, 0x750, 0x756);
        t.range(Opcode::Ubfm, 0x298, 0x29B);
        t.range(Opcode::Ubfm, 0x698, 0x69B);
        t.range(Opcode::Asr, 0x098, 0x09B);
        t.range(Opcode::Asr, 0x498, 0x49B);
        t.range(Opcode::B, 0x0A0, 0x0BF);
        t.entry(Opcode::Br, 0x6B0);
        t.range(Opcode::BCond, 0x2A0, 0x2A7);
        // CBZ/CBNZ share key space with the flag-setting add,
        // register-register form; the compare-and-branch classes win.
        t.range(Opcode::Cbnz, 0x1A8, 0x1AF);
        t.range(Opcode::Cbnz, 0x5A8, 0x5AF);
        t.range(Opcode::Cbz, 0x1A0, 0x1A7);
        t.range(Opcode::Cbz, 0x5A0, 0x5A7);
        t.range(Opcode::Tbnz, 0x1B8, 0x1BF);
        t.range(Opcode::Tbnz, 0x5B8, 0x5BF);
        t.range(Opcode::Tbz, 0x1B0, 0x1B7);
        t.range(Opcode::Tbz, 0x5B0, 0x5B7);
        t.range(Opcode::Bl, 0x4A0, 0x4BF);
        t.entry(Opcode::Blr, 0x6B1);
        t.entry(Opcode::Ret, 0x6B2);
        t.entry(Opcode::Nop, 0x6A8);
        t.entry(Opcode::Hlt, 0x6A2);

        t
    }

    fn entry(&mut self, op: Opcode, key: usize) {
        self.entries[key] = op;
    }

    fn range(&mut self, op: Opcode, lo: usize, hi: usize) {
        for key in lo..=hi {
            self.entries[key] = op;
        }
    }

    fn range_step2(&mut self, op: Opcode, lo: usize, hi: usize) {
        for key in (lo..=hi).step_by(2) {
            self.entries[key] = op;
        }
    }

    /// Looks up the opcode for a class key.
    ///
    /// # Arguments
    ///
    /// * `key` - The 11-bit class key; only the low 11 bits are used, so
    ///   lookup never faults.
    pub fn lookup(&self, key: u32) -> Opcode {
        self.entries[(key as usize) & (CLASS_TABLE_SIZE - 1)]
    }

    /// Extracts the class key from an instruction word and looks it up.
    ///
    /// # Arguments
    ///
    /// * `word` - The raw 32-bit instruction word.
    pub fn classify(&self, word: u32) -> Opcode {
        self.lookup(bitfield(word as i32, CLASS_KEY_SHIFT, CLASS_KEY_BITS))
    }
}

//! NZCV condition flags.
//!
//! Flag-setting arithmetic and logical instructions produce a flags value
//! at execute; writeback commits it to the machine. Conditional branches
//! evaluate their condition against the committed flags.

use std::fmt;

use crate::isa::opcode::Cond;

/// The four condition flags produced by flag-setting operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Negative: the result's sign bit (per operation width).
    pub n: bool,
    /// Zero: the result is zero (per operation width).
    pub z: bool,
    /// Carry: unsigned overflow on add, absence of borrow on subtract.
    pub c: bool,
    /// Overflow: signed overflow.
    pub v: bool,
}

impl Flags {
    /// Evaluates a branch condition against these flags.
    ///
    /// # Arguments
    ///
    /// * `cond` - The decoded branch condition.
    ///
    /// # Returns
    ///
    /// Whether the condition holds. `AL` and `NV` both evaluate true, per
    /// the architecture.
    pub fn satisfies(self, cond: Cond) -> bool {
        match cond {
            Cond::Eq => self.z,
            Cond::Ne => !self.z,
            Cond::Cs => self.c,
            Cond::Cc => !self.c,
            Cond::Mi => self.n,
            Cond::Pl => !self.n,
            Cond::Vs => self.v,
            Cond::Vc => !self.v,
            Cond::Hi => self.c && !self.z,
            Cond::Ls => !(self.c && !self.z),
            Cond::Ge => self.n == self.v,
            Cond::Lt => self.n != self.v,
            Cond::Gt => !self.z && self.n == self.v,
            Cond::Le => self.z || self.n != self.v,
            Cond::Al | Cond::Nv => true,
        }
    }
}

impl fmt::Display for Flags {
    /// Renders the flags as `nzcv` with set flags in upper case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.n { 'N' } else { 'n' },
            if self.z { 'Z' } else { 'z' },
            if self.c { 'C' } else { 'c' },
            if self.v { 'V' } else { 'v' },
        )
    }
}

//! Opcode and branch-condition enumerations.
//!
//! `Opcode` is the closed set of instruction classes the emulator models,
//! plus two sentinels: `Unassigned` (a freshly created instruction record
//! that has not been decoded) and `Invalid` (the decode-error table entry).
//! Either sentinel reaching a stage dispatcher is an internal-consistency
//! failure, not a guest-visible condition.

/// Symbolic instruction classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Load unscaled register byte.
    Ldurb,
    /// Load unscaled register half-word.
    Ldurh,
    /// Load unscaled register word or double-word.
    Ldur,
    /// Store unscaled register byte.
    Sturb,
    /// Store unscaled register half-word.
    Sturh,
    /// Store unscaled register word or double-word.
    Stur,
    /// Move wide immediate, keeping other bits.
    Movk,
    /// Move wide immediate, zeroing other bits.
    Movz,
    /// Add immediate.
    AddImm,
    /// Add shifted register.
    AddReg,
    /// Add immediate, setting flags.
    AddsImm,
    /// Add shifted register, setting flags.
    AddsReg,
    /// Subtract immediate.
    SubImm,
    /// Subtract shifted register.
    SubReg,
    /// Subtract immediate, setting flags.
    SubsImm,
    /// Subtract shifted register, setting flags.
    SubsReg,
    /// Bitwise NOT of a shifted register.
    Mvn,
    /// Bitwise OR with a bitmask immediate.
    OrrImm,
    /// Bitwise OR with a shifted register.
    OrrReg,
    /// Bitwise exclusive OR with a bitmask immediate.
    EorImm,
    /// Bitwise exclusive OR with a shifted register.
    EorReg,
    /// Bitwise AND with a bitmask immediate.
    AndImm,
    /// Bitwise AND with a shifted register.
    AndReg,
    /// Bitwise AND with a bitmask immediate, setting flags.
    AndsImm,
    /// Bitwise AND with a shifted register, setting flags.
    AndsReg,
    /// Logical shift left (alias of `Ubfm`, recognized at decode).
    Lsl,
    /// Logical shift right (alias of `Ubfm`, recognized at decode).
    Lsr,
    /// Unsigned bitfield move; the general operation both logical shifts
    /// reduce to.
    Ubfm,
    /// Arithmetic shift right.
    Asr,
    /// Unconditional PC-relative branch.
    B,
    /// Unconditional register-indirect branch.
    Br,
    /// Conditional PC-relative branch.
    BCond,
    /// Compare and branch if not zero.
    Cbnz,
    /// Compare and branch if zero.
    Cbz,
    /// Test bit and branch if not zero.
    Tbnz,
    /// Test bit and branch if zero.
    Tbz,
    /// PC-relative branch with link.
    Bl,
    /// Register-indirect branch with link.
    Blr,
    /// Return (register-indirect branch, conventionally through `X30`).
    Ret,
    /// No operation.
    Nop,
    /// Halt the emulated run.
    Hlt,
    /// Sentinel: instruction record not yet decoded.
    #[default]
    Unassigned,
    /// Sentinel: no instruction class occupies this table entry.
    Invalid,
}

impl Opcode {
    /// Whether this opcode commits a flags value at writeback.
    pub fn sets_flags(self) -> bool {
        matches!(
            self,
            Self::AddsImm | Self::AddsReg | Self::SubsImm | Self::SubsReg | Self::AndsImm | Self::AndsReg
        )
    }

    /// Mnemonic for trace output.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Ldurb => "ldurb",
            Self::Ldurh => "ldurh",
            Self::Ldur => "ldur",
            Self::Sturb => "sturb",
            Self::Sturh => "sturh",
            Self::Stur => "stur",
            Self::Movk => "movk",
            Self::Movz => "movz",
            Self::AddImm | Self::AddReg => "add",
            Self::AddsImm | Self::AddsReg => "adds",
            Self::SubImm | Self::SubReg => "sub",
            Self::SubsImm | Self::SubsReg => "subs",
            Self::Mvn => "mvn",
            Self::OrrImm | Self::OrrReg => "orr",
            Self::EorImm | Self::EorReg => "eor",
            Self::AndImm | Self::AndReg => "and",
            Self::AndsImm | Self::AndsReg => "ands",
            Self::Lsl => "lsl",
            Self::Lsr => "lsr",
            Self::Ubfm => "ubfm",
            Self::Asr => "asr",
            Self::B => "b",
            Self::Br => "br",
            Self::BCond => "b.cond",
            Self::Cbnz => "cbnz",
            Self::Cbz => "cbz",
            Self::Tbnz => "tbnz",
            Self::Tbz => "tbz",
            Self::Bl => "bl",
            Self::Blr => "blr",
            Self::Ret => "ret",
            Self::Nop => "nop",
            Self::Hlt => "hlt",
            Self::Unassigned => "<unassigned>",
            Self::Invalid => "<invalid>",
        }
    }
}

/// The 16 architectural branch conditions.
///
/// Decoded from a 4-bit field, which makes the decoding total; an
/// instruction record with no condition carries `Option<Cond>::None`
/// instead of an in-band error value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    /// Equal (Z set).
    Eq,
    /// Not equal (Z clear).
    Ne,
    /// Carry set / unsigned higher or same.
    Cs,
    /// Carry clear / unsigned lower.
    Cc,
    /// Minus / negative (N set).
    Mi,
    /// Plus / positive or zero (N clear).
    Pl,
    /// Overflow set.
    Vs,
    /// Overflow clear.
    Vc,
    /// Unsigned higher.
    Hi,
    /// Unsigned lower or same.
    Ls,
    /// Signed greater than or equal.
    Ge,
    /// Signed less than.
    Lt,
    /// Signed greater than.
    Gt,
    /// Signed less than or equal.
    Le,
    /// Always.
    Al,
    /// Always (the architecture gives `NV` the same truth value as `AL`).
    Nv,
}

impl Cond {
    /// Decodes a condition from its 4-bit encoding.
    ///
    /// # Arguments
    ///
    /// * `bits` - The condition field; only the low 4 bits are meaningful.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0xF {
            0x0 => Self::Eq,
            0x1 => Self::Ne,
            0x2 => Self::Cs,
            0x3 => Self::Cc,
            0x4 => Self::Mi,
            0x5 => Self::Pl,
            0x6 => Self::Vs,
            0x7 => Self::Vc,
            0x8 => Self::Hi,
            0x9 => Self::Ls,
            0xA => Self::Ge,
            0xB => Self::Lt,
            0xC => Self::Gt,
            0xD => Self::Le,
            0xE => Self::Al,
            _ => Self::Nv,
        }
    }

    /// Mnemonic suffix for trace output.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Cs => "cs",
            Self::Cc => "cc",
            Self::Mi => "mi",
            Self::Pl => "pl",
            Self::Vs => "vs",
            Self::Vc => "vc",
            Self::Hi => "hi",
            Self::Ls => "ls",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Al => "al",
            Self::Nv => "nv",
        }
    }
}

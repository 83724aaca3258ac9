//! Global emulator constants.
//!
//! This module defines system-wide constants used across the emulator:
//! instruction geometry, opcode class-key extraction parameters, and
//! well-known fixed encodings.

/// Size of an instruction in bytes; every instruction is one 32-bit word.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Bit position of the least significant bit of the opcode class key.
pub const CLASS_KEY_SHIFT: u32 = 21;

/// Width of the opcode class key in bits.
pub const CLASS_KEY_BITS: u32 = 11;

/// Number of entries in the opcode class table (`2^CLASS_KEY_BITS`).
pub const CLASS_TABLE_SIZE: usize = 1 << CLASS_KEY_BITS;

/// The canonical `NOP` encoding; decode validates this exact bit pattern.
pub const NOP_ENCODING: u32 = 0xD503_201F;

/// Bit position of the `sf` (64-bit width select) flag.
pub const SF_BIT: u32 = 31;

/// Register index of the link register (`X30`).
pub const LINK_REG: u8 = 30;

/// Register index of the zero register (`XZR`/`WZR`).
pub const ZERO_REG: u8 = 31;

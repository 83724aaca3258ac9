//! Architectural state of the emulated machine.
//!
//! This module holds the register-file and condition-flag models:
//! 1. **Registers:** 32 × 64-bit general-purpose registers with the zero
//!    register hardwired at index 31.
//! 2. **Flags:** The NZCV condition flags and their evaluation against the
//!    16 architectural branch conditions.

/// Condition flags (NZCV) and condition evaluation.
pub mod flags;

/// General-purpose register file.
pub mod gpr;

pub use flags::Flags;
pub use gpr::RegisterFile;

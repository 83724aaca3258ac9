//! Instruction-set definitions.
//!
//! This module holds everything that is a property of the instruction set
//! rather than of the machine:
//! 1. **Opcodes:** The closed enumeration of instruction classes and the 16
//!    branch conditions.
//! 2. **Class Table:** The 11-bit-key lookup table mapping encoding classes
//!    to opcodes.
//! 3. **ABI:** Register naming conventions for trace output.

/// Register ABI names for trace output.
pub mod abi;

/// Opcode class table construction and lookup.
pub mod itable;

/// Opcode and branch-condition enumerations.
pub mod opcode;

pub use itable::OpcodeTable;
pub use opcode::{Cond, Opcode};

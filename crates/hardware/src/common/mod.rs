//! Common utilities and types used throughout the emulator.
//!
//! This module provides the fundamental building blocks shared across all
//! components. It includes:
//! 1. **Bit Extraction:** Field extraction from 32-bit instruction words,
//!    sign extension, and bitmask-immediate expansion.
//! 2. **Constants:** Instruction width, class-key geometry, and well-known
//!    encodings.
//! 3. **Error Handling:** Memory fault and internal-consistency error types.

/// Bitfield extraction and immediate expansion helpers.
pub mod bits;

/// System-wide constants.
pub mod constants;

/// Error types for memory faults and internal-consistency failures.
pub mod error;

pub use bits::{bitfield, sign_extend};
pub use error::{EmuError, InternalError, MemFault};

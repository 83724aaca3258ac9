//! ALU operations.
//!
//! Pure value-level arithmetic, logic, and shift helpers used by the
//! execute dispatcher. Every helper honors the 32-bit/64-bit width flag:
//! 32-bit results are masked to their low 32 bits so a later register
//! write zero-extends cleanly, and flags are computed at the operation
//! width.

pub mod arithmetic;
pub mod logic;
pub mod shifts;

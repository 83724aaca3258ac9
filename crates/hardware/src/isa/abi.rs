//! Register ABI names.
//!
//! Naming helpers for trace output. The procedure-call convention is not
//! enforced by the emulator; only the link register and the zero register
//! have architectural meaning here.

use crate::common::constants::{LINK_REG, ZERO_REG};

/// Returns the conventional name of a register for the given width.
///
/// # Arguments
///
/// * `idx` - Register index (0-31).
/// * `is_32` - Whether the 32-bit (`W`) view is in use.
pub fn reg_name(idx: u8, is_32: bool) -> String {
    if idx == ZERO_REG {
        return if is_32 { "wzr".into() } else { "xzr".into() };
    }
    if idx == LINK_REG && !is_32 {
        return "lr".into();
    }
    if is_32 {
        format!("w{idx}")
    } else {
        format!("x{idx}")
    }
}

//! Bitwise operations and their flag outputs.

use crate::arch::Flags;

#[inline]
fn narrow(val: u64, is_32: bool) -> u64 {
    if is_32 { val & 0xFFFF_FFFF } else { val }
}

/// Bitwise AND at the operation width.
pub fn and(a: u64, b: u64, is_32: bool) -> u64 {
    narrow(a & b, is_32)
}

/// Bitwise OR at the operation width.
pub fn orr(a: u64, b: u64, is_32: bool) -> u64 {
    narrow(a | b, is_32)
}

/// Bitwise exclusive OR at the operation width.
pub fn eor(a: u64, b: u64, is_32: bool) -> u64 {
    narrow(a ^ b, is_32)
}

/// Bitwise NOT at the operation width.
pub fn not(a: u64, is_32: bool) -> u64 {
    narrow(!a, is_32)
}

/// NZCV for a flag-setting logical operation.
///
/// N and Z are taken from the width-masked result; carry and overflow are
/// always clear.
pub fn nz_flags(result: u64, is_32: bool) -> Flags {
    let n = if is_32 {
        (result as u32 as i32) < 0
    } else {
        (result as i64) < 0
    };
    Flags {
        n,
        z: narrow(result, is_32) == 0,
        c: false,
        v: false,
    }
}

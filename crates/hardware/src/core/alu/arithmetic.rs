//! Integer addition and subtraction, with and without flag outputs.

use crate::arch::Flags;

/// Masks a value to the operation width.
#[inline]
fn narrow(val: u64, is_32: bool) -> u64 {
    if is_32 { val & 0xFFFF_FFFF } else { val }
}

/// Wrapping addition at the operation width.
pub fn add(a: u64, b: u64, is_32: bool) -> u64 {
    narrow(a.wrapping_add(b), is_32)
}

/// Wrapping subtraction at the operation width.
pub fn sub(a: u64, b: u64, is_32: bool) -> u64 {
    narrow(a.wrapping_sub(b), is_32)
}

/// Addition producing NZCV.
///
/// Carry is unsigned overflow; overflow is signed overflow, both at the
/// operation width.
pub fn add_with_flags(a: u64, b: u64, is_32: bool) -> (u64, Flags) {
    if is_32 {
        let (r, c) = (a as u32).overflowing_add(b as u32);
        let (_, v) = (a as u32 as i32).overflowing_add(b as u32 as i32);
        let flags = Flags {
            n: (r as i32) < 0,
            z: r == 0,
            c,
            v,
        };
        (u64::from(r), flags)
    } else {
        let (r, c) = a.overflowing_add(b);
        let (_, v) = (a as i64).overflowing_add(b as i64);
        let flags = Flags {
            n: (r as i64) < 0,
            z: r == 0,
            c,
            v,
        };
        (r, flags)
    }
}

/// Subtraction producing NZCV.
///
/// Carry is set when no borrow occurs (`a >= b` unsigned), matching the
/// architectural convention for compare.
pub fn sub_with_flags(a: u64, b: u64, is_32: bool) -> (u64, Flags) {
    if is_32 {
        let (r, borrow) = (a as u32).overflowing_sub(b as u32);
        let (_, v) = (a as u32 as i32).overflowing_sub(b as u32 as i32);
        let flags = Flags {
            n: (r as i32) < 0,
            z: r == 0,
            c: !borrow,
            v,
        };
        (u64::from(r), flags)
    } else {
        let (r, borrow) = a.overflowing_sub(b);
        let (_, v) = (a as i64).overflowing_sub(b as i64);
        let flags = Flags {
            n: (r as i64) < 0,
            z: r == 0,
            c: !borrow,
            v,
        };
        (r, flags)
    }
}

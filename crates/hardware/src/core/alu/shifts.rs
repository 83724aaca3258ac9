//! Shifts and the general unsigned bitfield move.
//!
//! `LSL` and `LSR` are aliases of `UBFM` recognized at decode; the general
//! form handles the remaining extract/insert encodings. All helpers mask
//! results to the operation width.

#[inline]
fn width(is_32: bool) -> u32 {
    if is_32 { 32 } else { 64 }
}

#[inline]
fn narrow(val: u64, is_32: bool) -> u64 {
    if is_32 { val & 0xFFFF_FFFF } else { val }
}

/// Logical shift left at the operation width.
///
/// Shift amounts at or beyond the width produce zero.
pub fn lsl(val: u64, amount: u32, is_32: bool) -> u64 {
    if amount >= width(is_32) {
        return 0;
    }
    narrow(val << amount, is_32)
}

/// Logical shift right at the operation width.
pub fn lsr(val: u64, amount: u32, is_32: bool) -> u64 {
    if amount >= width(is_32) {
        return 0;
    }
    narrow(val, is_32) >> amount
}

/// Arithmetic shift right at the operation width.
///
/// The sign bit of the operation width is replicated into the vacated
/// positions; 32-bit results stay masked to 32 bits.
pub fn asr(val: u64, amount: u32, is_32: bool) -> u64 {
    let w = width(is_32);
    let amount = amount.min(w - 1);
    if is_32 {
        (((val as u32 as i32) >> amount) as u32).into()
    } else {
        ((val as i64) >> amount) as u64
    }
}

/// General unsigned bitfield move.
///
/// With `imms >= immr` this extracts bits `[immr, imms]` into the low bits
/// of the result (`UBFX`); otherwise it inserts the low `imms + 1` bits at
/// position `width - immr` (`UBFIZ`).
pub fn ubfm(val: u64, immr: u32, imms: u32, is_32: bool) -> u64 {
    let w = width(is_32);
    let val = narrow(val, is_32);
    if imms >= immr {
        let bits = imms - immr + 1;
        let mask = if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 };
        (val >> immr) & mask
    } else {
        let bits = imms + 1;
        let mask = (1u64 << bits) - 1;
        narrow((val & mask) << (w - immr), is_32)
    }
}

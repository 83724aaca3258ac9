//! Bit extraction helpers.
//!
//! Foundation for all instruction decoding: unsigned bitfield extraction
//! from a signed 32-bit word, sign extension of decoded immediates, and the
//! A64 bitmask-immediate expansion used by the logical-immediate and
//! bitfield-move instruction families.

/// Extracts the unsigned value of bits `[frompos, frompos + width)` from a
/// 32-bit instruction word.
///
/// The word is taken as `i32` to match the architectural encoding rules; the
/// extraction itself is unsigned. Widths from 1 to 32 are valid. The
/// arithmetic goes through `u64` so that `width == 32` never shifts a value
/// by its own bit width.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction word.
/// * `frompos` - Bit position of the least significant bit of the field.
/// * `width` - Field width in bits (1..=32); `frompos + width` must not
///   exceed 32.
///
/// # Returns
///
/// The extracted field, right-aligned and zero-extended.
#[inline]
pub fn bitfield(word: i32, frompos: u32, width: u32) -> u32 {
    debug_assert!(width >= 1 && frompos + width <= 32);
    let mask = (1u64 << width) - 1;
    (((word as u32 as u64) >> frompos) & mask) as u32
}

/// Sign-extends the low `bits` bits of `value` to a signed 64-bit integer.
///
/// # Arguments
///
/// * `value` - Raw field value with meaningful data in its low `bits` bits.
/// * `bits` - Number of meaningful bits (1..=64).
///
/// # Returns
///
/// The field interpreted as a two's-complement `bits`-bit value.
#[inline]
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    debug_assert!(bits >= 1 && bits <= 64);
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Expands an A64 bitmask immediate from its `N:immr:imms` encoding.
///
/// Logical-immediate instructions encode their operand as a pattern of
/// `imms + 1` ones, rotated right by `immr` within an element of
/// `2^len` bits and replicated across the register. Returns `None` for
/// reserved encodings (all-ones element, or a 64-bit element in a 32-bit
/// operation), which a valid instruction stream never produces.
///
/// # Arguments
///
/// * `n` - The N bit of the encoding (0 or 1).
/// * `immr` - 6-bit rotation field.
/// * `imms` - 6-bit size/length field.
/// * `is_64` - Whether the operation uses the full 64-bit register width.
///
/// # Returns
///
/// The expanded immediate, masked to 32 bits when `is_64` is false, or
/// `None` for a reserved encoding.
pub fn decode_bit_masks(n: u32, immr: u32, imms: u32, is_64: bool) -> Option<u64> {
    let combined = (n << 6) | (!imms & 0x3F);
    if combined == 0 {
        return None;
    }
    let len = 63 - u64::from(combined).leading_zeros();
    let esize = 1u32 << len;
    if esize == 64 && !is_64 {
        return None;
    }

    let levels = esize - 1;
    let s = imms & levels;
    let r = immr & levels;
    if s == levels {
        // An all-ones element is reserved (it would encode a full-width
        // immediate better expressed by other instructions).
        return None;
    }

    let ones = s + 1;
    let elem_mask = if esize == 64 {
        u64::MAX
    } else {
        (1u64 << esize) - 1
    };
    let mut pattern = (1u64 << ones) - 1;
    if r != 0 {
        pattern = ((pattern >> r) | (pattern << (esize - r))) & elem_mask;
    }

    // Replicate the element across the 64-bit width.
    let mut wmask = 0u64;
    let mut shift = 0u32;
    while shift < 64 {
        wmask |= pattern << shift;
        shift += esize;
    }

    if is_64 { Some(wmask) } else { Some(wmask & 0xFFFF_FFFF) }
}

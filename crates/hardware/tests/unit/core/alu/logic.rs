//! Bitwise operations and the NZ flag rule for flag-setting logic.

use armsim_core::core::alu::logic::{and, eor, not, nz_flags, orr};
use pretty_assertions::assert_eq;

const A: u64 = 0xAAAA_AAAA_AAAA_AAAA;
const FIVES: u64 = 0x5555_5555_5555_5555;

#[test]
fn and_orr_eor_basics() {
    assert_eq!(and(A, FIVES, false), 0);
    assert_eq!(orr(A, FIVES, false), u64::MAX);
    assert_eq!(eor(u64::MAX, FIVES, false), A);
}

#[test]
fn logic_masks_to_32_bits() {
    assert_eq!(orr(A, FIVES, true), 0xFFFF_FFFF);
    assert_eq!(not(0, true), 0xFFFF_FFFF);
}

#[test]
fn not_inverts_full_width() {
    assert_eq!(not(FIVES, false), A);
}

#[test]
fn nz_flags_zero_result() {
    let f = nz_flags(0, false);
    assert!(f.z);
    assert!(!f.n);
    assert!(!f.c);
    assert!(!f.v);
}

#[test]
fn nz_flags_negative_at_operation_width() {
    // Bit 31 is the sign in 32-bit mode, bit 63 in 64-bit mode.
    assert!(nz_flags(0x8000_0000, true).n);
    assert!(!nz_flags(0x8000_0000, false).n);
    assert!(nz_flags(0x8000_0000_0000_0000, false).n);
}

#[test]
fn nz_flags_ignores_upper_bits_in_32_bit_mode() {
    let f = nz_flags(0xFFFF_FFFF_0000_0000, true);
    assert!(f.z);
}

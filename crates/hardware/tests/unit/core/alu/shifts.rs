//! Shift semantics, including over-width amounts and the bitfield move.

use armsim_core::core::alu::shifts::{asr, lsl, lsr, ubfm};
use pretty_assertions::assert_eq;

#[test]
fn lsl_basic() {
    assert_eq!(lsl(1, 4, false), 16);
    assert_eq!(lsl(1, 63, false), 0x8000_0000_0000_0000);
}

#[test]
fn lsl_at_or_beyond_width_is_zero() {
    assert_eq!(lsl(1, 64, false), 0);
    assert_eq!(lsl(1, 32, true), 0);
}

#[test]
fn lsl_masks_32_bit_result() {
    assert_eq!(lsl(0xFFFF_FFFF, 4, true), 0xFFFF_FFF0);
}

#[test]
fn lsr_basic() {
    assert_eq!(lsr(16, 4, false), 1);
    assert_eq!(lsr(u64::MAX, 63, false), 1);
}

#[test]
fn lsr_32_bit_ignores_upper_bits() {
    assert_eq!(lsr(0xFFFF_FFFF_0000_0010, 4, true), 1);
}

#[test]
fn asr_replicates_sign_bit() {
    assert_eq!(asr(0x8000_0000_0000_0000, 63, false), u64::MAX);
    assert_eq!(asr(0x4000_0000_0000_0000, 62, false), 1);
}

#[test]
fn asr_32_bit_sign_is_bit_31() {
    assert_eq!(asr(0x8000_0000, 31, true), 0xFFFF_FFFF);
    assert_eq!(asr(0x8000_0000, 4, true), 0xF800_0000);
}

#[test]
fn ubfm_extract_form() {
    // imms >= immr extracts bits [immr, imms].
    assert_eq!(ubfm(0xABCD, 4, 11, false), 0xBC);
}

#[test]
fn ubfm_insert_form() {
    // imms < immr inserts the low imms+1 bits at width - immr.
    assert_eq!(ubfm(0b111, 60, 2, false), 0b111 << 4);
}

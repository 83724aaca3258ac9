//! Condition-code decoding and evaluation.

use armsim_core::arch::Flags;
use armsim_core::isa::Cond;
use rstest::rstest;

fn flags(n: bool, z: bool, c: bool, v: bool) -> Flags {
    Flags { n, z, c, v }
}

#[test]
fn from_bits_is_total_over_four_bits() {
    assert_eq!(Cond::from_bits(0x0), Cond::Eq);
    assert_eq!(Cond::from_bits(0xE), Cond::Al);
    assert_eq!(Cond::from_bits(0xF), Cond::Nv);
    // Only the low four bits participate.
    assert_eq!(Cond::from_bits(0x10), Cond::Eq);
}

#[rstest]
#[case(Cond::Eq, flags(false, true, false, false), true)]
#[case(Cond::Eq, flags(false, false, false, false), false)]
#[case(Cond::Ne, flags(false, false, false, false), true)]
#[case(Cond::Cs, flags(false, false, true, false), true)]
#[case(Cond::Cc, flags(false, false, true, false), false)]
#[case(Cond::Mi, flags(true, false, false, false), true)]
#[case(Cond::Pl, flags(true, false, false, false), false)]
#[case(Cond::Vs, flags(false, false, false, true), true)]
#[case(Cond::Vc, flags(false, false, false, true), false)]
#[case(Cond::Hi, flags(false, false, true, false), true)]
#[case(Cond::Hi, flags(false, true, true, false), false)]
#[case(Cond::Ls, flags(false, true, true, false), true)]
#[case(Cond::Ge, flags(true, false, false, true), true)]
#[case(Cond::Ge, flags(true, false, false, false), false)]
#[case(Cond::Lt, flags(true, false, false, false), true)]
#[case(Cond::Gt, flags(false, false, false, false), true)]
#[case(Cond::Gt, flags(false, true, false, false), false)]
#[case(Cond::Le, flags(false, true, false, false), true)]
#[case(Cond::Al, flags(false, false, false, false), true)]
#[case(Cond::Nv, flags(true, true, true, true), true)]
fn satisfies_matches_architecture(#[case] cond: Cond, #[case] f: Flags, #[case] expected: bool) {
    assert_eq!(f.satisfies(cond), expected, "{cond:?} on {f}");
}

//! Whole-program execution through the full stage sequence.

use armsim_core::core::StepOutcome;
use pretty_assertions::assert_eq;

use crate::common::encoder::{self, W, X};
use crate::common::harness::{TestContext, PROG_BASE};

#[test]
fn sequential_instructions_advance_pc_by_four() {
    let mut ctx = TestContext::new().load_program(&[encoder::nop(), encoder::nop(), encoder::hlt(0)]);
    assert_eq!(ctx.machine().pc, PROG_BASE);
    ctx.step();
    assert_eq!(ctx.machine().pc, PROG_BASE + 4);
    ctx.step();
    assert_eq!(ctx.machine().pc, PROG_BASE + 8);
}

#[test]
fn halt_ends_the_run_with_its_immediate() {
    let mut ctx = TestContext::new().load_program(&[encoder::hlt(0x2A)]);
    assert_eq!(ctx.step(), StepOutcome::Halt(0x2A));
    // The PC stays on the halt; nothing past it is fetched.
    assert_eq!(ctx.machine().pc, PROG_BASE);
    assert_eq!(ctx.machine().stats.retired, 1);
}

#[test]
fn store_byte_load_byte_roundtrip_zero_extends() {
    let data = PROG_BASE + 0x200;
    let mut ctx = TestContext::new().load_program(&[
        encoder::sturb(2, 1, 0),
        encoder::ldurb(3, 1, 0),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, data);
    ctx.set_reg(2, 0x7F);
    ctx.set_reg(3, u64::MAX);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(3), 0x7F);
    assert_eq!(ctx.machine().stats.loads, 1);
    assert_eq!(ctx.machine().stats.stores, 1);
}

#[test]
fn store_load_roundtrip_all_widths() {
    let data = PROG_BASE + 0x200;
    let mut ctx = TestContext::new().load_program(&[
        encoder::stur(X, 2, 1, 0),
        encoder::ldurh(3, 1, 0),
        encoder::ldur(W, 4, 1, 0),
        encoder::ldur(X, 5, 1, 0),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, data);
    ctx.set_reg(2, 0x1122_3344_5566_7788);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(3), 0x7788);
    assert_eq!(ctx.get_reg(4), 0x5566_7788);
    assert_eq!(ctx.get_reg(5), 0x1122_3344_5566_7788);
}

#[test]
fn adds_immediate_writes_result_and_flags() {
    let mut ctx = TestContext::new().load_program(&[encoder::adds_imm(X, 2, 1, 10), encoder::hlt(0)]);
    ctx.set_reg(1, 5);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 15);
    let flags = ctx.machine().flags;
    assert!(!flags.z);
    assert!(!flags.n);
}

#[test]
fn adds_32_bit_overflow_sets_v_flag() {
    let mut ctx = TestContext::new().load_program(&[encoder::adds_imm(W, 2, 1, 1), encoder::hlt(0)]);
    ctx.set_reg(1, 0x7FFF_FFFF);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0x8000_0000);
    assert!(ctx.machine().flags.v);
    assert!(ctx.machine().flags.n);
}

#[test]
fn non_flag_setting_add_preserves_flags() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::subs_imm(X, 0, 0, 0), // sets Z
        encoder::add_imm(X, 2, 1, 1),
        encoder::hlt(0),
    ]);
    ctx.run_to_halt();
    assert!(ctx.machine().flags.z);
}

#[test]
fn w_form_result_is_zero_extended() {
    let mut ctx = TestContext::new().load_program(&[encoder::add_imm(W, 2, 1, 1), encoder::hlt(0)]);
    ctx.set_reg(1, 0xFFFF_FFFF_FFFF_FFFF);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0);
}

#[test]
fn movz_movk_compose_a_64_bit_constant() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::movz(X, 1, 0x4444, 0),
        encoder::movk(X, 1, 0x3333, 1),
        encoder::movk(X, 1, 0x2222, 2),
        encoder::movk(X, 1, 0x1111, 3),
        encoder::hlt(0),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 0x1111_2222_3333_4444);
}

#[test]
fn shifted_register_operand() {
    let mut ctx = TestContext::new().load_program(&[encoder::add_reg(X, 3, 1, 2, 4), encoder::hlt(0)]);
    ctx.set_reg(1, 1);
    ctx.set_reg(2, 2);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(3), 1 + (2 << 4));
}

#[test]
fn mvn_inverts_shifted_register() {
    let mut ctx = TestContext::new().load_program(&[encoder::mvn(X, 2, 1, 0), encoder::hlt(0)]);
    ctx.set_reg(1, 0x0F0F_0F0F_0F0F_0F0F);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0xF0F0_F0F0_F0F0_F0F0);
}

#[test]
fn logical_immediate_applies_expanded_mask() {
    let mut ctx = TestContext::new().load_program(&[
        // AND x2, x1, #0xFF
        encoder::and_imm(X, 2, 1, 1, 0, 7),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, 0x1234_5678_9ABC_DEF0);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0xF0);
}

#[test]
fn ands_sets_nz_from_result() {
    let mut ctx = TestContext::new().load_program(&[encoder::ands_reg(X, 2, 0, 0, 0), encoder::hlt(0)]);
    ctx.run_to_halt();
    assert!(ctx.machine().flags.z);
    assert!(!ctx.machine().flags.n);
}

#[test]
fn shift_aliases_via_bitfield_move() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::lsl_imm(X, 2, 1, 8),
        encoder::lsr_imm(X, 3, 1, 8),
        encoder::asr_imm(X, 4, 1, 8),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, 0x8000_0000_0000_FF00);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0x0000_0000_00FF_0000);
    assert_eq!(ctx.get_reg(3), 0x0080_0000_0000_00FF);
    assert_eq!(ctx.get_reg(4), 0xFF80_0000_0000_00FF);
}

#[test]
fn unconditional_branch_redirects_pc() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::b(2),               // skip the next instruction
        encoder::movz(X, 1, 1, 0),   // skipped
        encoder::hlt(7),
    ]);
    assert_eq!(ctx.run_to_halt(), 7);
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.machine().stats.branches, 1);
    assert_eq!(ctx.machine().stats.branches_taken, 1);
}

#[test]
fn conditional_branch_taken_and_not_taken() {
    // subs x0, x1, #5 ; b.eq +2 ; movz x2,#1 ; hlt
    let program = [
        encoder::subs_imm(X, 0, 1, 5),
        encoder::b_cond(0x0, 2),
        encoder::movz(X, 2, 1, 0),
        encoder::hlt(0),
    ];

    let mut taken = TestContext::new().load_program(&program);
    taken.set_reg(1, 5);
    taken.run_to_halt();
    assert_eq!(taken.get_reg(2), 0);
    assert_eq!(taken.machine().stats.branches_taken, 1);

    let mut not_taken = TestContext::new().load_program(&program);
    not_taken.set_reg(1, 6);
    not_taken.run_to_halt();
    assert_eq!(not_taken.get_reg(2), 1);
    assert_eq!(not_taken.machine().stats.branches, 1);
    assert_eq!(not_taken.machine().stats.branches_taken, 0);
}

#[test]
fn compare_branch_tests_register_at_width() {
    // With only the high half set, the W view is zero: CBZ (32-bit) takes.
    let mut ctx = TestContext::new().load_program(&[
        encoder::cbz(W, 1, 2),
        encoder::movz(X, 2, 1, 0),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, 0xFFFF_FFFF_0000_0000);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0);
}

#[test]
fn test_branch_checks_single_bit() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::tbnz(1, 40, 2),
        encoder::movz(X, 2, 1, 0),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, 1u64 << 40);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0);
}

#[test]
fn bl_writes_return_address_and_ret_returns() {
    // bl +3 ; movz x1,#1 ; hlt ; movz x2,#2 ; ret
    let mut ctx = TestContext::new().load_program(&[
        encoder::bl(3),
        encoder::movz(X, 1, 1, 0),
        encoder::hlt(0),
        encoder::movz(X, 2, 2, 0),
        encoder::ret(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(30), PROG_BASE + 4);
    assert_eq!(ctx.get_reg(2), 2);
    assert_eq!(ctx.get_reg(1), 1);
}

#[test]
fn register_indirect_branch() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::br(5),
        encoder::movz(X, 1, 1, 0),
        encoder::hlt(0),
    ]);
    ctx.set_reg(5, PROG_BASE + 8);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 0);
}

#[test]
fn zero_register_reads_zero_and_discards_writes() {
    let mut ctx = TestContext::new().load_program(&[
        encoder::add_imm(X, 31, 31, 100),
        encoder::add_reg(X, 2, 1, 31, 0),
        encoder::hlt(0),
    ]);
    ctx.set_reg(1, 7);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(31), 0);
    assert_eq!(ctx.get_reg(2), 7);
}

#[test]
fn countdown_loop_retires_expected_instruction_count() {
    // movz x1,#3 ; subs x1,x1,#1 ; b.ne -1 ; hlt
    let mut ctx = TestContext::new().load_program(&[
        encoder::movz(X, 1, 3, 0),
        encoder::subs_imm(X, 1, 1, 1),
        encoder::b_cond(0x1, -1),
        encoder::hlt(0),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 0);
    // movz + 3 * (subs + b.ne) + hlt
    assert_eq!(ctx.machine().stats.retired, 8);
    assert_eq!(ctx.machine().stats.branches, 3);
    assert_eq!(ctx.machine().stats.branches_taken, 2);
}

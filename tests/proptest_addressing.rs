//! Property-based tests for addressing mode resolution.
//!
//! Programs live at 0x8000; generated data addresses stay below it so the
//! instruction stream is never overwritten.

use nmos6502::{Cpu, FlatMemory, MemoryBus};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

// ========== Zero Page Property Tests ==========

proptest! {
    /// Property: LDA zp,X reads from (zp + X) mod 256
    #[test]
    fn prop_zero_page_x_wraps_in_zero_page(
        zp_addr in 0u8..=255u8,
        x in 0u8..=255u8,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        let effective = zp_addr.wrapping_add(x) as u16;
        cpu.memory_mut().write(effective, value);
        cpu.memory_mut().blit(&[0xB5, zp_addr], 0x8000);
        cpu.set_x(x);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.cycles(), 4);
    }

    /// Property: LDX zp,Y reads from (zp + Y) mod 256
    #[test]
    fn prop_zero_page_y_wraps_in_zero_page(
        zp_addr in 0u8..=255u8,
        y in 0u8..=255u8,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        let effective = zp_addr.wrapping_add(y) as u16;
        cpu.memory_mut().write(effective, value);
        cpu.memory_mut().blit(&[0xB6, zp_addr], 0x8000);
        cpu.set_y(y);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.x(), value);
    }
}

// ========== Absolute Indexed Property Tests ==========

proptest! {
    /// Property: LDA abs,X charges one extra cycle exactly when the page changes
    #[test]
    fn prop_absolute_x_page_crossing_cycles(
        base in 0x0200u16..=0x7E00u16,
        x in 0u8..=255u8,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        let effective = base.wrapping_add(x as u16);
        cpu.memory_mut().write(effective, value);
        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().blit(&[0xBD, lo, hi], 0x8000);
        cpu.set_x(x);

        cpu.step().unwrap();

        let crossed = (base & 0xFF00) != (effective & 0xFF00);
        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.cycles(), if crossed { 5 } else { 4 });
    }

    /// Property: STA abs,Y always takes 5 cycles regardless of page crossing
    #[test]
    fn prop_store_absolute_y_fixed_cycles(
        base in 0x0200u16..=0x7E00u16,
        y in 0u8..=255u8,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().blit(&[0x99, lo, hi], 0x8000);
        cpu.set_a(value);
        cpu.set_y(y);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.memory().peek(base + y as u16), value);
        prop_assert_eq!(cpu.cycles(), 5);
    }
}

// ========== Indirect Property Tests ==========

proptest! {
    /// Property: (zp,X) fetches the pointer from zero page, wrapping both bytes
    #[test]
    fn prop_indexed_indirect_dereference(
        zp_addr in 0u8..=255u8,
        x in 0u8..=255u8,
        target in 0x0200u16..=0x7FFFu16,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        let pointer = zp_addr.wrapping_add(x);
        let [lo, hi] = target.to_le_bytes();
        cpu.memory_mut().write(pointer as u16, lo);
        cpu.memory_mut().write(pointer.wrapping_add(1) as u16, hi);
        cpu.memory_mut().write(target, value);
        cpu.memory_mut().blit(&[0xA1, zp_addr], 0x8000);
        cpu.set_x(x);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.cycles(), 6);
    }

    /// Property: (zp),Y adds Y to the pointer and charges the page-cross cycle
    #[test]
    fn prop_indirect_indexed_dereference(
        zp_addr in 0u8..=255u8,
        base in 0x0200u16..=0x7E00u16,
        y in 0u8..=255u8,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().write(zp_addr as u16, lo);
        cpu.memory_mut().write(zp_addr.wrapping_add(1) as u16, hi);
        let effective = base + y as u16;
        cpu.memory_mut().write(effective, value);
        cpu.memory_mut().blit(&[0xB1, zp_addr], 0x8000);
        cpu.set_y(y);

        cpu.step().unwrap();

        let crossed = (base & 0xFF00) != (effective & 0xFF00);
        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.cycles(), if crossed { 6 } else { 5 });
    }

    /// Property: JMP (ind) with the pointer low byte at 0xFF reads the high
    /// byte from the start of the same page
    #[test]
    fn prop_jmp_indirect_page_boundary_bug(page in 0x02u8..=0x7Fu8, lo in 0u8..=255u8, hi in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        let pointer = u16::from_le_bytes([0xFF, page]);
        cpu.memory_mut().write(pointer, lo);
        cpu.memory_mut().write(pointer & 0xFF00, hi);
        cpu.memory_mut().write(pointer.wrapping_add(1), hi.wrapping_add(1));
        cpu.memory_mut().blit(&[0x6C, 0xFF, page], 0x8000);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.pc(), u16::from_le_bytes([lo, hi]));
        prop_assert_eq!(cpu.cycles(), 5);
    }
}

// ========== Branch Property Tests ==========

proptest! {
    /// Property: a taken branch lands on next-PC plus the signed offset
    #[test]
    fn prop_branch_target(offset in any::<i8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().blit(&[0xB0, offset as u8], 0x8000); // BCS
        cpu.set_flag(nmos6502::Status::CARRY, true);

        cpu.step().unwrap();

        let next = 0x8002u16;
        let target = next.wrapping_add(offset as i16 as u16);
        let crossed = (next & 0xFF00) != (target & 0xFF00);
        prop_assert_eq!(cpu.pc(), target);
        prop_assert_eq!(cpu.cycles(), if crossed { 4 } else { 3 });
    }

    /// Property: a branch not taken costs 2 cycles and falls through
    #[test]
    fn prop_branch_not_taken(offset in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().blit(&[0xB0, offset], 0x8000); // BCS, C clear

        cpu.step().unwrap();

        prop_assert_eq!(cpu.pc(), 0x8002);
        prop_assert_eq!(cpu.cycles(), 2);
    }
}

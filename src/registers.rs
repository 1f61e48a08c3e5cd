//! # Register File and Status Flags
//!
//! The 6502 has six programmer-visible registers: the accumulator (A), two
//! index registers (X, Y), the stack pointer (SP), the program counter (PC),
//! and the processor status register (P). This module holds them in a single
//! `Copy` struct so the trace hook and the shared handle can hand out
//! snapshots without exposing the CPU itself.

use bitflags::bitflags;

bitflags! {
    /// Processor status register (NV-BDIZC).
    ///
    /// Bit layout:
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, reads as 1 on hardware)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::Status;
    ///
    /// let p = Status::UNUSED | Status::INTERRUPT_DISABLE;
    /// assert_eq!(p.bits(), 0x24);
    /// assert!(p.contains(Status::INTERRUPT_DISABLE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry (set on unsigned overflow, clear on borrow).
        const CARRY = 1 << 0;
        /// Zero (set if the result is zero).
        const ZERO = 1 << 1;
        /// Interrupt disable (masks IRQ, never NMI).
        const INTERRUPT_DISABLE = 1 << 2;
        /// Decimal mode (ADC/SBC operate on packed BCD).
        const DECIMAL = 1 << 3;
        /// Break (only meaningful in pushed copies of the register).
        const BREAK = 1 << 4;
        /// Unused bit 5, held at 1 by every internal write path.
        const UNUSED = 1 << 5;
        /// Overflow (signed overflow, or bit 6 of the operand for BIT).
        const OVERFLOW = 1 << 6;
        /// Negative (bit 7 of the result).
        const NEGATIVE = 1 << 7;
    }
}

impl Status {
    /// Status register value after power-on and reset.
    pub const POWER_ON: Status = Status::UNUSED.union(Status::INTERRUPT_DISABLE);
}

impl Default for Status {
    fn default() -> Self {
        Status::POWER_ON
    }
}

/// The 6502 register file.
///
/// # Examples
///
/// ```
/// use nmos6502::{Registers, Status};
///
/// let mut regs = Registers::default();
/// regs.update_nz(0x80);
/// assert!(regs.flag(Status::NEGATIVE));
/// assert!(!regs.flag(Status::ZERO));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Stack pointer (0x0100 + sp gives the full stack address)
    pub sp: u8,
    /// Program counter (address of the next byte to fetch)
    pub pc: u16,
    /// Processor status
    pub p: Status,
}

impl Registers {
    /// Returns the power-on register file with PC set to `pc`.
    pub fn new(pc: u16) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            sp: 0xFF,
            pc,
            p: Status::POWER_ON,
        }
    }

    /// Returns true if every bit in `flag` is set.
    pub fn flag(&self, flag: Status) -> bool {
        self.p.contains(flag)
    }

    pub fn set_flag(&mut self, flag: Status) {
        self.p.insert(flag);
    }

    /// Clears `flag`. Bit 5 is never cleared; only PLP and RTI load it.
    pub fn clear_flag(&mut self, flag: Status) {
        self.p.remove(flag - Status::UNUSED);
    }

    /// Sets or clears `flag` according to `value`.
    pub fn assign_flag(&mut self, flag: Status, value: bool) {
        if value {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    /// Updates Z and N from `value`.
    pub fn update_nz(&mut self, value: u8) {
        self.p.set(Status::ZERO, value == 0);
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Carry flag as an arithmetic operand (0 or 1).
    pub(crate) fn carry(&self) -> u8 {
        u8::from(self.flag(Status::CARRY))
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new(0x0000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let regs = Registers::new(0x8000);

        assert_eq!(regs.pc, 0x8000);
        assert_eq!(regs.sp, 0xFF);
        assert_eq!(regs.a, 0x00);
        assert_eq!(regs.x, 0x00);
        assert_eq!(regs.y, 0x00);
        assert_eq!(regs.p.bits(), 0b0010_0100);
    }

    #[test]
    fn test_flags_are_independent_bits() {
        let mut regs = Registers::default();

        for bit in (0..8).filter(|&bit| bit != 5) {
            let flag = Status::from_bits_retain(1 << bit);
            let before = regs.p;

            regs.set_flag(flag);
            assert!(regs.flag(flag));
            assert_eq!(regs.p, before | flag);

            regs.clear_flag(flag);
            assert!(!regs.flag(flag));
            assert_eq!(regs.p, before - flag);

            regs.p = before;
        }
    }

    #[test]
    fn test_update_nz() {
        let mut regs = Registers::default();

        regs.update_nz(0x00);
        assert!(regs.flag(Status::ZERO));
        assert!(!regs.flag(Status::NEGATIVE));

        regs.update_nz(0xFF);
        assert!(!regs.flag(Status::ZERO));
        assert!(regs.flag(Status::NEGATIVE));

        regs.update_nz(0x7F);
        assert!(!regs.flag(Status::ZERO));
        assert!(!regs.flag(Status::NEGATIVE));
    }

    #[test]
    fn test_unused_bit_cannot_be_cleared() {
        let mut regs = Registers::default();

        regs.clear_flag(Status::UNUSED);
        assert!(regs.flag(Status::UNUSED));

        regs.assign_flag(Status::UNUSED, false);
        assert!(regs.flag(Status::UNUSED));

        regs.clear_flag(Status::UNUSED | Status::CARRY | Status::INTERRUPT_DISABLE);
        assert_eq!(regs.p, Status::UNUSED);
    }

    #[test]
    fn test_assign_flag_leaves_unused_bit() {
        let mut regs = Registers::default();
        regs.assign_flag(Status::CARRY, true);
        regs.assign_flag(Status::OVERFLOW, false);

        assert!(regs.flag(Status::UNUSED));
        assert_eq!(regs.carry(), 1);
    }
}

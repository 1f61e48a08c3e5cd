//! # Arithmetic Logic Unit
//!
//! Flag-updating arithmetic helpers shared by the instruction
//! implementations. Each helper takes the operands explicitly, updates the
//! status flags on the register file and returns the result; storing the
//! result is left to the caller.
//!
//! Decimal mode follows the NMOS part for valid packed-BCD operands
//! (each nibble 0-9): N and Z reflect the decimal result, C is the decimal
//! carry (add) or not-borrow (subtract), and V is derived from the
//! intermediate binary sum. Results for invalid nibbles (A-F) are not
//! guaranteed to match silicon.

use crate::registers::{Registers, Status};

impl Registers {
    /// Binary add with carry: `lhs + rhs + C`.
    pub fn add_binary(&mut self, lhs: u8, rhs: u8) -> u8 {
        let sum = lhs as u16 + rhs as u16 + self.carry() as u16;
        let result = sum as u8;

        self.assign_flag(Status::CARRY, sum > 0xFF);
        self.assign_flag(Status::OVERFLOW, (lhs ^ result) & (rhs ^ result) & 0x80 != 0);
        self.update_nz(result);
        result
    }

    /// Binary subtract with borrow: `lhs - rhs - !C`, computed as
    /// `lhs + !rhs + C`. Carry clear afterwards means a borrow occurred.
    pub fn subtract_binary(&mut self, lhs: u8, rhs: u8) -> u8 {
        self.add_binary(lhs, !rhs)
    }

    /// Packed-BCD add with carry.
    pub fn add_decimal(&mut self, lhs: u8, rhs: u8) -> u8 {
        let mut lo = (lhs & 0x0F) as u16 + (rhs & 0x0F) as u16 + self.carry() as u16;
        let mut hi = (lhs >> 4) as u16 + (rhs >> 4) as u16;

        if lo > 0x09 {
            lo += 0x06;
        }
        if lo > 0x0F {
            hi += 1;
        }

        let intermediate = ((hi << 4) | (lo & 0x0F)) as u8;
        self.assign_flag(
            Status::OVERFLOW,
            (lhs ^ intermediate) & (rhs ^ intermediate) & 0x80 != 0,
        );

        if hi > 0x09 {
            hi += 0x06;
        }

        let result = ((hi << 4) | (lo & 0x0F)) as u8;
        self.assign_flag(Status::CARRY, hi > 0x0F);
        self.update_nz(result);
        result
    }

    /// Packed-BCD subtract with borrow.
    pub fn subtract_decimal(&mut self, lhs: u8, rhs: u8) -> u8 {
        let borrow = 1 - self.carry() as i16;
        let binary = lhs as i16 - rhs as i16 - borrow;

        let mut lo = (lhs & 0x0F) as i16 - (rhs & 0x0F) as i16 - borrow;
        let mut hi = (lhs >> 4) as i16 - (rhs >> 4) as i16;

        if lo < 0 {
            lo -= 0x06;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 0x06;
        }

        let result = (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8;
        let binary_result = binary as u8;

        self.assign_flag(Status::CARRY, binary >= 0);
        self.assign_flag(
            Status::OVERFLOW,
            (lhs ^ rhs) & (lhs ^ binary_result) & 0x80 != 0,
        );
        self.update_nz(result);
        result
    }

    /// ADC honouring the decimal flag.
    pub fn add_with_carry(&mut self, lhs: u8, rhs: u8) -> u8 {
        if self.flag(Status::DECIMAL) {
            self.add_decimal(lhs, rhs)
        } else {
            self.add_binary(lhs, rhs)
        }
    }

    /// SBC honouring the decimal flag.
    pub fn subtract_with_carry(&mut self, lhs: u8, rhs: u8) -> u8 {
        if self.flag(Status::DECIMAL) {
            self.subtract_decimal(lhs, rhs)
        } else {
            self.subtract_binary(lhs, rhs)
        }
    }

    /// Compares `register` with `value` as CMP/CPX/CPY do.
    pub fn compare(&mut self, register: u8, value: u8) {
        let difference = register.wrapping_sub(value);
        self.assign_flag(Status::CARRY, register >= value);
        self.update_nz(difference);
    }

    /// BIT: Z from `A & value`, N and V copied from bits 7 and 6 of `value`.
    pub fn bit_test(&mut self, value: u8) {
        self.assign_flag(Status::ZERO, self.a & value == 0);
        self.assign_flag(Status::NEGATIVE, value & 0x80 != 0);
        self.assign_flag(Status::OVERFLOW, value & 0x40 != 0);
    }

    pub fn shift_left(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.assign_flag(Status::CARRY, value & 0x80 != 0);
        self.update_nz(result);
        result
    }

    pub fn shift_right(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.assign_flag(Status::CARRY, value & 0x01 != 0);
        self.update_nz(result);
        result
    }

    pub fn rotate_left(&mut self, value: u8) -> u8 {
        let result = (value << 1) | self.carry();
        self.assign_flag(Status::CARRY, value & 0x80 != 0);
        self.update_nz(result);
        result
    }

    pub fn rotate_right(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (self.carry() << 7);
        self.assign_flag(Status::CARRY, value & 0x01 != 0);
        self.update_nz(result);
        result
    }
}

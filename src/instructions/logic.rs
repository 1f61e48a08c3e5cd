//! # Bitwise Logic Instructions
//!
//! AND, ORA and EOR combine the operand into A and update N/Z. BIT tests A
//! against memory without storing anything.

use super::Timing;
use crate::{AddressingMode, Cpu, MemoryBus};

pub(crate) fn and<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.a &= value;
    cpu.regs.update_nz(cpu.regs.a);
    Timing::Read { page_crossed }
}

pub(crate) fn ora<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.a |= value;
    cpu.regs.update_nz(cpu.regs.a);
    Timing::Read { page_crossed }
}

pub(crate) fn eor<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.a ^= value;
    cpu.regs.update_nz(cpu.regs.a);
    Timing::Read { page_crossed }
}

/// BIT: Z from A & M, N and V from bits 7 and 6 of M. A is unchanged.
pub(crate) fn bit<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, _) = cpu.read_operand(mode);
    cpu.regs.bit_test(value);
    Timing::Fixed
}

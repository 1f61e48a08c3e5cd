//! # Arithmetic Instructions
//!
//! ADC and SBC (binary or packed BCD depending on D) and the three compares.
//! The flag algebra lives on `Registers` in the `alu` module.

use super::Timing;
use crate::{AddressingMode, Cpu, MemoryBus};

/// ADC: A = A + M + C.
pub(crate) fn adc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.a = cpu.regs.add_with_carry(cpu.regs.a, value);
    Timing::Read { page_crossed }
}

/// SBC: A = A - M - !C. Carry clear afterwards means a borrow occurred.
pub(crate) fn sbc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.a = cpu.regs.subtract_with_carry(cpu.regs.a, value);
    Timing::Read { page_crossed }
}

pub(crate) fn cmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.compare(cpu.regs.a, value);
    Timing::Read { page_crossed }
}

pub(crate) fn cpx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, _) = cpu.read_operand(mode);
    cpu.regs.compare(cpu.regs.x, value);
    Timing::Fixed
}

pub(crate) fn cpy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, _) = cpu.read_operand(mode);
    cpu.regs.compare(cpu.regs.y, value);
    Timing::Fixed
}

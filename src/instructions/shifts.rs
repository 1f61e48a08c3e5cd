//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate either on the accumulator or, as
//! read-modify-write instructions, on memory. The bit shifted out lands in C.

use super::Timing;
use crate::registers::Registers;
use crate::{AddressingMode, Cpu, MemoryBus};

pub(crate) fn asl<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    modify(cpu, mode, Registers::shift_left)
}

pub(crate) fn lsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    modify(cpu, mode, Registers::shift_right)
}

pub(crate) fn rol<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    modify(cpu, mode, Registers::rotate_left)
}

pub(crate) fn ror<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    modify(cpu, mode, Registers::rotate_right)
}

/// Applies `op` to A (accumulator mode) or to the byte at the effective
/// address, writing the result back.
fn modify<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    mode: AddressingMode,
    op: fn(&mut Registers, u8) -> u8,
) -> Timing {
    if mode == AddressingMode::Accumulator {
        let value = cpu.regs.a;
        cpu.regs.a = op(&mut cpu.regs, value);
    } else {
        let addr = cpu.operand_address(mode);
        let value = cpu.memory.read(addr);
        let result = op(&mut cpu.regs, value);
        cpu.memory.write(addr, result);
    }
    Timing::Fixed
}

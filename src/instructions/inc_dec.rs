//! # Increment and Decrement Instructions
//!
//! INC/DEC modify memory; INX/INY/DEX/DEY modify an index register. All wrap
//! at 8 bits and update N and Z. Carry is never affected.

use super::Timing;
use crate::{AddressingMode, Cpu, MemoryBus};

pub(crate) fn inc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    modify_memory(cpu, mode, |value| value.wrapping_add(1))
}

pub(crate) fn dec<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    modify_memory(cpu, mode, |value| value.wrapping_sub(1))
}

pub(crate) fn inx<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.regs.update_nz(cpu.regs.x);
    Timing::Fixed
}

pub(crate) fn iny<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.regs.update_nz(cpu.regs.y);
    Timing::Fixed
}

pub(crate) fn dex<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.regs.update_nz(cpu.regs.x);
    Timing::Fixed
}

pub(crate) fn dey<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.regs.update_nz(cpu.regs.y);
    Timing::Fixed
}

fn modify_memory<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    mode: AddressingMode,
    op: impl FnOnce(u8) -> u8,
) -> Timing {
    let addr = cpu.operand_address(mode);
    let result = op(cpu.memory.read(addr));
    cpu.memory.write(addr, result);
    cpu.regs.update_nz(result);
    Timing::Fixed
}

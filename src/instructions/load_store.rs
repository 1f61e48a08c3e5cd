//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register from memory, updating N and Z
//! - STA, STX, STY: store a register to memory, no flags affected
//!
//! Indexed loads pay one extra cycle when the effective address crosses a
//! page; stores always take their fixed cost.

use super::Timing;
use crate::{AddressingMode, Cpu, MemoryBus};

pub(crate) fn lda<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.a = value;
    cpu.regs.update_nz(value);
    Timing::Read { page_crossed }
}

pub(crate) fn ldx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.x = value;
    cpu.regs.update_nz(value);
    Timing::Read { page_crossed }
}

pub(crate) fn ldy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let (value, page_crossed) = cpu.read_operand(mode);
    cpu.regs.y = value;
    cpu.regs.update_nz(value);
    Timing::Read { page_crossed }
}

pub(crate) fn sta<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.regs.a);
    Timing::Fixed
}

pub(crate) fn stx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.regs.x);
    Timing::Fixed
}

pub(crate) fn sty<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.regs.y);
    Timing::Fixed
}

//! # Control Flow Instructions
//!
//! JMP, JSR/RTS, BRK/RTI. NOP needs no implementation beyond its cycles.
//!
//! BRK is a software interrupt. It skips a padding byte, so the address
//! pushed is the BRK address + 2, then shares the hardware interrupt
//! sequence: push PC, push P, set I, load PC from 0xFFFE.

use super::Timing;
use crate::cpu::IRQ_VECTOR;
use crate::registers::Status;
use crate::{AddressingMode, Cpu, MemoryBus};

/// JMP absolute or indirect. Indirect reproduces the page-wrap defect.
pub(crate) fn jmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    cpu.regs.pc = cpu.operand_address(mode);
    Timing::Fixed
}

/// JSR: pushes the address of its own last byte, then jumps.
pub(crate) fn jsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> Timing {
    let target = cpu.operand_address(mode);
    let return_address = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.regs.pc = target;
    Timing::Fixed
}

/// RTS: pulls the return address and adds one.
pub(crate) fn rts<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.pc = cpu.pull_word().wrapping_add(1);
    Timing::Fixed
}

/// RTI: pulls P verbatim, then PC. I is whatever the pulled byte says.
pub(crate) fn rti<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.p = Status::from_bits_retain(cpu.pull());
    cpu.regs.pc = cpu.pull_word();
    Timing::Fixed
}

pub(crate) fn brk<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
    cpu.enter_interrupt(IRQ_VECTOR);
    Timing::Fixed
}

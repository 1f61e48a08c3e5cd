//! # Stack Operations
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. Push and pull wrap SP silently; there is no overflow detection.

use super::Timing;
use crate::registers::Status;
use crate::{Cpu, MemoryBus};

pub(crate) fn pha<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.push(cpu.regs.a);
    Timing::Fixed
}

/// PHP always pushes with B and bit 5 set.
pub(crate) fn php<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    let pushed = cpu.regs.p | Status::BREAK | Status::UNUSED;
    cpu.push(pushed.bits());
    Timing::Fixed
}

pub(crate) fn pla<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.a = cpu.pull();
    cpu.regs.update_nz(cpu.regs.a);
    Timing::Fixed
}

/// PLP loads P verbatim, B and bit 5 included.
pub(crate) fn plp<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.p = Status::from_bits_retain(cpu.pull());
    Timing::Fixed
}

//! # Register Transfer Instructions
//!
//! Copies between A, X, Y and SP. Every transfer updates N and Z from the
//! copied value except TXS, which leaves the flags alone.

use super::Timing;
use crate::{Cpu, MemoryBus};

pub(crate) fn tax<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.x = cpu.regs.a;
    cpu.regs.update_nz(cpu.regs.x);
    Timing::Fixed
}

pub(crate) fn tay<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.y = cpu.regs.a;
    cpu.regs.update_nz(cpu.regs.y);
    Timing::Fixed
}

pub(crate) fn txa<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.a = cpu.regs.x;
    cpu.regs.update_nz(cpu.regs.a);
    Timing::Fixed
}

pub(crate) fn tya<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.a = cpu.regs.y;
    cpu.regs.update_nz(cpu.regs.a);
    Timing::Fixed
}

pub(crate) fn tsx<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.x = cpu.regs.sp;
    cpu.regs.update_nz(cpu.regs.x);
    Timing::Fixed
}

pub(crate) fn txs<M: MemoryBus>(cpu: &mut Cpu<M>) -> Timing {
    cpu.regs.sp = cpu.regs.x;
    Timing::Fixed
}

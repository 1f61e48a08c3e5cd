//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each set or clear one flag.

use super::Timing;
use crate::registers::Status;
use crate::{Cpu, MemoryBus};

pub(crate) fn assign<M: MemoryBus>(cpu: &mut Cpu<M>, flag: Status, value: bool) -> Timing {
    cpu.regs.assign_flag(flag, value);
    Timing::Fixed
}

//! # Branch Instructions
//!
//! All eight conditional branches share one implementation: test a single
//! status flag against the wanted value and, if it matches, add the signed
//! displacement to PC.
//!
//! Cycle timing (applied by the dispatcher from the opcode's penalty rule):
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to a different page (except BVC, which stays at 3)

use super::Timing;
use crate::addressing::crosses_page;
use crate::registers::Status;
use crate::{Cpu, MemoryBus};

/// Branches when `flag` equals `wanted`.
pub(crate) fn branch<M: MemoryBus>(cpu: &mut Cpu<M>, flag: Status, wanted: bool) -> Timing {
    let offset = cpu.fetch_byte() as i8;

    // PC now points at the next instruction; the displacement is relative to it.
    let next = cpu.regs.pc;

    if cpu.regs.flag(flag) != wanted {
        return Timing::Branch {
            taken: false,
            page_crossed: false,
        };
    }

    let target = next.wrapping_add_signed(offset as i16);
    cpu.regs.pc = target;

    Timing::Branch {
        taken: true,
        page_crossed: crosses_page(next, target),
    }
}

//! # Addressing Modes
//!
//! The 13 addressing modes of the 6502 and the effective-address resolver.
//! Operand bytes are consumed from PC as each mode requires, so after
//! resolution PC points at the next instruction.

use crate::{Cpu, MemoryBus};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction (CLC, RTS, NOP).
    Implicit,

    /// Operates directly on the accumulator (LSR A, ROL A).
    Accumulator,

    /// 8-bit constant operand (LDA #$10).
    Immediate,

    /// 8-bit address in zero page (LDA $80).
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    Relative,

    /// Full 16-bit address.
    Absolute,

    /// 16-bit address indexed by X. May cross a page.
    AbsoluteX,

    /// 16-bit address indexed by Y. May cross a page.
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer (JMP only).
    ///
    /// Reproduces the NMOS defect: a pointer at $xxFF takes its high byte
    /// from $xx00 rather than the next page.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference. LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y. LDA ($40),Y
    /// May cross a page.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Result of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand (implicit).
    None,
    /// The accumulator itself.
    Accumulator,
    /// An immediate byte.
    Immediate(u8),
    /// An effective address; `page_crossed` is set when indexing changed the
    /// high byte of the base address.
    Address { addr: u16, page_crossed: bool },
}

/// True if `a` and `b` lie in different 256-byte pages.
pub(crate) fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl<M: MemoryBus> Cpu<M> {
    /// Resolves `mode`, consuming its operand bytes from PC.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        match mode {
            AddressingMode::Implicit => Operand::None,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.fetch_byte()),
            AddressingMode::ZeroPage => direct(self.fetch_byte() as u16),
            AddressingMode::ZeroPageX => {
                direct(self.fetch_byte().wrapping_add(self.regs.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                direct(self.fetch_byte().wrapping_add(self.regs.y) as u16)
            }
            // Branches consume their displacement themselves.
            AddressingMode::Relative => Operand::None,
            AddressingMode::Absolute => direct(self.fetch_word()),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                indexed(base, self.regs.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                indexed(base, self.regs.y)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let lo = self.memory.read(pointer);
                // Page-wrap defect: the high byte never leaves the pointer's page.
                let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                let hi = self.memory.read(hi_addr);
                direct(u16::from_le_bytes([lo, hi]))
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.regs.x);
                direct(self.read_zero_page_word(zp))
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                indexed(base, self.regs.y)
            }
        }
    }

    /// Resolves `mode` and reads its operand value.
    ///
    /// Returns the value and whether indexing crossed a page.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> (u8, bool) {
        match self.resolve(mode) {
            Operand::Immediate(value) => (value, false),
            Operand::Accumulator => (self.regs.a, false),
            Operand::Address { addr, page_crossed } => (self.memory.read(addr), page_crossed),
            Operand::None => (0, false),
        }
    }

    /// Resolves `mode` to an effective address (stores, RMW, jumps).
    pub(crate) fn operand_address(&mut self, mode: AddressingMode) -> u16 {
        match self.resolve(mode) {
            Operand::Address { addr, .. } => addr,
            other => unreachable!("{:?} has no effective address ({:?})", mode, other),
        }
    }

    /// Reads a pointer from zero page; the high byte wraps within page 0.
    fn read_zero_page_word(&mut self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16);
        let hi = self.memory.read(zp.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }
}

fn direct(addr: u16) -> Operand {
    Operand::Address {
        addr,
        page_crossed: false,
    }
}

fn indexed(base: u16, index: u8) -> Operand {
    let addr = base.wrapping_add(index as u16);
    Operand::Address {
        addr,
        page_crossed: crosses_page(base, addr),
    }
}

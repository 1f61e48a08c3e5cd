//! # Opcode Table
//!
//! The 256-entry opcode table that is the single source of truth for
//! instruction decoding. Each defined byte maps to its mnemonic, addressing
//! mode, base cycle cost and the rule for conditional extra cycles. The 105
//! undefined bytes map to `None`.
//!
//! The table is built at compile time from a flat list of the 151 documented
//! NMOS opcodes.

use std::fmt;

use crate::addressing::AddressingMode;

/// The 56 documented 6502 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Mnemonic {
    /// Upper-case assembler name, e.g. `"LDA"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    /// True for the eight conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Beq
                | Mnemonic::Bmi
                | Mnemonic::Bne
                | Mnemonic::Bpl
                | Mnemonic::Bvc
                | Mnemonic::Bvs
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditional cycles charged on top of `base_cycles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePenalty {
    /// Fixed cost.
    None,
    /// +1 when indexing crosses a page (read instructions only).
    PageCross,
    /// +1 when taken, +1 more when the target is on another page.
    Branch,
    /// +1 when taken; never charges the page-cross cycle (BVC).
    BranchTakenOnly,
}

/// Static description of one defined opcode.
///
/// # Examples
///
/// ```
/// use nmos6502::{decode, AddressingMode, Mnemonic};
///
/// let lda = decode(0xBD).unwrap();
/// assert_eq!(lda.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda.mode, AddressingMode::AbsoluteX);
/// assert_eq!(lda.base_cycles, 4);
/// assert_eq!(lda.size_bytes(), 3);
///
/// assert!(decode(0x02).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Cycle cost before any penalty.
    pub base_cycles: u8,
    pub penalty: CyclePenalty,
}

impl Opcode {
    /// Total instruction length in bytes (opcode + operand).
    pub const fn size_bytes(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

/// Looks up the table entry for `opcode`; `None` for undefined bytes.
pub fn decode(opcode: u8) -> Option<&'static Opcode> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

/// The dense opcode table, indexed by opcode byte.
pub static OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (byte, mnemonic, mode, base_cycles, penalty) = DOCUMENTED[i];
        table[byte as usize] = Some(Opcode {
            mnemonic,
            mode,
            base_cycles,
            penalty,
        });
        i += 1;
    }
    table
}

use AddressingMode::{
    Absolute as Abs, AbsoluteX as AbsX, AbsoluteY as AbsY, Accumulator as Acc,
    Immediate as Imm, Implicit as Imp, Indirect as Ind, IndirectX as IndX, IndirectY as IndY,
    Relative as Rel, ZeroPage as Zp, ZeroPageX as ZpX, ZeroPageY as ZpY,
};
use CyclePenalty::{Branch, BranchTakenOnly, None as Fixed, PageCross};
use Mnemonic::*;

type Entry = (u8, Mnemonic, AddressingMode, u8, CyclePenalty);

#[rustfmt::skip]
const DOCUMENTED: [Entry; 151] = [
    // Loads
    (0xA9, Lda, Imm, 2, Fixed), (0xA5, Lda, Zp, 3, Fixed), (0xB5, Lda, ZpX, 4, Fixed),
    (0xAD, Lda, Abs, 4, Fixed), (0xBD, Lda, AbsX, 4, PageCross), (0xB9, Lda, AbsY, 4, PageCross),
    (0xA1, Lda, IndX, 6, Fixed), (0xB1, Lda, IndY, 5, PageCross),
    (0xA2, Ldx, Imm, 2, Fixed), (0xA6, Ldx, Zp, 3, Fixed), (0xB6, Ldx, ZpY, 4, Fixed),
    (0xAE, Ldx, Abs, 4, Fixed), (0xBE, Ldx, AbsY, 4, PageCross),
    (0xA0, Ldy, Imm, 2, Fixed), (0xA4, Ldy, Zp, 3, Fixed), (0xB4, Ldy, ZpX, 4, Fixed),
    (0xAC, Ldy, Abs, 4, Fixed), (0xBC, Ldy, AbsX, 4, PageCross),

    // Stores
    (0x85, Sta, Zp, 3, Fixed), (0x95, Sta, ZpX, 4, Fixed), (0x8D, Sta, Abs, 4, Fixed),
    (0x9D, Sta, AbsX, 5, Fixed), (0x99, Sta, AbsY, 5, Fixed), (0x81, Sta, IndX, 6, Fixed),
    (0x91, Sta, IndY, 6, Fixed),
    (0x86, Stx, Zp, 3, Fixed), (0x96, Stx, ZpY, 4, Fixed), (0x8E, Stx, Abs, 4, Fixed),
    (0x84, Sty, Zp, 3, Fixed), (0x94, Sty, ZpX, 4, Fixed), (0x8C, Sty, Abs, 4, Fixed),

    // Arithmetic
    (0x69, Adc, Imm, 2, Fixed), (0x65, Adc, Zp, 3, Fixed), (0x75, Adc, ZpX, 4, Fixed),
    (0x6D, Adc, Abs, 4, Fixed), (0x7D, Adc, AbsX, 4, PageCross), (0x79, Adc, AbsY, 4, PageCross),
    (0x61, Adc, IndX, 6, Fixed), (0x71, Adc, IndY, 5, PageCross),
    (0xE9, Sbc, Imm, 2, Fixed), (0xE5, Sbc, Zp, 3, Fixed), (0xF5, Sbc, ZpX, 4, Fixed),
    (0xED, Sbc, Abs, 4, Fixed), (0xFD, Sbc, AbsX, 4, PageCross), (0xF9, Sbc, AbsY, 4, PageCross),
    (0xE1, Sbc, IndX, 6, Fixed), (0xF1, Sbc, IndY, 5, PageCross),
    (0xC9, Cmp, Imm, 2, Fixed), (0xC5, Cmp, Zp, 3, Fixed), (0xD5, Cmp, ZpX, 4, Fixed),
    (0xCD, Cmp, Abs, 4, Fixed), (0xDD, Cmp, AbsX, 4, PageCross), (0xD9, Cmp, AbsY, 4, PageCross),
    (0xC1, Cmp, IndX, 6, Fixed), (0xD1, Cmp, IndY, 5, PageCross),
    (0xE0, Cpx, Imm, 2, Fixed), (0xE4, Cpx, Zp, 3, Fixed), (0xEC, Cpx, Abs, 4, Fixed),
    (0xC0, Cpy, Imm, 2, Fixed), (0xC4, Cpy, Zp, 3, Fixed), (0xCC, Cpy, Abs, 4, Fixed),

    // Logic
    (0x29, And, Imm, 2, Fixed), (0x25, And, Zp, 3, Fixed), (0x35, And, ZpX, 4, Fixed),
    (0x2D, And, Abs, 4, Fixed), (0x3D, And, AbsX, 4, PageCross), (0x39, And, AbsY, 4, PageCross),
    (0x21, And, IndX, 6, Fixed), (0x31, And, IndY, 5, PageCross),
    (0x09, Ora, Imm, 2, Fixed), (0x05, Ora, Zp, 3, Fixed), (0x15, Ora, ZpX, 4, Fixed),
    (0x0D, Ora, Abs, 4, Fixed), (0x1D, Ora, AbsX, 4, PageCross), (0x19, Ora, AbsY, 4, PageCross),
    (0x01, Ora, IndX, 6, Fixed), (0x11, Ora, IndY, 5, PageCross),
    (0x49, Eor, Imm, 2, Fixed), (0x45, Eor, Zp, 3, Fixed), (0x55, Eor, ZpX, 4, Fixed),
    (0x4D, Eor, Abs, 4, Fixed), (0x5D, Eor, AbsX, 4, PageCross), (0x59, Eor, AbsY, 4, PageCross),
    (0x41, Eor, IndX, 6, Fixed), (0x51, Eor, IndY, 5, PageCross),
    (0x24, Bit, Zp, 3, Fixed), (0x2C, Bit, Abs, 4, Fixed),

    // Shifts and rotates
    (0x0A, Asl, Acc, 2, Fixed), (0x06, Asl, Zp, 5, Fixed), (0x16, Asl, ZpX, 6, Fixed),
    (0x0E, Asl, Abs, 6, Fixed), (0x1E, Asl, AbsX, 7, Fixed),
    (0x4A, Lsr, Acc, 2, Fixed), (0x46, Lsr, Zp, 5, Fixed), (0x56, Lsr, ZpX, 6, Fixed),
    (0x4E, Lsr, Abs, 6, Fixed), (0x5E, Lsr, AbsX, 7, Fixed),
    (0x2A, Rol, Acc, 2, Fixed), (0x26, Rol, Zp, 5, Fixed), (0x36, Rol, ZpX, 6, Fixed),
    (0x2E, Rol, Abs, 6, Fixed), (0x3E, Rol, AbsX, 7, Fixed),
    (0x6A, Ror, Acc, 2, Fixed), (0x66, Ror, Zp, 5, Fixed), (0x76, Ror, ZpX, 6, Fixed),
    (0x6E, Ror, Abs, 6, Fixed), (0x7E, Ror, AbsX, 7, Fixed),

    // Increments and decrements
    (0xE6, Inc, Zp, 5, Fixed), (0xF6, Inc, ZpX, 6, Fixed), (0xEE, Inc, Abs, 6, Fixed),
    (0xFE, Inc, AbsX, 7, Fixed),
    (0xC6, Dec, Zp, 5, Fixed), (0xD6, Dec, ZpX, 6, Fixed), (0xCE, Dec, Abs, 6, Fixed),
    (0xDE, Dec, AbsX, 7, Fixed),
    (0xE8, Inx, Imp, 2, Fixed), (0xC8, Iny, Imp, 2, Fixed),
    (0xCA, Dex, Imp, 2, Fixed), (0x88, Dey, Imp, 2, Fixed),

    // Branches
    (0x90, Bcc, Rel, 2, Branch), (0xB0, Bcs, Rel, 2, Branch),
    (0xF0, Beq, Rel, 2, Branch), (0xD0, Bne, Rel, 2, Branch),
    (0x30, Bmi, Rel, 2, Branch), (0x10, Bpl, Rel, 2, Branch),
    (0x50, Bvc, Rel, 2, BranchTakenOnly), (0x70, Bvs, Rel, 2, Branch),

    // Jumps, subroutines and interrupts
    (0x4C, Jmp, Abs, 3, Fixed), (0x6C, Jmp, Ind, 5, Fixed),
    (0x20, Jsr, Abs, 6, Fixed), (0x60, Rts, Imp, 6, Fixed),
    (0x00, Brk, Imp, 7, Fixed), (0x40, Rti, Imp, 6, Fixed),
    (0xEA, Nop, Imp, 2, Fixed),

    // Stack
    (0x48, Pha, Imp, 3, Fixed), (0x08, Php, Imp, 3, Fixed),
    (0x68, Pla, Imp, 4, Fixed), (0x28, Plp, Imp, 4, Fixed),

    // Flags
    (0x18, Clc, Imp, 2, Fixed), (0x38, Sec, Imp, 2, Fixed),
    (0x58, Cli, Imp, 2, Fixed), (0x78, Sei, Imp, 2, Fixed),
    (0xD8, Cld, Imp, 2, Fixed), (0xF8, Sed, Imp, 2, Fixed),
    (0xB8, Clv, Imp, 2, Fixed),

    // Transfers
    (0xAA, Tax, Imp, 2, Fixed), (0xA8, Tay, Imp, 2, Fixed),
    (0x8A, Txa, Imp, 2, Fixed), (0x98, Tya, Imp, 2, Fixed),
    (0xBA, Tsx, Imp, 2, Fixed), (0x9A, Txs, Imp, 2, Fixed),
];

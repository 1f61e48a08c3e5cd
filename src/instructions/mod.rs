//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is a standalone function taking the CPU and the addressing mode from
//! the opcode table. On entry PC points just past the opcode byte.
//!
//! ## Categories
//!
//! - **arithmetic**: ADC, SBC, CMP, CPX, CPY
//! - **logic**: AND, ORA, EOR, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

mod arithmetic;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod logic;
mod shifts;
mod stack;
mod transfer;

use crate::opcodes::{CyclePenalty, Mnemonic, Opcode};
use crate::registers::Status;
use crate::{Cpu, MemoryBus};

/// What an instruction reports back for cycle accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Timing {
    Fixed,
    Read { page_crossed: bool },
    Branch { taken: bool, page_crossed: bool },
}

/// Executes one decoded instruction and returns the cycles charged on top
/// of the opcode's base cost.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: &Opcode) -> u8 {
    let mode = opcode.mode;
    let timing = match opcode.mnemonic {
        Mnemonic::Lda => load_store::lda(cpu, mode),
        Mnemonic::Ldx => load_store::ldx(cpu, mode),
        Mnemonic::Ldy => load_store::ldy(cpu, mode),
        Mnemonic::Sta => load_store::sta(cpu, mode),
        Mnemonic::Stx => load_store::stx(cpu, mode),
        Mnemonic::Sty => load_store::sty(cpu, mode),

        Mnemonic::Adc => arithmetic::adc(cpu, mode),
        Mnemonic::Sbc => arithmetic::sbc(cpu, mode),
        Mnemonic::Cmp => arithmetic::cmp(cpu, mode),
        Mnemonic::Cpx => arithmetic::cpx(cpu, mode),
        Mnemonic::Cpy => arithmetic::cpy(cpu, mode),

        Mnemonic::And => logic::and(cpu, mode),
        Mnemonic::Ora => logic::ora(cpu, mode),
        Mnemonic::Eor => logic::eor(cpu, mode),
        Mnemonic::Bit => logic::bit(cpu, mode),

        Mnemonic::Asl => shifts::asl(cpu, mode),
        Mnemonic::Lsr => shifts::lsr(cpu, mode),
        Mnemonic::Rol => shifts::rol(cpu, mode),
        Mnemonic::Ror => shifts::ror(cpu, mode),

        Mnemonic::Inc => inc_dec::inc(cpu, mode),
        Mnemonic::Dec => inc_dec::dec(cpu, mode),
        Mnemonic::Inx => inc_dec::inx(cpu),
        Mnemonic::Iny => inc_dec::iny(cpu),
        Mnemonic::Dex => inc_dec::dex(cpu),
        Mnemonic::Dey => inc_dec::dey(cpu),

        Mnemonic::Bcc => branches::branch(cpu, Status::CARRY, false),
        Mnemonic::Bcs => branches::branch(cpu, Status::CARRY, true),
        Mnemonic::Bne => branches::branch(cpu, Status::ZERO, false),
        Mnemonic::Beq => branches::branch(cpu, Status::ZERO, true),
        Mnemonic::Bpl => branches::branch(cpu, Status::NEGATIVE, false),
        Mnemonic::Bmi => branches::branch(cpu, Status::NEGATIVE, true),
        Mnemonic::Bvc => branches::branch(cpu, Status::OVERFLOW, false),
        Mnemonic::Bvs => branches::branch(cpu, Status::OVERFLOW, true),

        Mnemonic::Jmp => control::jmp(cpu, mode),
        Mnemonic::Jsr => control::jsr(cpu, mode),
        Mnemonic::Rts => control::rts(cpu),
        Mnemonic::Rti => control::rti(cpu),
        Mnemonic::Brk => control::brk(cpu),
        Mnemonic::Nop => Timing::Fixed,

        Mnemonic::Pha => stack::pha(cpu),
        Mnemonic::Php => stack::php(cpu),
        Mnemonic::Pla => stack::pla(cpu),
        Mnemonic::Plp => stack::plp(cpu),

        Mnemonic::Clc => flags::assign(cpu, Status::CARRY, false),
        Mnemonic::Sec => flags::assign(cpu, Status::CARRY, true),
        Mnemonic::Cli => flags::assign(cpu, Status::INTERRUPT_DISABLE, false),
        Mnemonic::Sei => flags::assign(cpu, Status::INTERRUPT_DISABLE, true),
        Mnemonic::Cld => flags::assign(cpu, Status::DECIMAL, false),
        Mnemonic::Sed => flags::assign(cpu, Status::DECIMAL, true),
        Mnemonic::Clv => flags::assign(cpu, Status::OVERFLOW, false),

        Mnemonic::Tax => transfer::tax(cpu),
        Mnemonic::Tay => transfer::tay(cpu),
        Mnemonic::Txa => transfer::txa(cpu),
        Mnemonic::Tya => transfer::tya(cpu),
        Mnemonic::Tsx => transfer::tsx(cpu),
        Mnemonic::Txs => transfer::txs(cpu),
    };

    extra_cycles(opcode.penalty, timing)
}

fn extra_cycles(penalty: CyclePenalty, timing: Timing) -> u8 {
    match (penalty, timing) {
        (CyclePenalty::PageCross, Timing::Read { page_crossed: true }) => 1,
        (
            CyclePenalty::Branch,
            Timing::Branch {
                taken: true,
                page_crossed,
            },
        ) => 1 + u8::from(page_crossed),
        (CyclePenalty::BranchTakenOnly, Timing::Branch { taken: true, .. }) => 1,
        _ => 0,
    }
}

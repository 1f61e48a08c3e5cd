//! # NMOS 6502 CPU Emulator
//!
//! A cycle-accurate emulator of the MOS Technology 6502 for host applications
//! such as retro-computer and console emulators. The host supplies memory
//! contents and drives execution; the crate decodes and executes the 151
//! documented opcodes with hardware cycle counts, flag algebra, decimal mode
//! and the indirect-JMP page-wrap defect.
//!
//! ## Quick Start
//!
//! ```rust
//! use nmos6502::{Cpu, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // LDA #$42; STA $0200
//! memory.blit(&[0xA9, 0x42, 0x8D, 0x00, 0x02], 0x8000);
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.run_for_ticks(6).unwrap();
//!
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.memory().peek(0x0200), 0x42);
//! assert_eq!(cpu.cycles(), 6);
//! ```
//!
//! ## Memory-Mapped I/O
//!
//! ```rust
//! use nmos6502::{Cpu, FlatMemory, MemoryController};
//!
//! let mut ram = FlatMemory::new();
//! ram.blit(&[0x00, 0x80], 0xFFFC);
//! ram.blit(&[0xAD, 0x00, 0xD0], 0x8000); // LDA $D000
//!
//! let mut cpu = Cpu::new(MemoryController::new(ram, [0xD000]));
//! cpu.set_io_read_callback(|_| Some(0x99));
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 0x99);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, execution loop and control surface
//! - `registers` - Register file and `Status` flags
//! - `memory` - `MemoryBus` trait and `FlatMemory`
//! - `controller` - `MemoryController` with I/O interception
//! - `addressing` - Addressing modes and effective-address resolution
//! - `alu` - Flag-updating arithmetic
//! - `opcodes` - Opcode table
//! - `interrupts` - Interrupt latches and service
//! - `shared` - Thread-safe `SharedCpu` handle
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and installs no logger. Per-instruction
//! tracing is emitted at `trace` level.

pub mod addressing;
pub mod alu;
pub mod controller;
pub mod cpu;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod shared;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use controller::{IoReadCallback, IoWriteCallback, MemoryController};
pub use cpu::{Cpu, OpcodeHook, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, STACK_BASE};
pub use interrupts::Signals;
pub use memory::{FlatMemory, MemoryBus, ADDRESS_SPACE};
pub use opcodes::{decode, CyclePenalty, Mnemonic, Opcode, OPCODE_TABLE};
pub use registers::{Registers, Status};
pub use shared::SharedCpu;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The byte at `address` is not a documented opcode.
    ///
    /// The CPU halts itself with PC left at `address`.
    IllegalOpcode { opcode: u8, address: u16 },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::IllegalOpcode { opcode, address } => {
                write!(f, "Illegal opcode 0x{:02X} at 0x{:04X}", opcode, address)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

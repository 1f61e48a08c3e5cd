//! Fuzz target for CPU execution.
//!
//! Builds an arbitrary register file, memory image and interrupt state, then
//! runs a short burst of instructions. Any panic is a bug; so is a cycle
//! counter that moves backwards or an instruction that runs for free.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nmos6502::{Cpu, FlatMemory, MemoryBus, Status};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Raw status byte (bit 5 is forced on by the setter)
    status: u8,
    irq: bool,
    nmi: bool,
}

/// Memory regions for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Code at 0x8000
    program: [u8; 32],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Data at 0x4000 for absolute addressing
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x80);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0x80);

    memory.blit(&input.memory.program, 0x8000);
    memory.blit(&input.memory.zero_page, 0x0000);
    memory.blit(&input.memory.stack_page, 0x0100);
    memory.blit(&input.memory.main_memory, 0x4000);

    let mut cpu = Cpu::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(Status::from_bits_retain(input.cpu_state.status));
    if input.cpu_state.irq {
        cpu.request_irq();
    }
    if input.cpu_state.nmi {
        cpu.request_nmi();
    }

    for _ in 0..input.steps % 16 {
        let before = cpu.cycles();
        match cpu.step() {
            Ok(()) => assert!(cpu.cycles() > before),
            Err(_) => {
                assert!(cpu.is_halted());
                assert!(cpu.cycles() >= before);
                break;
            }
        }
    }
});

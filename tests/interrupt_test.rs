//! Integration tests for NMI and IRQ handling.
//!
//! These tests verify:
//! - Service happens before the next fetch and costs 6 (NMI) / 7 (IRQ) cycles
//! - The handler's first instruction executes in the same step
//! - I flag masking of IRQ, never of NMI
//! - NMI priority over a simultaneous IRQ
//! - Requests raised from another thread

use std::sync::Arc;
use std::thread;

use nmos6502::{Cpu, FlatMemory, MemoryBus, Status};

/// CPU with reset at 0x8000, NMI handler at 0x9000 and IRQ handler at 0xA000.
/// Both handlers are `NOP; RTI`; the main program is NOPs.
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.blit(&[0x00, 0x90], 0xFFFA);
    memory.blit(&[0x00, 0x80], 0xFFFC);
    memory.blit(&[0x00, 0xA0], 0xFFFE);
    memory.blit(&[0xEA; 32], 0x8000);
    memory.blit(&[0xEA, 0x40], 0x9000);
    memory.blit(&[0xEA, 0x40], 0xA000);
    Cpu::new(memory)
}

#[test]
fn test_irq_masked_by_default() {
    let mut cpu = setup_cpu();
    cpu.request_irq();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
    assert!(cpu.signals().irq_pending());
}

#[test]
fn test_irq_serviced_then_handler_runs() {
    let mut cpu = setup_cpu();
    cpu.set_flag(Status::INTERRUPT_DISABLE, false);
    cpu.request_irq();

    cpu.step().unwrap();

    // 7 for the service sequence + 2 for the handler's NOP
    assert_eq!(cpu.cycles(), 9);
    assert_eq!(cpu.pc(), 0xA001);
    assert!(cpu.flag_i());
    assert!(!cpu.signals().irq_pending());

    // Stack frame: PC 0x8000, P with I clear
    assert_eq!(cpu.memory().peek(0x01FF), 0x80);
    assert_eq!(cpu.memory().peek(0x01FE), 0x00);
    assert_eq!(cpu.memory().peek(0x01FD), 0x20);
}

#[test]
fn test_irq_rti_returns_and_unmasks() {
    let mut cpu = setup_cpu();
    cpu.set_flag(Status::INTERRUPT_DISABLE, false);
    cpu.request_irq();

    cpu.step().unwrap(); // service + NOP
    cpu.step().unwrap(); // RTI

    assert_eq!(cpu.pc(), 0x8000);
    assert!(!cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.cycles(), 7 + 2 + 6);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i());
    cpu.request_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9001);
    assert_eq!(cpu.cycles(), 6 + 2);
    assert!(!cpu.signals().nmi_pending());
}

#[test]
fn test_nmi_has_priority_over_irq() {
    let mut cpu = setup_cpu();
    cpu.set_flag(Status::INTERRUPT_DISABLE, false);
    cpu.request_irq();
    cpu.request_nmi();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x9001);

    // RTI from the NMI handler restores I clear, so the IRQ is taken next
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8000);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA001);
}

#[test]
fn test_repeated_requests_coalesce() {
    let mut cpu = setup_cpu();
    cpu.request_nmi();
    cpu.request_nmi();
    cpu.request_nmi();

    cpu.step().unwrap(); // NMI + NOP
    cpu.step().unwrap(); // RTI
    cpu.step().unwrap(); // main NOP, no second NMI

    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_cli_lets_pending_irq_through() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x58); // CLI
    cpu.request_irq();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8001);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA001);
}

#[test]
fn test_irq_requested_from_another_thread() {
    let mut cpu = setup_cpu();
    cpu.set_flag(Status::INTERRUPT_DISABLE, false);

    let signals = cpu.signals();
    thread::spawn(move || signals.request_irq()).join().unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA001);
}

#[test]
fn test_interrupts_do_not_run_while_halted() {
    let mut cpu = setup_cpu();
    let signals = Arc::clone(&cpu.signals());
    signals.halt();
    signals.request_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.cycles(), 0);
    assert!(signals.nmi_pending());

    cpu.resume();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x9001);
}

#[test]
fn test_reset_keeps_pending_latches() {
    let mut cpu = setup_cpu();
    cpu.request_nmi();
    cpu.request_irq();

    cpu.reset();

    assert!(cpu.signals().nmi_pending());
    assert!(cpu.signals().irq_pending());

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x9001);
    // Reset sets I, so the IRQ stays latched
    assert!(cpu.signals().irq_pending());
}

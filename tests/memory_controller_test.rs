//! Memory controller tests: I/O interception as seen by executing code.

use std::sync::{Arc, Mutex};

use nmos6502::{Cpu, FlatMemory, MemoryBus, MemoryController};

const IO_PORT: u16 = 0xD000;

/// Helper function to create a CPU with reset vector at 0x8000 and one I/O port
fn setup_cpu() -> Cpu<MemoryController> {
    let mut ram = FlatMemory::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    Cpu::new(MemoryController::new(ram, [IO_PORT]))
}

#[test]
fn test_lda_from_io_port_uses_callback() {
    let mut cpu = setup_cpu();
    cpu.blit(&[0xAD, 0x00, 0xD0], 0x8000); // LDA $D000
    cpu.memory_mut().ram_mut().write(IO_PORT, 0x11);
    cpu.set_io_read_callback(|_| Some(0x42));

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.memory().peek(IO_PORT), 0x11);
}

#[test]
fn test_sta_to_io_port_stores_callback_result() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&written);

    let mut cpu = setup_cpu();
    cpu.blit(&[0xA9, 0x41, 0x8D, 0x00, 0xD0], 0x8000); // LDA #$41; STA $D000
    cpu.set_io_write_callback(move |addr, value| {
        sink.lock().unwrap().push((addr, value));
        value | 0x80
    });

    cpu.run_for_ticks(6).unwrap();

    assert_eq!(*written.lock().unwrap(), vec![(IO_PORT, 0x41)]);
    assert_eq!(cpu.memory().peek(IO_PORT), 0xC1);
}

#[test]
fn test_non_io_addresses_never_reach_callbacks() {
    let mut cpu = setup_cpu();
    cpu.blit(&[0xA9, 0x55, 0x8D, 0x01, 0xD0], 0x8000); // LDA #$55; STA $D001
    cpu.set_io_write_callback(|_, _| panic!("write callback called for RAM"));
    cpu.set_io_read_callback(|_| panic!("read callback called for RAM"));

    cpu.run_for_ticks(6).unwrap();
    assert_eq!(cpu.memory().peek(0xD001), 0x55);
}

#[test]
fn test_read_callback_none_falls_through_to_ram() {
    let mut cpu = setup_cpu();
    cpu.blit(&[0xAD, 0x00, 0xD0], 0x8000);
    cpu.memory_mut().ram_mut().write(IO_PORT, 0x33);
    cpu.set_io_read_callback(|_| None);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x33);
}

#[test]
fn test_read_modify_write_on_io_port() {
    let reads = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&reads);

    let mut cpu = setup_cpu();
    cpu.blit(&[0xEE, 0x00, 0xD0], 0x8000); // INC $D000
    cpu.set_io_read_callback(move |_| {
        *counter.lock().unwrap() += 1;
        Some(0x0F)
    });

    cpu.step().unwrap();

    assert_eq!(*reads.lock().unwrap(), 1);
    assert_eq!(cpu.memory().peek(IO_PORT), 0x10);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_blit_clamps_at_top_of_memory() {
    let mut cpu = setup_cpu();
    let copied = cpu.blit(&[0x01, 0x02, 0x03], 0xFFFE);

    assert_eq!(copied, 2);
    assert_eq!(cpu.memory().peek(0xFFFE), 0x01);
    assert_eq!(cpu.memory().peek(0xFFFF), 0x02);
    assert_eq!(cpu.memory().peek(0x0000), 0x00);
}

#[test]
fn test_io_address_set() {
    let memory = MemoryController::new(FlatMemory::new(), [0xD000, 0xD001, 0xD000]);

    assert_eq!(memory.io_addresses().len(), 2);
    assert!(memory.is_io_address(0xD001));
    assert!(!memory.is_io_address(0xD002));
}

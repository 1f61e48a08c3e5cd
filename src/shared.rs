//! # Shared CPU Handle
//!
//! `SharedCpu` lets several threads drive one CPU: a video thread running
//! frames, a device thread raising interrupts, a debugger halting execution.
//!
//! Execution and state access are serialized by a mutex, so each instruction
//! completes before any other entry point observes or changes the CPU.
//! Interrupt requests and halt/resume go straight to the atomic latches and
//! never wait on the mutex; a `halt()` issued while another thread is inside
//! `run_for_ticks` stops it at the next instruction boundary.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::interrupts::Signals;
use crate::registers::Registers;
use crate::{Cpu, ExecutionError, MemoryBus};

/// Clonable, thread-safe handle to a single [`Cpu`].
///
/// # Examples
///
/// ```
/// use nmos6502::{Cpu, FlatMemory, SharedCpu};
///
/// let mut memory = FlatMemory::new();
/// memory.blit(&[0x00, 0x80], 0xFFFC);
/// memory.blit(&[0xEA; 16], 0x8000); // NOPs
///
/// let cpu = SharedCpu::new(Cpu::new(memory));
/// let worker = cpu.clone();
///
/// std::thread::spawn(move || worker.run_for_ticks(8).unwrap())
///     .join()
///     .unwrap();
///
/// assert_eq!(cpu.registers().pc, 0x8004);
/// ```
pub struct SharedCpu<M: MemoryBus> {
    cpu: Arc<Mutex<Cpu<M>>>,
    signals: Arc<Signals>,
}

impl<M: MemoryBus> Clone for SharedCpu<M> {
    fn clone(&self) -> Self {
        Self {
            cpu: Arc::clone(&self.cpu),
            signals: Arc::clone(&self.signals),
        }
    }
}

impl<M: MemoryBus> SharedCpu<M> {
    pub fn new(cpu: Cpu<M>) -> Self {
        let signals = cpu.signals();
        Self {
            cpu: Arc::new(Mutex::new(cpu)),
            signals,
        }
    }

    /// Locks the CPU. A poisoned lock is recovered: the CPU is only ever
    /// observed between instructions, where its state is consistent.
    fn lock(&self) -> MutexGuard<'_, Cpu<M>> {
        self.cpu.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the CPU.
    pub fn with<R>(&self, f: impl FnOnce(&mut Cpu<M>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn step(&self) -> Result<(), ExecutionError> {
        self.lock().step()
    }

    pub fn run_for_ticks(&self, ticks: u64) -> Result<u64, ExecutionError> {
        self.lock().run_for_ticks(ticks)
    }

    pub fn run_for_frame(&self, clock_mhz: f64, fps: u32) -> Result<u64, ExecutionError> {
        self.lock().run_for_frame(clock_mhz, fps)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Snapshot of the register file.
    pub fn registers(&self) -> Registers {
        self.lock().registers()
    }

    pub fn cycles(&self) -> u64 {
        self.lock().cycles()
    }

    // Lock-free entry points.

    pub fn request_irq(&self) {
        self.signals.request_irq();
    }

    pub fn request_nmi(&self) {
        self.signals.request_nmi();
    }

    pub fn halt(&self) {
        log::debug!("halt requested through shared handle");
        self.signals.halt();
    }

    pub fn resume(&self) {
        self.signals.resume();
    }

    pub fn is_halted(&self) -> bool {
        self.signals.is_halted()
    }

    pub fn signals(&self) -> Arc<Signals> {
        Arc::clone(&self.signals)
    }
}

impl<M: MemoryBus> std::fmt::Debug for SharedCpu<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCpu")
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}

//! # Interrupt Controller
//!
//! Pending-interrupt latches and the service sequence.
//!
//! The latches live in a [`Signals`] block shared through an `Arc`, so any
//! thread can raise NMI/IRQ or halt the CPU without holding a lock on it.
//! Repeated requests before service coalesce into one.
//!
//! Service happens at the start of each step, before the opcode fetch:
//!
//! 1. NMI pending: clear the latch, push PC (high, low) and P, set I, jump
//!    through 0xFFFA. 6 cycles.
//! 2. Otherwise IRQ pending and I clear: same sequence through 0xFFFE.
//!    7 cycles. With I set the latch is left alone and retried next step.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::cpu::{IRQ_VECTOR, NMI_VECTOR};
use crate::registers::Status;
use crate::{Cpu, MemoryBus};

/// Cycles charged for servicing an NMI.
pub const NMI_CYCLES: u8 = 6;

/// Cycles charged for servicing an IRQ.
pub const IRQ_CYCLES: u8 = 7;

/// Interrupt and halt latches shared between the CPU and its host.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use nmos6502::Signals;
///
/// let signals = Arc::new(Signals::new());
/// let device = Arc::clone(&signals);
///
/// std::thread::spawn(move || device.request_irq()).join().unwrap();
/// assert!(signals.irq_pending());
/// ```
#[derive(Debug, Default)]
pub struct Signals {
    nmi: AtomicBool,
    irq: AtomicBool,
    halted: AtomicBool,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches a non-maskable interrupt.
    pub fn request_nmi(&self) {
        self.nmi.store(true, Ordering::Relaxed);
    }

    /// Latches a maskable interrupt.
    pub fn request_irq(&self) {
        self.irq.store(true, Ordering::Relaxed);
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi.load(Ordering::Relaxed)
    }

    pub fn irq_pending(&self) -> bool {
        self.irq.load(Ordering::Relaxed)
    }

    /// Stops execution at the next instruction boundary.
    pub fn halt(&self) {
        self.halted.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.halted.store(false, Ordering::Relaxed);
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Relaxed)
    }

    fn take_nmi(&self) -> bool {
        self.nmi.swap(false, Ordering::Relaxed)
    }

    fn take_irq(&self) -> bool {
        self.irq.swap(false, Ordering::Relaxed)
    }
}

impl<M: MemoryBus> Cpu<M> {
    /// Services at most one pending interrupt. Returns the cycles spent.
    pub(crate) fn service_interrupts(&mut self) -> u8 {
        if self.signals.take_nmi() {
            log::debug!("servicing NMI at PC={:#06X}", self.regs.pc);
            self.enter_interrupt(NMI_VECTOR);
            return NMI_CYCLES;
        }

        if !self.regs.flag(Status::INTERRUPT_DISABLE) && self.signals.take_irq() {
            log::debug!("servicing IRQ at PC={:#06X}", self.regs.pc);
            self.enter_interrupt(IRQ_VECTOR);
            return IRQ_CYCLES;
        }

        0
    }

    /// Pushes PC and P, masks IRQ and loads PC from `vector`.
    ///
    /// Shared by hardware interrupts and BRK. P is pushed with bit 5 set and
    /// B exactly as currently held, so RTI restores the register unchanged.
    pub(crate) fn enter_interrupt(&mut self, vector: u16) {
        self.push_word(self.regs.pc);
        self.push((self.regs.p | Status::UNUSED).bits());
        self.regs.set_flag(Status::INTERRUPT_DISABLE);
        self.regs.pc = self.memory.read_word(vector);
    }
}

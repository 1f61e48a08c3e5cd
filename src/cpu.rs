//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, SP, PC and the status register P (see [`Registers`])
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Signals**: interrupt and halt latches shared with the host
//!
//! ## Execution Model
//!
//! Each `step()`:
//! 1. Does nothing if the CPU is halted
//! 2. Services one pending interrupt (NMI before IRQ)
//! 3. Fetches the opcode at PC and calls the opcode hook
//! 4. Executes the instruction and charges its cycles
//!
//! `run_for_ticks()` repeats `step()` until a cycle budget is spent or the CPU halts.

use std::sync::Arc;

use crate::controller::MemoryController;
use crate::instructions;
use crate::interrupts::Signals;
use crate::opcodes::decode;
use crate::registers::{Registers, Status};
use crate::{ExecutionError, MemoryBus};

/// Address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Address of the NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Trace hook called once per fetched instruction with the opcode's address,
/// the opcode byte and a snapshot of the registers.
pub type OpcodeHook = dyn FnMut(u16, u8, &Registers) + Send;

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use nmos6502::{Cpu, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = Cpu::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert!(cpu.flag_i()); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct Cpu<M: MemoryBus> {
    pub(crate) regs: Registers,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    pub(crate) memory: M,

    pub(crate) signals: Arc<Signals>,

    opcode_hook: Option<Box<OpcodeHook>>,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a new CPU owning the given memory bus.
    ///
    /// PC is loaded from the reset vector at 0xFFFC/0xFFFD using `peek`, so
    /// I/O callbacks are not triggered. SP is 0xFF and P is `{UNUSED, I}`.
    pub fn new(memory: M) -> Self {
        let lo = memory.peek(RESET_VECTOR);
        let hi = memory.peek(RESET_VECTOR.wrapping_add(1));
        let pc = u16::from_le_bytes([lo, hi]);

        log::debug!("cpu created, reset vector {:#06X}", pc);

        Self {
            regs: Registers::new(pc),
            cycles: 0,
            memory,
            signals: Arc::new(Signals::new()),
            opcode_hook: None,
        }
    }

    /// Returns registers to their power-on state and reloads PC from the
    /// reset vector (read through the bus).
    ///
    /// The cycle counter and interrupt latches are left untouched.
    pub fn reset(&mut self) {
        let pc = self.memory.read_word(RESET_VECTOR);
        self.regs = Registers::new(pc);
        log::debug!("cpu reset, PC={:#06X}", pc);
    }

    /// Executes one instruction, servicing a pending interrupt first.
    ///
    /// Does nothing while halted. An undefined opcode halts the CPU, leaves
    /// PC pointing at the offending byte and charges no cycles.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::{Cpu, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = Cpu::new(mem);
    /// cpu.step().unwrap();
    ///
    /// assert_eq!(cpu.pc(), 0x8001);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.signals.is_halted() {
            return Ok(());
        }

        self.cycles += self.service_interrupts() as u64;

        let address = self.regs.pc;
        let byte = self.memory.read(address);
        if let Some(hook) = self.opcode_hook.as_mut() {
            hook(address, byte, &self.regs);
        }

        let Some(opcode) = decode(byte) else {
            self.signals.halt();
            log::error!("illegal opcode {:#04X} at {:#06X}, cpu halted", byte, address);
            return Err(ExecutionError::IllegalOpcode {
                opcode: byte,
                address,
            });
        };

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{:04X}  {}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
                address,
                opcode.mnemonic,
                self.regs.a,
                self.regs.x,
                self.regs.y,
                self.regs.p.bits(),
                self.regs.sp,
                self.cycles
            );
        }

        self.regs.pc = address.wrapping_add(1);
        let extra = instructions::execute(self, opcode);
        self.cycles += (opcode.base_cycles + extra) as u64;

        Ok(())
    }

    /// Runs until at least `ticks` cycles have elapsed or the CPU halts.
    ///
    /// Returns the cycles actually consumed, which may overshoot `ticks` by
    /// part of an instruction. `ticks == 0` executes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::{Cpu, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP
    /// }
    ///
    /// let mut cpu = Cpu::new(mem);
    /// assert_eq!(cpu.run_for_ticks(10).unwrap(), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_ticks(&mut self, ticks: u64) -> Result<u64, ExecutionError> {
        let start = self.cycles;

        while self.cycles - start < ticks && !self.signals.is_halted() {
            self.step()?;
        }

        Ok(self.cycles - start)
    }

    /// Runs for one video frame's worth of cycles:
    /// `ceil(clock_mhz * 1_000_000 / fps)`.
    ///
    /// A frame rate of zero runs nothing.
    pub fn run_for_frame(&mut self, clock_mhz: f64, fps: u32) -> Result<u64, ExecutionError> {
        if fps == 0 {
            log::warn!("run_for_frame called with fps == 0, nothing to run");
            return Ok(0);
        }

        let ticks = (clock_mhz * 1_000_000.0 / fps as f64).ceil();
        // Negative or NaN clock rates saturate to zero.
        self.run_for_ticks(ticks as u64)
    }

    // ========== Control Surface ==========

    /// Stops execution at the next instruction boundary.
    pub fn halt(&self) {
        if !self.signals.is_halted() {
            log::debug!("cpu halted at PC={:#06X}", self.regs.pc);
        }
        self.signals.halt();
    }

    pub fn resume(&self) {
        if self.signals.is_halted() {
            log::debug!("cpu resumed at PC={:#06X}", self.regs.pc);
        }
        self.signals.resume();
    }

    pub fn is_halted(&self) -> bool {
        self.signals.is_halted()
    }

    /// Latches an IRQ, serviced at the next step with I clear.
    pub fn request_irq(&self) {
        self.signals.request_irq();
    }

    /// Latches an NMI, serviced at the next step.
    pub fn request_nmi(&self) {
        self.signals.request_nmi();
    }

    /// The latch block, for raising interrupts from other threads.
    pub fn signals(&self) -> Arc<Signals> {
        Arc::clone(&self.signals)
    }

    /// Installs the trace hook, replacing any previous one.
    ///
    /// The hook runs after each opcode fetch and before execution.
    pub fn set_opcode_hook<F>(&mut self, hook: F)
    where
        F: FnMut(u16, u8, &Registers) + Send + 'static,
    {
        self.opcode_hook = Some(Box::new(hook));
    }

    pub fn clear_opcode_hook(&mut self) {
        self.opcode_hook = None;
    }

    // ========== Fetch and Stack Helpers ==========

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    /// Writes to 0x0100 + SP, then decrements SP (wrapping).
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// Increments SP (wrapping), then reads from 0x0100 + SP.
    pub(crate) fn pull(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.regs.sp as u16)
    }

    /// Pushes high byte first, so the word sits little-endian on the stack.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }

    // ========== Register Getters ==========

    pub fn a(&self) -> u8 {
        self.regs.a
    }

    pub fn x(&self) -> u8 {
        self.regs.x
    }

    pub fn y(&self) -> u8 {
        self.regs.y
    }

    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register.
    pub fn status(&self) -> Status {
        self.regs.p
    }

    /// Returns the total number of cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns true if every bit of `flag` is set in P.
    pub fn flag(&self, flag: Status) -> bool {
        self.regs.flag(flag)
    }

    pub fn flag_n(&self) -> bool {
        self.regs.flag(Status::NEGATIVE)
    }

    pub fn flag_v(&self) -> bool {
        self.regs.flag(Status::OVERFLOW)
    }

    pub fn flag_b(&self) -> bool {
        self.regs.flag(Status::BREAK)
    }

    pub fn flag_d(&self) -> bool {
        self.regs.flag(Status::DECIMAL)
    }

    pub fn flag_i(&self) -> bool {
        self.regs.flag(Status::INTERRUPT_DISABLE)
    }

    pub fn flag_z(&self) -> bool {
        self.regs.flag(Status::ZERO)
    }

    pub fn flag_c(&self) -> bool {
        self.regs.flag(Status::CARRY)
    }

    /// A copy of the register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    // ========== Register Setters ==========

    /// Direct access to the register file, for debuggers and test harnesses.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    /// Replaces P; bit 5 is forced on.
    pub fn set_status(&mut self, value: Status) {
        self.regs.p = value | Status::UNUSED;
    }

    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.regs.assign_flag(flag, value);
    }

    // ========== Memory Access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU, returning its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

impl Cpu<MemoryController> {
    /// Bulk-copies `data` to `base`, bypassing I/O interception.
    pub fn blit(&mut self, data: &[u8], base: u16) -> usize {
        self.memory.blit(data, base)
    }

    pub fn set_io_read_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u16) -> Option<u8> + Send + 'static,
    {
        self.memory.set_io_read_callback(callback);
    }

    pub fn set_io_write_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u16, u8) -> u8 + Send + 'static,
    {
        self.memory.set_io_write_callback(callback);
    }
}

impl<M: MemoryBus> std::fmt::Debug for Cpu<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("regs", &self.regs)
            .field("cycles", &self.cycles)
            .field("signals", &self.signals)
            .field("opcode_hook", &self.opcode_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;
    use std::sync::Mutex;

    fn setup_cpu() -> Cpu<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        Cpu::new(mem)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.status().bits(), 0x24);
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_new_does_not_trigger_io_reads() {
        let mut memory = MemoryController::new(FlatMemory::new(), [0xFFFC, 0xFFFD]);
        memory.ram_mut().write(0xFFFC, 0x34);
        memory.ram_mut().write(0xFFFD, 0x12);
        memory.set_io_read_callback(|_| panic!("reset vector read went through I/O"));

        let cpu = Cpu::new(memory);
        assert_eq!(cpu.pc(), 0x1234);
    }

    #[test]
    fn test_stack_push_pull_wraps() {
        let mut cpu = setup_cpu();
        cpu.set_sp(0x00);

        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().peek(0x0100), 0xAB);

        assert_eq!(cpu.pull(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_push_word_is_little_endian_in_memory() {
        let mut cpu = setup_cpu();
        cpu.push_word(0x1234);

        assert_eq!(cpu.memory().peek(0x01FF), 0x12);
        assert_eq!(cpu.memory().peek(0x01FE), 0x34);
        assert_eq!(cpu.pull_word(), 0x1234);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_illegal_opcode_halts_and_rewinds() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x02);

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::IllegalOpcode {
                opcode: 0x02,
                address: 0x8000
            })
        );
        assert!(cpu.is_halted());
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.cycles(), 0);

        // Halted: further steps are no-ops
        assert_eq!(cpu.step(), Ok(()));
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_opcode_hook_sees_pre_execution_state() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().blit(&[0xA9, 0x42, 0xEA], 0x8000);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        cpu.set_opcode_hook(move |pc, opcode, regs| {
            log.lock().unwrap().push((pc, opcode, regs.a));
        });

        cpu.step().unwrap();
        cpu.step().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(0x8000, 0xA9, 0x00), (0x8002, 0xEA, 0x42)]
        );

        cpu.clear_opcode_hook();
        cpu.memory_mut().write(0x8003, 0xEA);
        cpu.step().unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_reset_keeps_cycles() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0xEA);
        cpu.step().unwrap();
        cpu.set_a(0x55);
        cpu.set_sp(0x10);

        cpu.reset();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.status(), Status::POWER_ON);
        assert_eq!(cpu.cycles(), 2);
    }

    #[test]
    fn test_set_status_forces_unused_bit() {
        let mut cpu = setup_cpu();
        cpu.set_status(Status::empty());
        assert_eq!(cpu.status(), Status::UNUSED);

        cpu.set_flag(Status::UNUSED, false);
        assert!(cpu.flag(Status::UNUSED));
    }
}

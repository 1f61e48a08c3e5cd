//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, interrupt
//! injection and state inspection over a flat 64KB memory.

use wasm_bindgen::prelude::*;

use crate::{Cpu, ExecutionError, FlatMemory, MemoryBus, RESET_VECTOR};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionError> for JsError {
    fn from(error: ExecutionError) -> Self {
        JsError::new(&error.to_string())
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: Cpu<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create an emulator with zeroed memory (reset vector 0x0000)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator6502 {
            cpu: Cpu::new(FlatMemory::new()),
        }
    }

    /// Copy a program into memory; returns the number of bytes loaded
    pub fn load(&mut self, program: &[u8], address: u16) -> usize {
        self.cpu.memory_mut().blit(program, address)
    }

    /// Point the reset vector at `address` (takes effect on `reset`)
    pub fn set_reset_vector(&mut self, address: u16) {
        let [lo, hi] = address.to_le_bytes();
        let memory = self.cpu.memory_mut();
        memory.write(RESET_VECTOR, lo);
        memory.write(RESET_VECTOR.wrapping_add(1), hi);
    }

    /// Reset registers and reload PC from the reset vector
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        Ok(self.cpu.step()?)
    }

    /// Execute for at least `ticks` cycles and return actual cycles executed
    pub fn run_for_ticks(&mut self, ticks: u32) -> Result<u32, JsError> {
        let elapsed = self.cpu.run_for_ticks(ticks as u64)?;
        Ok(saturate_cycles(elapsed))
    }

    /// Execute one frame at the given clock rate and frame rate
    pub fn run_for_frame(&mut self, clock_mhz: f64, fps: u32) -> Result<u32, JsError> {
        let elapsed = self.cpu.run_for_frame(clock_mhz, fps)?;
        Ok(saturate_cycles(elapsed))
    }

    pub fn request_irq(&self) {
        self.cpu.request_irq();
    }

    pub fn request_nmi(&self) {
        self.cpu.request_nmi();
    }

    pub fn halt(&self) {
        self.cpu.halt();
    }

    pub fn resume(&self) {
        self.cpu.resume();
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status().bits()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    /// Write a single byte to memory
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy of a 256-byte page (for efficient display)
    pub fn memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let start = (page as usize) << 8;
        js_sys::Uint8Array::from(&self.cpu.memory().as_slice()[start..start + 0x100])
    }
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrows a cycle count for JS, clamping at `u32::MAX`.
fn saturate_cycles(elapsed: u64) -> u32 {
    u32::try_from(elapsed).unwrap_or(u32::MAX)
}

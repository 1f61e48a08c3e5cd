//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! memory implementation, and `FlatMemory`, the raw 64KB backing store.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Reads may have side effects (memory-mapped I/O), so `read` takes `&mut self`
//! - `peek` is the side-effect-free path used where the CPU must bypass I/O,
//!   such as loading the reset vector at construction

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Examples
///
/// ```
/// use nmos6502::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// assert_eq!(mem.peek(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use nmos6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> u8 {
///         self.peek(addr)
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM (0x8000+) are silently ignored
///     }
///
///     fn peek(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// May trigger device side effects. Must never panic for any `u16`.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Implementations may ignore writes to read-only regions.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads the backing byte at `addr` without any side effects.
    fn peek(&self, addr: u16) -> u8;

    /// Reads a little-endian word at `addr`, `addr + 1` (wrapping at 0xFFFF).
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }
}

/// Size of the 6502 address space in bytes.
pub const ADDRESS_SPACE: usize = 0x10000;

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) map to a single contiguous array
/// initialized to 0x00.
///
/// # Examples
///
/// ```
/// use nmos6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.blit(&[0xA9, 0x42], 0x8000); // LDA #$42
///
/// let cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; ADDRESS_SPACE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Creates memory pre-filled from `bytes`, starting at address 0x0000.
    ///
    /// Bytes beyond 64KB are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut memory = Self::new();
        memory.blit(bytes, 0x0000);
        memory
    }

    /// Copies `data` into memory starting at `base`, never writing past 0xFFFF.
    ///
    /// Returns the number of bytes copied.
    pub fn blit(&mut self, data: &[u8], base: u16) -> usize {
        let start = base as usize;
        let len = data.len().min(ADDRESS_SPACE - start);
        self.data[start..start + len].copy_from_slice(&data[..len]);
        if len < data.len() {
            log::warn!(
                "blit at {:#06X} truncated from {} to {} bytes",
                base,
                data.len(),
                len
            );
        }
        len
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    /// Returns the whole address space as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("len", &self.data.len())
            .finish()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }
}

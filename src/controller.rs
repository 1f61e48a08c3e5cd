//! # Memory Controller
//!
//! `MemoryController` layers an I/O interception policy over a `FlatMemory`
//! backing store. A fixed set of addresses is flagged as I/O; accesses to
//! those addresses are offered to host-supplied callbacks before (read) or
//! instead of (write) touching the raw bytes.
//!
//! - The read callback returns `Option<u8>`: `Some(v)` overrides the stored
//!   byte, `None` falls through to memory.
//! - The write callback returns the byte that is actually stored. Usually the
//!   value passed in, but a device may transform it (e.g. mask unused bits).
//!
//! Callbacks run inline during instruction dispatch and must not block.

use std::collections::HashSet;

use crate::memory::{FlatMemory, MemoryBus};

/// Host read hook for I/O addresses.
pub type IoReadCallback = dyn FnMut(u16) -> Option<u8> + Send;

/// Host write hook for I/O addresses; returns the byte to store.
pub type IoWriteCallback = dyn FnMut(u16, u8) -> u8 + Send;

/// 64KB memory with memory-mapped I/O interception.
///
/// # Examples
///
/// ```
/// use nmos6502::{FlatMemory, MemoryBus, MemoryController};
///
/// let mut memory = MemoryController::new(FlatMemory::new(), [0xD000]);
/// memory.set_io_read_callback(|addr| (addr == 0xD000).then_some(0x7F));
///
/// assert_eq!(memory.read(0xD000), 0x7F);
/// assert_eq!(memory.read(0xD001), 0x00);
/// ```
pub struct MemoryController {
    ram: FlatMemory,
    io_addresses: HashSet<u16>,
    io_read: Option<Box<IoReadCallback>>,
    io_write: Option<Box<IoWriteCallback>>,
}

impl MemoryController {
    /// Wraps `ram`, intercepting accesses to `io_addresses`.
    pub fn new(ram: FlatMemory, io_addresses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            ram,
            io_addresses: io_addresses.into_iter().collect(),
            io_read: None,
            io_write: None,
        }
    }

    /// Installs the read hook, replacing any previous one.
    pub fn set_io_read_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u16) -> Option<u8> + Send + 'static,
    {
        self.io_read = Some(Box::new(callback));
    }

    /// Installs the write hook, replacing any previous one.
    pub fn set_io_write_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u16, u8) -> u8 + Send + 'static,
    {
        self.io_write = Some(Box::new(callback));
    }

    /// Removes both hooks; I/O addresses then behave like plain RAM.
    pub fn clear_io_callbacks(&mut self) {
        self.io_read = None;
        self.io_write = None;
    }

    pub fn is_io_address(&self, addr: u16) -> bool {
        self.io_addresses.contains(&addr)
    }

    pub fn io_addresses(&self) -> &HashSet<u16> {
        &self.io_addresses
    }

    /// Bulk-copies `data` to `base` without I/O interception.
    ///
    /// Clamped so nothing is written past 0xFFFF. Returns the bytes copied.
    pub fn blit(&mut self, data: &[u8], base: u16) -> usize {
        self.ram.blit(data, base)
    }

    /// The raw backing store.
    pub fn ram(&self) -> &FlatMemory {
        &self.ram
    }

    /// The raw backing store, for direct population.
    pub fn ram_mut(&mut self) -> &mut FlatMemory {
        &mut self.ram
    }

    /// Unwraps the controller, returning the backing store.
    pub fn into_ram(self) -> FlatMemory {
        self.ram
    }
}

impl Default for MemoryController {
    fn default() -> Self {
        Self::new(FlatMemory::new(), [])
    }
}

impl std::fmt::Debug for MemoryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryController")
            .field("io_addresses", &self.io_addresses.len())
            .field("io_read", &self.io_read.is_some())
            .field("io_write", &self.io_write.is_some())
            .finish()
    }
}

impl MemoryBus for MemoryController {
    fn read(&mut self, addr: u16) -> u8 {
        if self.io_addresses.contains(&addr) {
            if let Some(value) = self.io_read.as_mut().and_then(|read| read(addr)) {
                return value;
            }
        }
        self.ram.peek(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        let value = match self.io_write.as_mut() {
            Some(write) if self.io_addresses.contains(&addr) => write(addr, value),
            _ => value,
        };
        self.ram.write(addr, value);
    }

    fn peek(&self, addr: u16) -> u8 {
        self.ram.peek(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_plain_addresses_bypass_callbacks() {
        let mut memory = MemoryController::new(FlatMemory::new(), [0xD000]);
        memory.set_io_read_callback(|_| Some(0xFF));
        memory.set_io_write_callback(|_, _| 0xFF);

        memory.write(0x1234, 0x42);
        assert_eq!(memory.read(0x1234), 0x42);
    }

    #[test]
    fn test_read_callback_none_falls_through() {
        let mut memory = MemoryController::new(FlatMemory::new(), [0xD000]);
        memory.ram_mut().write(0xD000, 0x11);
        memory.set_io_read_callback(|_| None);

        assert_eq!(memory.read(0xD000), 0x11);
    }

    #[test]
    fn test_write_callback_transforms_stored_value() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        let mut memory = MemoryController::new(FlatMemory::new(), [0xD020]);
        memory.set_io_write_callback(move |addr, value| {
            log.lock().unwrap().push((addr, value));
            value & 0x0F
        });

        memory.write(0xD020, 0xAB);

        assert_eq!(memory.peek(0xD020), 0x0B);
        assert_eq!(*seen.lock().unwrap(), vec![(0xD020, 0xAB)]);
    }

    #[test]
    fn test_io_address_without_callbacks_is_ram() {
        let mut memory = MemoryController::new(FlatMemory::new(), [0xD000]);
        memory.write(0xD000, 0x55);
        assert_eq!(memory.read(0xD000), 0x55);
    }

    #[test]
    fn test_blit_bypasses_write_callback() {
        let mut memory = MemoryController::new(FlatMemory::new(), [0x0200]);
        memory.set_io_write_callback(|_, _| 0x00);

        assert_eq!(memory.blit(&[0xAA, 0xBB], 0x0200), 2);
        assert_eq!(memory.peek(0x0200), 0xAA);
        assert_eq!(memory.peek(0x0201), 0xBB);
    }

    #[test]
    fn test_clear_io_callbacks() {
        let mut memory = MemoryController::new(FlatMemory::new(), [0xD000]);
        memory.set_io_read_callback(|_| Some(0x99));
        memory.clear_io_callbacks();

        assert_eq!(memory.read(0xD000), 0x00);
        assert!(memory.is_io_address(0xD000));
    }
}

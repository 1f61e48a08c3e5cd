//! WebAssembly bindings for the nmos6502 emulator.
//!
//! This module provides JavaScript-callable interfaces to the 6502 CPU emulator,
//! enabling browser-based hosts to load programs and drive execution.

pub mod api;

pub use api::{Emulator6502, JsError};

//! Keryx Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (STM32F4, etc.). This enables the board-agnostic
//! console logic in `keryx-core` to run against real registers on target
//! and against recording mocks on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (keryx-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keryx-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keryx-hal-stm32f4                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialHardware`] - clock, pin-mux and UART configuration
//! - [`serial::SerialTx`] - blocking byte transmission

#![no_std]
#![deny(unsafe_code)]

// Host tests use std collections for recording mocks
#[cfg(test)]
extern crate std;

pub mod gpio;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use gpio::{PinMode, Pull};
pub use serial::{SerialHardware, SerialTx, UartConfig};

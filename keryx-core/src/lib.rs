//! Board-agnostic console logic for the Keryx firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - The bring-up sequencer that orders clock, pin-mux and UART setup
//! - The console output shim (newline translation, stream validation)
//!
//! Everything here is exercised by host tests against recording mocks of
//! the `keryx-hal` traits.

#![no_std]
#![deny(unsafe_code)]

// Host tests use std collections for recording mocks
#[cfg(test)]
extern crate std;

pub mod bringup;
pub mod console;

pub use bringup::{bring_up, SerialLayout};
pub use console::{Console, ConsoleError, StreamId};

//! STM32F4-specific HAL for the Keryx console firmware
//!
//! This crate provides the STM32F401 implementation of the `keryx-hal`
//! traits: clock gating through RCC, pin muxing on GPIOA and a
//! register-level USART2 transmit driver.
//!
//! Register access is by owned handle ([`serial::ConsolePort`]) rather than
//! ambient globals; the firmware creates one at boot and passes it around.
//! Addresses and field layouts follow RM0368 (STM32F401 reference manual).

#![no_std]

pub mod pins;
pub mod serial;

// Re-export the console port at crate root for convenience
pub use serial::{console_layout, ConsolePort};

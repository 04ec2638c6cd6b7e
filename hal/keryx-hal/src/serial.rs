//! UART serial communication abstractions
//!
//! Provides the configuration types and traits that chip-specific HALs
//! implement to expose a transmit-capable UART.

use crate::gpio::{PinMode, Pull};

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Hardware flow control
    pub flow_control: FlowControl,
    /// Which halves of the peripheral are active
    pub direction: Direction,
}

impl Default for UartConfig {
    /// The console configuration: 115200 8N1, no flow control, TX only.
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            direction: Direction::Tx,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// Hardware flow control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowControl {
    None,
    RtsCts,
}

/// Active directions of the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Transmit only
    Tx,
    /// Receive only
    Rx,
    /// Both
    TxRx,
}

/// Register-level serial hardware
///
/// The configuration surface a chip exposes for bringing one UART transmit
/// path into operation: clock gating, pin muxing, frame-format setup and the
/// final enable. All operations are plain register pokes with no failure
/// path; the hardware does not report misuse.
///
/// Implementations must apply exactly what each call says and nothing more.
/// In particular `configure_serial` must not enable the peripheral - the
/// caller sequences `enable_serial` last, after all parameters are set.
pub trait SerialHardware {
    /// Chip-specific pin identity
    type Pin: Copy;
    /// Chip-specific clock-gate identity
    type ClockDomain: Copy;

    /// Enable clock distribution to one peripheral
    ///
    /// Idempotent; enabling an already-enabled clock has no effect.
    fn enable_clock(&mut self, domain: Self::ClockDomain);

    /// Set the electrical mode and bias of a pin
    fn set_pin_mode(&mut self, pin: Self::Pin, mode: PinMode, pull: Pull);

    /// Select which peripheral an alternate-function pin routes to
    fn set_pin_alt_function(&mut self, pin: Self::Pin, function: u8);

    /// Write the UART frame format, baud rate, flow control and direction
    fn configure_serial(&mut self, config: &UartConfig);

    /// Enable the UART
    ///
    /// Must be called after `configure_serial`; an enabled-but-unconfigured
    /// transmitter fails silently.
    fn enable_serial(&mut self);
}

/// Blocking UART transmitter
///
/// Transmission cannot fail in this design: an unready peripheral stalls
/// the call (busy-wait) rather than erroring. Acceptable because nothing
/// else needs to run concurrently.
pub trait SerialTx {
    /// Transmit one byte, blocking until the hardware accepts it
    fn send_blocking(&mut self, byte: u8);

    /// Transmit a buffer byte-by-byte
    fn write_blocking(&mut self, data: &[u8]) {
        for &byte in data {
            self.send_blocking(byte);
        }
    }
}

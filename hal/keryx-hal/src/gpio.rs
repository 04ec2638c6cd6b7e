//! GPIO pin configuration types
//!
//! Only the configuration vocabulary lives here; the actual register
//! manipulation is done by chip-specific HALs.

/// Electrical mode of a pin
///
/// `AlternateFunction` routes the pin to an internal peripheral instead of
/// the plain digital I/O path. Which peripheral is selected separately via
/// the alternate-function index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
    AlternateFunction,
    Analog,
}

/// Pull-up/pull-down bias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

//! Console UART bring-up
//!
//! The hardware gives no diagnostics for a misordered setup: enabling the
//! UART before its clock or its parameters leaves a transmitter that fails
//! silently (no output, or garbage). The required order therefore lives in
//! exactly one place, this module, instead of being re-sequenced by every
//! board.

use keryx_hal::gpio::{PinMode, Pull};
use keryx_hal::serial::{SerialHardware, UartConfig};

/// Routing facts for one console UART on one chip
///
/// Which clock gates feed the pin bank and the serial controller, which pin
/// carries TX, and which alternate-function index routes that pin to the
/// controller. Chip HALs provide a ready-made value of this for their
/// conventional console port.
pub struct SerialLayout<H: SerialHardware + ?Sized> {
    /// Clock gate for the GPIO bank holding the TX pin
    pub bank_clock: H::ClockDomain,
    /// Clock gate for the serial controller
    pub serial_clock: H::ClockDomain,
    /// The transmit pin
    pub tx_pin: H::Pin,
    /// Alternate-function index routing `tx_pin` to the controller's TX line
    pub tx_function: u8,
}

/// Bring the console UART into a known, operating state
///
/// Runs the fixed sequence: clocks, pin mux, serial parameters, serial
/// enable. Must complete before the first `send_blocking`; transmitting on
/// an unclocked or disabled controller is undefined on real hardware.
///
/// Every step is an idempotent register write, so running the whole
/// sequence a second time leaves the peripheral state unchanged.
pub fn bring_up<H: SerialHardware>(hw: &mut H, layout: &SerialLayout<H>, config: &UartConfig) {
    // Clocks first: the GPIO and UART register blocks are dead until gated in
    hw.enable_clock(layout.bank_clock);
    hw.enable_clock(layout.serial_clock);

    // Route the pin to the peripheral, no bias on a push-pull TX line
    hw.set_pin_mode(layout.tx_pin, PinMode::AlternateFunction, Pull::None);
    hw.set_pin_alt_function(layout.tx_pin, layout.tx_function);

    // Parameters before enable; the UART latches its format when enabled
    hw.configure_serial(config);
    hw.enable_serial();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// One recorded hardware call
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        EnableClock(u8),
        SetPinMode(u8, PinMode, Pull),
        SetPinAltFunction(u8, u8),
        ConfigureSerial,
        EnableSerial,
    }

    /// Records every call and mirrors the idempotent register state
    #[derive(Default)]
    struct MockHardware {
        calls: Vec<Call>,
        clocks_enabled: [bool; 8],
        pin_mode: Option<(PinMode, Pull)>,
        pin_function: Option<u8>,
        config: Option<UartConfig>,
        enabled: bool,
    }

    impl SerialHardware for MockHardware {
        type Pin = u8;
        type ClockDomain = u8;

        fn enable_clock(&mut self, domain: u8) {
            self.calls.push(Call::EnableClock(domain));
            self.clocks_enabled[domain as usize] = true;
        }

        fn set_pin_mode(&mut self, pin: u8, mode: PinMode, pull: Pull) {
            self.calls.push(Call::SetPinMode(pin, mode, pull));
            self.pin_mode = Some((mode, pull));
        }

        fn set_pin_alt_function(&mut self, pin: u8, function: u8) {
            self.calls.push(Call::SetPinAltFunction(pin, function));
            self.pin_function = Some(function);
        }

        fn configure_serial(&mut self, config: &UartConfig) {
            self.calls.push(Call::ConfigureSerial);
            self.config = Some(*config);
        }

        fn enable_serial(&mut self) {
            self.calls.push(Call::EnableSerial);
            self.enabled = true;
        }
    }

    fn layout() -> SerialLayout<MockHardware> {
        SerialLayout {
            bank_clock: 0,
            serial_clock: 1,
            tx_pin: 2,
            tx_function: 7,
        }
    }

    #[test]
    fn test_bring_up_order() {
        let mut hw = MockHardware::default();
        bring_up(&mut hw, &layout(), &UartConfig::default());

        assert_eq!(
            hw.calls,
            [
                Call::EnableClock(0),
                Call::EnableClock(1),
                Call::SetPinMode(2, PinMode::AlternateFunction, Pull::None),
                Call::SetPinAltFunction(2, 7),
                Call::ConfigureSerial,
                Call::EnableSerial,
            ]
        );
    }

    #[test]
    fn test_bring_up_configures_before_enable() {
        let mut hw = MockHardware::default();
        bring_up(&mut hw, &layout(), &UartConfig::default());

        let configure = hw
            .calls
            .iter()
            .position(|c| *c == Call::ConfigureSerial)
            .unwrap();
        let enable = hw.calls.iter().position(|c| *c == Call::EnableSerial).unwrap();
        assert!(configure < enable);
        assert!(hw.enabled);
        assert_eq!(hw.config, Some(UartConfig::default()));
    }

    #[test]
    fn test_bring_up_is_idempotent() {
        let mut hw = MockHardware::default();
        let config = UartConfig::default();
        bring_up(&mut hw, &layout(), &config);

        let clocks = hw.clocks_enabled;
        let pin_mode = hw.pin_mode;
        let pin_function = hw.pin_function;
        let uart = hw.config;

        // Second run must leave the observable peripheral state unchanged
        bring_up(&mut hw, &layout(), &config);
        assert_eq!(hw.clocks_enabled, clocks);
        assert_eq!(hw.pin_mode, pin_mode);
        assert_eq!(hw.pin_function, pin_function);
        assert_eq!(hw.config, uart);
        assert!(hw.enabled);
    }
}

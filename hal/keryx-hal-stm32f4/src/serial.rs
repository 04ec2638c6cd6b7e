//! Register-level USART2 console driver for the STM32F401
//!
//! Implements `SerialHardware` and `SerialTx` with volatile writes to the
//! RCC, GPIOA and USART2 register blocks. No interrupts, no DMA: the
//! transmit path busy-waits on TXE and stores one byte at a time, which is
//! all a boot console needs.

use core::ptr;

use keryx_core::bringup::SerialLayout;
use keryx_hal::gpio::{PinMode, Pull};
use keryx_hal::serial::{DataBits, Direction, FlowControl, Parity, SerialHardware, SerialTx, StopBits, UartConfig};

use crate::pins::{ClockDomain, Pin, USART2_TX_AF};

// Register block bases (RM0368, memory map)
const RCC_BASE: usize = 0x4002_3800;
const GPIOA_BASE: usize = 0x4002_0000;
const USART2_BASE: usize = 0x4000_4400;

// RCC register offsets and enable bits
const RCC_AHB1ENR: usize = 0x30;
const RCC_APB1ENR: usize = 0x40;
const AHB1ENR_GPIOAEN: u32 = 1 << 0;
const APB1ENR_USART2EN: u32 = 1 << 17;

// GPIO register offsets
const GPIO_MODER: usize = 0x00;
const GPIO_PUPDR: usize = 0x0C;
const GPIO_AFRL: usize = 0x20;
const GPIO_AFRH: usize = 0x24;

// USART register offsets
const USART_SR: usize = 0x00;
const USART_DR: usize = 0x04;
const USART_BRR: usize = 0x08;
const USART_CR1: usize = 0x0C;
const USART_CR2: usize = 0x10;
const USART_CR3: usize = 0x14;

// USART bit fields
const SR_TXE: u32 = 1 << 7;
const CR1_UE: u32 = 1 << 13;
const CR1_M: u32 = 1 << 12;
const CR1_PCE: u32 = 1 << 10;
const CR1_PS: u32 = 1 << 9;
const CR1_TE: u32 = 1 << 3;
const CR1_RE: u32 = 1 << 2;
const CR2_STOP_TWO: u32 = 0b10 << 12;
const CR3_CTSE: u32 = 1 << 9;
const CR3_RTSE: u32 = 1 << 8;

/// APB1 clock after reset: HSI at 16 MHz, no PLL, no prescaling.
/// The firmware never reprograms the clock tree, only gates peripherals in.
const PCLK1_HZ: u32 = 16_000_000;

/// BRR value for a baud rate at 16x oversampling
///
/// The register holds the divider as a 12.4 fixed-point value, which with
/// OVER8 = 0 is just `pclk / baud` rounded to the nearest sixteenth.
pub const fn baud_divisor(pclk_hz: u32, baudrate: u32) -> u32 {
    (pclk_hz + baudrate / 2) / baudrate
}

/// Owned handle over the console's register blocks
///
/// Holds the RCC, GPIOA and USART2 base addresses plus the peripheral clock
/// frequency the baud divisor is computed against. Create one at boot and
/// keep it; constructing a second handle would alias the same hardware.
pub struct ConsolePort {
    rcc: usize,
    gpio: usize,
    usart: usize,
    pclk_hz: u32,
}

impl ConsolePort {
    /// The USART2 console on PA2 (NUCLEO-F401RE virtual COM port path)
    pub const fn usart2() -> Self {
        Self {
            rcc: RCC_BASE,
            gpio: GPIOA_BASE,
            usart: USART2_BASE,
            pclk_hz: PCLK1_HZ,
        }
    }

    fn read(&self, base: usize, offset: usize) -> u32 {
        // Volatile: hardware registers change behind the compiler's back
        unsafe { ptr::read_volatile((base + offset) as *const u32) }
    }

    fn write(&mut self, base: usize, offset: usize, value: u32) {
        unsafe { ptr::write_volatile((base + offset) as *mut u32, value) }
    }

    fn modify(&mut self, base: usize, offset: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read(base, offset);
        self.write(base, offset, f(value));
    }

    /// Replace a multi-bit field: clear `mask` at `shift`, then set `bits`
    fn set_field(&mut self, base: usize, offset: usize, shift: u32, mask: u32, bits: u32) {
        self.modify(base, offset, |v| (v & !(mask << shift)) | (bits << shift));
    }
}

impl SerialHardware for ConsolePort {
    type Pin = Pin;
    type ClockDomain = ClockDomain;

    fn enable_clock(&mut self, domain: ClockDomain) {
        match domain {
            ClockDomain::GpioA => {
                self.modify(self.rcc, RCC_AHB1ENR, |v| v | AHB1ENR_GPIOAEN);
            }
            ClockDomain::Usart2 => {
                self.modify(self.rcc, RCC_APB1ENR, |v| v | APB1ENR_USART2EN);
            }
        }
    }

    fn set_pin_mode(&mut self, pin: Pin, mode: PinMode, pull: Pull) {
        let shift = u32::from(pin.index()) * 2;

        let mode_bits = match mode {
            PinMode::Input => 0b00,
            PinMode::Output => 0b01,
            PinMode::AlternateFunction => 0b10,
            PinMode::Analog => 0b11,
        };
        self.set_field(self.gpio, GPIO_MODER, shift, 0b11, mode_bits);

        let pull_bits = match pull {
            Pull::None => 0b00,
            Pull::Up => 0b01,
            Pull::Down => 0b10,
        };
        self.set_field(self.gpio, GPIO_PUPDR, shift, 0b11, pull_bits);
    }

    fn set_pin_alt_function(&mut self, pin: Pin, function: u8) {
        // AFRL covers lines 0..=7, AFRH the rest, four bits per line
        let index = pin.index();
        let (offset, slot) = if index < 8 {
            (GPIO_AFRL, index)
        } else {
            (GPIO_AFRH, index - 8)
        };
        let shift = u32::from(slot) * 4;
        self.set_field(self.gpio, offset, shift, 0b1111, u32::from(function & 0x0F));
    }

    fn configure_serial(&mut self, config: &UartConfig) {
        self.write(
            self.usart,
            USART_BRR,
            baud_divisor(self.pclk_hz, config.baudrate),
        );

        // UE stays clear here; enable_serial() sets it after the format is in
        let mut cr1 = 0;
        if config.data_bits == DataBits::Nine {
            cr1 |= CR1_M;
        }
        match config.parity {
            Parity::None => {}
            Parity::Even => cr1 |= CR1_PCE,
            Parity::Odd => cr1 |= CR1_PCE | CR1_PS,
        }
        match config.direction {
            Direction::Tx => cr1 |= CR1_TE,
            Direction::Rx => cr1 |= CR1_RE,
            Direction::TxRx => cr1 |= CR1_TE | CR1_RE,
        }
        self.write(self.usart, USART_CR1, cr1);

        let cr2 = match config.stop_bits {
            StopBits::One => 0,
            StopBits::Two => CR2_STOP_TWO,
        };
        self.write(self.usart, USART_CR2, cr2);

        let cr3 = match config.flow_control {
            FlowControl::None => 0,
            FlowControl::RtsCts => CR3_RTSE | CR3_CTSE,
        };
        self.write(self.usart, USART_CR3, cr3);
    }

    fn enable_serial(&mut self) {
        self.modify(self.usart, USART_CR1, |v| v | CR1_UE);
    }
}

impl SerialTx for ConsolePort {
    fn send_blocking(&mut self, byte: u8) {
        // Busy-wait until the transmit data register empties
        while self.read(self.usart, USART_SR) & SR_TXE == 0 {}
        self.write(self.usart, USART_DR, u32::from(byte));
    }
}

/// Routing facts for the USART2 console: PA2, alternate function 7
pub fn console_layout() -> SerialLayout<ConsolePort> {
    SerialLayout {
        bank_clock: ClockDomain::GpioA,
        serial_clock: ClockDomain::Usart2,
        tx_pin: Pin::PA2,
        tx_function: USART2_TX_AF,
    }
}

//! Pin and clock-gate identities for the STM32F401 console port

/// Peripheral clock gates this HAL can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDomain {
    /// GPIO bank A, on AHB1
    GpioA,
    /// USART2, on APB1
    Usart2,
}

/// A line of the GPIOA bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    /// PA2 - USART2 TX on alternate function 7
    pub const PA2: Pin = Pin(2);

    /// Line index within the bank (0..=15)
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Alternate function index routing PA2 to USART2_TX
pub const USART2_TX_AF: u8 = 7;

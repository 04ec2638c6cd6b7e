//! Keryx - UART console firmware
//!
//! Firmware binary for the NUCLEO-F401RE. Brings up the USART2 console on
//! PA2, announces one greeting over the serial line and idles forever.
//!
//! Named after the Greek "keryx" meaning "herald" - a messenger with
//! exactly one announcement to make.

#![no_std]
#![no_main]

use core::fmt::Write;

use cortex_m_rt::entry;
use defmt::info;
use {defmt_rtt as _, panic_probe as _};

use keryx_core::bringup::bring_up;
use keryx_core::console::Console;
use keryx_hal::serial::UartConfig;
use keryx_hal_stm32f4::{console_layout, ConsolePort};

/// The boot banner. The blank lines push the greeting below the boot
/// chatter an emulated board (Renode) prints on the same terminal.
const BANNER: &str = "\n\n\n\n\nHello world from Dojo Five!\n";

#[entry]
fn main() -> ! {
    info!("Keryx firmware starting...");

    // Clocks, pin mux, serial parameters, serial enable - in that order.
    // Transmitting before bring-up completes fails silently.
    let mut port = ConsolePort::usart2();
    bring_up(&mut port, &console_layout(), &UartConfig::default());
    info!("console UART up (115200 8N1, TX on PA2)");

    let mut console = Console::new(port);
    write!(console.stdout(), "{}", BANNER).ok();

    // Nothing left to do and nothing to schedule; sleep between interrupts
    // that never come.
    loop {
        cortex_m::asm::wfi();
    }
}

//! Console output shim
//!
//! Routes generic text output to the serial transmitter, byte-by-byte,
//! translating the in-memory LF-only line endings into the CR-LF pairs a
//! serial terminal expects. The formatted-output path goes through
//! [`StreamWriter`] (a `core::fmt::Write` / `embedded_io::Write`
//! implementation handed to the printing code), replacing the symbol-level
//! `_write` override the original platform relied on.
//!
//! Nothing is buffered: every byte is transmitted and discarded as it
//! arrives, and a blocking transmit cannot fail, so once a write is
//! accepted all of its bytes are guaranteed onto the wire.

mod stream;

pub use stream::StreamId;

use core::convert::Infallible;
use core::fmt;

use keryx_hal::serial::SerialTx;

/// Errors the console can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// The target descriptor is neither stdout nor stderr
    InvalidStream,
}

impl embedded_io::Error for ConsoleError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            ConsoleError::InvalidStream => embedded_io::ErrorKind::InvalidInput,
        }
    }
}

/// The console: owns the serial transmitter and the last-error state
///
/// Both accepted streams share the single serial line; the distinction
/// exists only to validate callers that address streams by descriptor.
pub struct Console<T: SerialTx> {
    tx: T,
    last_error: Option<ConsoleError>,
}

impl<T: SerialTx> Console<T> {
    /// Wrap a configured, enabled transmitter
    ///
    /// The transmitter must already be brought up (see
    /// [`crate::bringup::bring_up`]); writing through an unconfigured one
    /// fails silently on hardware.
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            last_error: None,
        }
    }

    /// Write bytes to an accepted stream
    ///
    /// Each `\n` is transmitted as `\r\n`; every other byte goes out
    /// unmodified. Blocks per byte until the hardware accepts it. Returns
    /// the number of *input* bytes consumed - injected carriage returns are
    /// not counted - which always equals `bytes.len()`.
    pub fn write(&mut self, stream: StreamId, bytes: &[u8]) -> usize {
        let _ = stream; // both streams share the one serial line
        for &byte in bytes {
            if byte == b'\n' {
                self.tx.send_blocking(b'\r');
            }
            self.tx.send_blocking(byte);
        }
        bytes.len()
    }

    /// Write bytes to a stream addressed by raw descriptor
    ///
    /// The syscall-shaped entry point: an unknown descriptor transmits
    /// nothing, records [`ConsoleError::InvalidStream`] and returns `-1`;
    /// otherwise returns the consumed byte count.
    pub fn write_raw(&mut self, target: i32, bytes: &[u8]) -> isize {
        match StreamId::from_raw(target) {
            Some(stream) => self.write(stream, bytes) as isize,
            None => {
                self.last_error = Some(ConsoleError::InvalidStream);
                -1
            }
        }
    }

    /// The most recent error recorded by [`Console::write_raw`]
    pub fn last_error(&self) -> Option<ConsoleError> {
        self.last_error
    }

    /// A writer handle for standard output
    pub fn stdout(&mut self) -> StreamWriter<'_, T> {
        StreamWriter {
            console: self,
            stream: StreamId::Stdout,
        }
    }

    /// A writer handle for standard error
    pub fn stderr(&mut self) -> StreamWriter<'_, T> {
        StreamWriter {
            console: self,
            stream: StreamId::Stderr,
        }
    }

    /// Release the underlying transmitter
    pub fn release(self) -> T {
        self.tx
    }
}

/// A borrowed writer bound to one stream
///
/// This is what formatted-output code is handed: `write!`/`writeln!` work
/// through the `core::fmt::Write` impl, and byte-oriented code through
/// `embedded_io::Write`. Writes through it cannot fail.
pub struct StreamWriter<'a, T: SerialTx> {
    console: &'a mut Console<T>,
    stream: StreamId,
}

impl<T: SerialTx> fmt::Write for StreamWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.write(self.stream, s.as_bytes());
        Ok(())
    }
}

impl<T: SerialTx> embedded_io::ErrorType for StreamWriter<'_, T> {
    type Error = Infallible;
}

impl<T: SerialTx> embedded_io::Write for StreamWriter<'_, T> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(self.console.write(self.stream, buf))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Transmission is synchronous; nothing is ever buffered
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;
    use proptest::prelude::*;
    use std::vec::Vec;

    /// Captures every byte the console pushes at the transmitter
    #[derive(Default)]
    struct Recorder {
        sent: Vec<u8>,
    }

    impl SerialTx for Recorder {
        fn send_blocking(&mut self, byte: u8) {
            self.sent.push(byte);
        }
    }

    fn console() -> Console<Recorder> {
        Console::new(Recorder::default())
    }

    #[test]
    fn test_plain_bytes_pass_through() {
        let mut console = console();
        let n = console.write(StreamId::Stdout, b"abc");
        assert_eq!(n, 3);
        assert_eq!(console.release().sent, b"abc");
    }

    #[test]
    fn test_newline_becomes_cr_lf() {
        let mut console = console();
        let n = console.write(StreamId::Stdout, b"Hi\n");
        assert_eq!(n, 3);
        assert_eq!(console.release().sent, b"Hi\r\n");
    }

    #[test]
    fn test_empty_write() {
        let mut console = console();
        let n = console.write(StreamId::Stdout, b"");
        assert_eq!(n, 0);
        assert!(console.release().sent.is_empty());
    }

    #[test]
    fn test_stderr_shares_the_line() {
        let mut console = console();
        console.write(StreamId::Stderr, b"err\n");
        assert_eq!(console.release().sent, b"err\r\n");
    }

    #[test]
    fn test_write_raw_accepts_both_streams() {
        let mut console = console();
        assert_eq!(console.write_raw(1, b"out"), 3);
        assert_eq!(console.write_raw(2, b"err"), 3);
        assert_eq!(console.last_error(), None);
        assert_eq!(console.release().sent, b"outerr");
    }

    #[test]
    fn test_write_raw_rejects_unknown_descriptor() {
        let mut console = console();
        assert_eq!(console.write_raw(7, b"x"), -1);
        assert_eq!(console.last_error(), Some(ConsoleError::InvalidStream));
        // nothing may reach the wire on a rejected write
        assert!(console.release().sent.is_empty());
    }

    #[test]
    fn test_error_is_io_class() {
        use embedded_io::Error as _;
        assert_eq!(
            ConsoleError::InvalidStream.kind(),
            embedded_io::ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_fmt_write_routes_through_shim() {
        let mut console = console();
        write!(console.stdout(), "v{}.{}\n", 0, 1).unwrap();
        assert_eq!(console.release().sent, b"v0.1\r\n");
    }

    #[test]
    fn test_embedded_io_write() {
        use embedded_io::Write as _;
        let mut console = console();
        let mut writer = console.stdout();
        assert_eq!(writer.write(b"ab\n"), Ok(3));
        assert_eq!(writer.flush(), Ok(()));
        assert_eq!(console.release().sent, b"ab\r\n");
    }

    #[test]
    fn test_boot_banner_sequence() {
        // What main() emits: five blank lines, the greeting, one newline
        let mut console = console();
        let n = console.write(StreamId::Stdout, b"\n\n\n\n\nHello world from Dojo Five!\n");
        assert_eq!(n, 33);
        assert_eq!(
            console.release().sent,
            b"\r\n\r\n\r\n\r\n\r\nHello world from Dojo Five!\r\n"
        );
    }

    proptest! {
        #[test]
        fn prop_no_newline_input_is_unmodified(
            bytes in proptest::collection::vec(any::<u8>().prop_filter("no LF", |b| *b != b'\n'), 0..256)
        ) {
            let mut console = console();
            let n = console.write(StreamId::Stdout, &bytes);
            prop_assert_eq!(n, bytes.len());
            prop_assert_eq!(console.release().sent, bytes);
        }

        #[test]
        fn prop_every_lf_is_preceded_by_cr(
            bytes in proptest::collection::vec(any::<u8>(), 0..256)
        ) {
            let mut console = console();
            let n = console.write(StreamId::Stdout, &bytes);
            prop_assert_eq!(n, bytes.len());

            let sent = console.release().sent;
            for (i, &byte) in sent.iter().enumerate() {
                if byte == b'\n' {
                    prop_assert!(i > 0);
                    prop_assert_eq!(sent[i - 1], b'\r');
                }
            }
        }

        #[test]
        fn prop_transmitted_length_counts_injected_crs(
            bytes in proptest::collection::vec(any::<u8>(), 0..256)
        ) {
            let newlines = bytes.iter().filter(|b| **b == b'\n').count();
            let mut console = console();
            console.write(StreamId::Stdout, &bytes);
            prop_assert_eq!(console.release().sent.len(), bytes.len() + newlines);
        }
    }
}

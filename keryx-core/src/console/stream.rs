//! Output stream identities
//!
//! The console accepts the two conventional output streams and nothing
//! else. Raw descriptor values follow the POSIX convention the original
//! toolchain used (1 = stdout, 2 = stderr).

/// An accepted output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamId {
    Stdout,
    Stderr,
}

impl StreamId {
    /// Raw descriptor for standard output
    pub const STDOUT: i32 = 1;
    /// Raw descriptor for standard error
    pub const STDERR: i32 = 2;

    /// Map a raw descriptor to a stream, rejecting everything else
    pub const fn from_raw(fd: i32) -> Option<Self> {
        match fd {
            Self::STDOUT => Some(StreamId::Stdout),
            Self::STDERR => Some(StreamId::Stderr),
            _ => None,
        }
    }

    /// The raw descriptor value of this stream
    pub const fn as_raw(self) -> i32 {
        match self {
            StreamId::Stdout => Self::STDOUT,
            StreamId::Stderr => Self::STDERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_descriptors() {
        assert_eq!(StreamId::from_raw(1), Some(StreamId::Stdout));
        assert_eq!(StreamId::from_raw(2), Some(StreamId::Stderr));
    }

    #[test]
    fn test_rejected_descriptors() {
        for fd in [-1, 0, 3, 7, i32::MAX] {
            assert_eq!(StreamId::from_raw(fd), None);
        }
    }

    #[test]
    fn test_raw_round_trip() {
        assert_eq!(StreamId::Stdout.as_raw(), 1);
        assert_eq!(StreamId::Stderr.as_raw(), 2);
    }
}

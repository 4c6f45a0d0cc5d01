// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

use super::registry::MAX_PACKET_SIZE;

/// Bounds required of the instant type returned by [`SudTimer::now`].
pub trait SudInstant: Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration> {}

impl<T> SudInstant for T where T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration> {}

/// Abstraction for the clock and delays used while polling.
pub trait SudTimer {
    type Instant: SudInstant;

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for the packet-oriented duplex link to a SUD.
///
/// One transport serves one device session. Sharing it between concurrent
/// pollers would corrupt packet matching, so the orchestrator takes it by value.
pub trait SudTransport {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Writes a raw command, blocking until it is accepted.
    ///
    /// Returns the number of bytes written.
    fn write_command(&mut self, command: &[u8]) -> Result<usize, Self::Error>;

    /// Attempts to read one packet into `buffer`.
    ///
    /// Returns `Ok(len)` with the number of bytes received, or
    /// `Err(nb::Error::WouldBlock)` if nothing has arrived yet. Other errors are
    /// returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_packet(&mut self, buffer: &mut [u8]) -> nb::Result<usize, Self::Error>;

    /// Size of a single packet on this link.
    fn packet_size(&self) -> usize {
        MAX_PACKET_SIZE
    }
}

/// [`SudTimer`] backed by the operating system clock.
#[cfg(feature = "std")]
#[derive(Debug, Default, Copy, Clone)]
pub struct StdTimer;

#[cfg(feature = "std")]
impl SudTimer for StdTimer {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

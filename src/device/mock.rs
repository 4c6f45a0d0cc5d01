// src/device/mock.rs
//
// Shared mocks for the device tests. Time only moves when a mock reads or
// delays, so timeouts are deterministic.

use crate::common::{
    hal_traits::{SudTimer, SudTransport},
    registry::MAX_PACKET_SIZE,
};
use core::cell::Cell;
use core::time::Duration;
use nb::Result as NbResult;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);
impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}
impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

// --- Mock Timer ---
pub struct MockTimer<'c> {
    pub clock: &'c Cell<u64>,
    /// Extra microseconds every delay takes, like a coarse real sleep.
    pub overshoot_us: u64,
}

impl<'c> MockTimer<'c> {
    pub fn new(clock: &'c Cell<u64>) -> Self {
        MockTimer { clock, overshoot_us: 0 }
    }
}

impl<'c> SudTimer for MockTimer<'c> {
    type Instant = MockInstant;
    fn now(&self) -> Self::Instant {
        MockInstant(self.clock.get())
    }
    fn delay_us(&mut self, us: u32) {
        self.clock.set(self.clock.get() + us as u64 + self.overshoot_us);
    }
    fn delay_ms(&mut self, ms: u32) {
        self.clock.set(self.clock.get() + (ms as u64) * 1000 + self.overshoot_us);
    }
}

/// One scripted outcome of `read_packet`.
#[derive(Debug, Copy, Clone)]
pub enum MockRead {
    /// A packet of the given length.
    Packet([u8; MAX_PACKET_SIZE], usize),
    /// Nothing arrived yet.
    Empty,
    /// The transport reported an error.
    Fail,
}

/// Builds a full-size packet starting with `prefix`.
pub fn packet(prefix: [u8; 2]) -> [u8; MAX_PACKET_SIZE] {
    let mut p = [0u8; MAX_PACKET_SIZE];
    p[0] = prefix[0];
    p[1] = prefix[1];
    p
}

// --- Mock Transport ---
pub struct MockTransport<'c> {
    pub clock: &'c Cell<u64>,
    pub reads: heapless::Deque<MockRead, 32>,
    pub read_count: usize,
    /// Microseconds each read takes.
    pub read_cost_us: u64,
    pub write_log: heapless::Vec<u8, 64>,
    pub write_count: usize,
    pub fail_writes: bool,
}

impl<'c> MockTransport<'c> {
    pub fn new(clock: &'c Cell<u64>) -> Self {
        MockTransport {
            clock,
            reads: heapless::Deque::new(),
            read_count: 0,
            read_cost_us: 1_000,
            write_log: heapless::Vec::new(),
            write_count: 0,
            fail_writes: false,
        }
    }

    pub fn stage(&mut self, read: MockRead) {
        self.reads.push_back(read).expect("mock read queue full");
    }

    pub fn stage_packet(&mut self, data: [u8; MAX_PACKET_SIZE]) {
        self.stage(MockRead::Packet(data, MAX_PACKET_SIZE));
    }
}

impl<'c> SudTransport for MockTransport<'c> {
    type Error = MockCommError;

    fn write_command(&mut self, command: &[u8]) -> Result<usize, Self::Error> {
        self.write_count += 1;
        if self.fail_writes {
            return Err(MockCommError);
        }
        self.write_log.clear();
        self.write_log.extend_from_slice(command).map_err(|_| MockCommError)?;
        Ok(command.len())
    }

    fn read_packet(&mut self, buffer: &mut [u8]) -> NbResult<usize, Self::Error> {
        self.read_count += 1;
        self.clock.set(self.clock.get() + self.read_cost_us);
        match self.reads.pop_front() {
            Some(MockRead::Packet(data, len)) => {
                let len = len.min(buffer.len());
                buffer[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            Some(MockRead::Fail) => Err(nb::Error::Other(MockCommError)),
            Some(MockRead::Empty) | None => Err(nb::Error::WouldBlock),
        }
    }
}

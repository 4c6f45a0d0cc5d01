// src/device/sync_device/io_helpers.rs

use super::SyncDevice;
use crate::common::{
    error::SudError,
    hal_traits::{SudTimer, SudTransport},
    registry::{read_definition_for, ReadDefinition},
    types::Validator,
};
use core::time::Duration;
use tracing::{trace, warn};

// Implementation block for I/O related helpers
impl<T, C> SyncDevice<T, C>
where
    T: SudTransport,
    C: SudTimer,
{
    /// Writes a command. A failed write ends the action: no answer can follow.
    pub(super) fn send_command(&mut self, command: &[u8]) -> Result<(), SudError<T::Error>> {
        let written = self.transport.write_command(command).map_err(SudError::Io)?;
        trace!(written, "command written");
        Ok(())
    }

    /// Reads packets until one starts with `rdef.validator`, returning its
    /// length. Other packets are dropped.
    ///
    /// `WouldBlock` and transport errors both mean "no data yet". After every
    /// read and every pause the time since `start` is checked against
    /// `timeout`, so no read starts once the budget is spent.
    pub(super) fn poll_for_packet(
        &mut self,
        rdef: &ReadDefinition,
        start: C::Instant,
        timeout: Duration,
        buffer: &mut [u8],
    ) -> Result<usize, SudError<T::Error>> {
        loop {
            let (matched, failed) = match self.transport.read_packet(buffer) {
                Ok(len) => {
                    let len = len.min(buffer.len());
                    let packet = &buffer[..len];
                    if rdef.validator.matches(packet) {
                        (Some(len), false)
                    } else {
                        let prefix = Validator::of_packet(packet);
                        trace!(
                            ?prefix,
                            known_kind = ?prefix.and_then(read_definition_for).map(|d| d.kind),
                            expected = %rdef.validator,
                            "discarding packet"
                        );
                        (None, false)
                    }
                }
                Err(nb::Error::WouldBlock) => (None, true),
                Err(nb::Error::Other(e)) => {
                    trace!(error = ?e, "read failed, retrying");
                    (None, true)
                }
            };

            let elapsed = self.check_deadline(rdef, start, timeout)?;

            if let Some(len) = matched {
                return Ok(len);
            }

            // Small delay prevents busy-spinning when the transport fails fast.
            // Never sleep past the deadline, and never read after it.
            if failed {
                let pause = self.config.poll_delay.min(timeout.saturating_sub(elapsed));
                if !pause.is_zero() {
                    self.pause(pause);
                    self.check_deadline(rdef, start, timeout)?;
                }
            }
        }
    }

    /// Time since `start`, or `Timeout` once it exceeds `timeout`.
    fn check_deadline(
        &self,
        rdef: &ReadDefinition,
        start: C::Instant,
        timeout: Duration,
    ) -> Result<Duration, SudError<T::Error>> {
        let elapsed = self.timer.now() - start;
        if elapsed > timeout {
            warn!(
                expected = %rdef.validator,
                elapsed_ms = elapsed.as_millis() as u64,
                "timed out waiting for response"
            );
            return Err(SudError::Timeout);
        }
        Ok(elapsed)
    }

    // delay_us takes a u32, which tops out a little past an hour.
    fn pause(&mut self, duration: Duration) {
        match u32::try_from(duration.as_micros()) {
            Ok(us) => self.timer.delay_us(us),
            Err(_) => self
                .timer
                .delay_ms(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)),
        }
    }
}

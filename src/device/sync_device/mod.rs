// src/device/sync_device/mod.rs

mod io_helpers;

use crate::common::{
    action::Action,
    error::SudError,
    hal_traits::{SudTimer, SudTransport},
    registry::{self, MAX_PACKET_SIZE},
    response::{Acknowledgement, InteractiveHandshake, Response, SensorReading},
    timing,
};
use core::time::Duration;
use tracing::debug;

/// Runtime settings for a [`SyncDevice`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SyncDeviceConfig {
    /// Budget for one action when none is given explicitly.
    pub action_timeout: Duration,
    /// Pause after a read that returned nothing or failed.
    pub poll_delay: Duration,
}

impl Default for SyncDeviceConfig {
    fn default() -> Self {
        SyncDeviceConfig {
            action_timeout: timing::DEFAULT_ACTION_TIMEOUT,
            poll_delay: timing::POLL_RETRY_DELAY,
        }
    }
}

/// Drives SUD actions over a transport, one at a time, blocking.
///
/// The device owns its transport, so two actions can never interleave their
/// polling. To share one device between threads, put the whole `SyncDevice`
/// behind a mutex.
#[derive(Debug)]
pub struct SyncDevice<T, C>
where
    T: SudTransport,
    C: SudTimer,
{
    transport: T,
    timer: C,
    config: SyncDeviceConfig,
}

impl<T, C> SyncDevice<T, C>
where
    T: SudTransport,
    C: SudTimer,
{
    pub fn new(transport: T, timer: C) -> Self {
        Self::with_config(transport, timer, SyncDeviceConfig::default())
    }

    pub fn with_config(transport: T, timer: C, config: SyncDeviceConfig) -> Self {
        SyncDevice { transport, timer, config }
    }

    pub fn config(&self) -> &SyncDeviceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Gives back the transport and timer.
    pub fn into_parts(self) -> (T, C) {
        (self.transport, self.timer)
    }

    // --- Public Blocking Methods ---

    /// Performs `action` within the configured timeout.
    pub fn action(&mut self, action: Action) -> Result<Response, SudError<T::Error>> {
        let timeout = self.config.action_timeout;
        self.action_with_timeout(action, timeout)
    }

    /// Performs `action`: writes its command if it has one, then waits for
    /// each expected packet in turn. Only the last one is decoded.
    ///
    /// Read failures are retried until `timeout` runs out. A timeout drops
    /// any packets already matched.
    pub fn action_with_timeout(
        &mut self,
        action: Action,
        timeout: Duration,
    ) -> Result<Response, SudError<T::Error>> {
        let definition = registry::action_definition(action);
        debug!(%action, timeout_ms = timeout.as_millis() as u64, "starting action");

        if let Some(command) = definition.command {
            self.send_command(command)?;
        }

        let start = self.timer.now();
        let packet_size = self.transport.packet_size().min(MAX_PACKET_SIZE);
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let mut matched = None;

        for rdef in definition.reads {
            let len = self.poll_for_packet(rdef, start, timeout, &mut buffer[..packet_size])?;
            debug!(%action, validator = %rdef.validator, "matched packet");
            matched = Some((rdef, len));
        }

        // Every action expects at least one packet.
        let (rdef, len) = matched.ok_or(SudError::UnexpectedResponse)?;
        let response = Response::from_packet(&buffer[..len], rdef)?;
        Ok(response)
    }

    /// Enters interactive mode. Needed before readings can be taken.
    pub fn enter_interactive_mode(&mut self) -> Result<InteractiveHandshake, SudError<T::Error>> {
        match self.action(Action::EnterInteractiveMode)? {
            Response::InteractiveHandshake(r) => Ok(r),
            _ => Err(SudError::UnexpectedResponse),
        }
    }

    pub fn leave_interactive_mode(&mut self) -> Result<Acknowledgement, SudError<T::Error>> {
        match self.action(Action::LeaveInteractiveMode)? {
            Response::Acknowledgement(r) => Ok(r),
            _ => Err(SudError::UnexpectedResponse),
        }
    }

    pub fn sensor_reading(&mut self) -> Result<SensorReading, SudError<T::Error>> {
        match self.action(Action::SensorReading)? {
            Response::SensorReading(r) => Ok(r),
            _ => Err(SudError::UnexpectedResponse),
        }
    }

    pub fn light_reading(&mut self) -> Result<SensorReading, SudError<T::Error>> {
        match self.action(Action::LightReading)? {
            Response::SensorReading(r) => Ok(r),
            _ => Err(SudError::UnexpectedResponse),
        }
    }
}

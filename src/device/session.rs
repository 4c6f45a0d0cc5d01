// src/device/session.rs
//
// Opens and closes the USB side of a SUD. The USB library itself sits behind
// `SudUsbBus` / `SudUsbDevice`; an adapter for any host stack only has to
// forward these calls.

use super::sync_device::SyncDevice;
use crate::common::{
    error::{EndpointDirection, SudError},
    hal_traits::{SudTimer, SudTransport},
    registry::MAX_PACKET_SIZE,
};
use core::fmt::Debug;
use tracing::{debug, info, warn};

/// USB vendor id of the Seneye USB Device.
pub const VENDOR_ID: u16 = 9463;
/// USB product id of the Seneye USB Device.
pub const PRODUCT_ID: u16 = 8708;
/// The HID interface every exchange goes through.
pub const INTERFACE_NUMBER: u8 = 0;

/// A resolved endpoint on the claimed interface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: u8,
    pub max_packet_size: u16,
}

/// Operations needed on one attached USB device.
pub trait SudUsbDevice {
    type Error: Debug;

    fn kernel_driver_active(&mut self, interface: u8) -> Result<bool, Self::Error>;

    fn detach_kernel_driver(&mut self, interface: u8) -> Result<(), Self::Error>;

    fn attach_kernel_driver(&mut self, interface: u8) -> Result<(), Self::Error>;

    /// Selects the device's default configuration.
    fn set_configuration(&mut self) -> Result<(), Self::Error>;

    fn claim_interface(&mut self, interface: u8) -> Result<(), Self::Error>;

    fn release_interface(&mut self, interface: u8) -> Result<(), Self::Error>;

    /// First endpoint of `interface` in the given direction, if any.
    fn find_endpoint(
        &mut self,
        interface: u8,
        direction: EndpointDirection,
    ) -> Result<Option<Endpoint>, Self::Error>;

    /// Blocking write to an OUT endpoint.
    fn write(&mut self, endpoint: u8, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read from an IN endpoint. `WouldBlock` if nothing is pending.
    fn read(&mut self, endpoint: u8, buffer: &mut [u8]) -> nb::Result<usize, Self::Error>;

    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Finds attached devices.
pub trait SudUsbBus {
    type Device: SudUsbDevice;

    fn find_device(
        &mut self,
        vendor_id: u16,
        product_id: u16,
    ) -> Result<Option<Self::Device>, <Self::Device as SudUsbDevice>::Error>;
}

/// A claimed SUD, ready to exchange packets.
///
/// Call [`SudSession::close`] when done, otherwise the interface stays
/// claimed and later sessions may fail to open.
#[derive(Debug)]
pub struct SudSession<D: SudUsbDevice> {
    device: D,
    ep_in: Endpoint,
    ep_out: Endpoint,
    detached_kernel_driver: bool,
}

impl<D: SudUsbDevice> SudSession<D> {
    /// Finds the SUD on `bus`, detaches any kernel driver, claims the HID
    /// interface and resolves both endpoints.
    pub fn open<B>(bus: &mut B) -> Result<Self, SudError<D::Error>>
    where
        B: SudUsbBus<Device = D>,
    {
        let mut device = bus
            .find_device(VENDOR_ID, PRODUCT_ID)
            .map_err(SudError::Io)?
            .ok_or(SudError::DeviceNotFound { vendor_id: VENDOR_ID, product_id: PRODUCT_ID })?;

        let detached_kernel_driver = if device
            .kernel_driver_active(INTERFACE_NUMBER)
            .map_err(SudError::Io)?
        {
            device.detach_kernel_driver(INTERFACE_NUMBER).map_err(SudError::Io)?;
            true
        } else {
            false
        };

        device.set_configuration().map_err(SudError::Io)?;
        device.claim_interface(INTERFACE_NUMBER).map_err(SudError::Io)?;

        let endpoints = Self::resolve_endpoints(&mut device);
        let (ep_in, ep_out) = match endpoints {
            Ok(pair) => pair,
            Err(e) => {
                Self::restore(&mut device, detached_kernel_driver);
                return Err(e);
            }
        };

        info!(
            ep_in = ep_in.address,
            ep_out = ep_out.address,
            max_packet_size = ep_in.max_packet_size,
            "opened SUD session"
        );

        Ok(SudSession { device, ep_in, ep_out, detached_kernel_driver })
    }

    /// Releases the interface, hands the device back to the kernel driver if
    /// it was detached, and resets it. Returns the device for disposal.
    ///
    /// Every step is attempted even if an earlier one fails; the first
    /// failure is returned.
    pub fn close(mut self) -> Result<D, SudError<D::Error>> {
        let mut first_error = None;

        if let Err(e) = self.device.release_interface(INTERFACE_NUMBER) {
            warn!(error = ?e, "failed to release interface");
            first_error = first_error.or(Some(e));
        }
        if self.detached_kernel_driver {
            if let Err(e) = self.device.attach_kernel_driver(INTERFACE_NUMBER) {
                warn!(error = ?e, "failed to re-attach kernel driver");
                first_error = first_error.or(Some(e));
            }
        }
        if let Err(e) = self.device.reset() {
            warn!(error = ?e, "failed to reset device");
            first_error = first_error.or(Some(e));
        }

        match first_error {
            Some(e) => Err(SudError::Io(e)),
            None => {
                info!("closed SUD session");
                Ok(self.device)
            }
        }
    }

    pub fn endpoint_in(&self) -> Endpoint {
        self.ep_in
    }

    pub fn endpoint_out(&self) -> Endpoint {
        self.ep_out
    }

    fn resolve_endpoints(device: &mut D) -> Result<(Endpoint, Endpoint), SudError<D::Error>> {
        let ep_in = device
            .find_endpoint(INTERFACE_NUMBER, EndpointDirection::In)
            .map_err(SudError::Io)?
            .ok_or(SudError::EndpointNotFound(EndpointDirection::In))?;
        let ep_out = device
            .find_endpoint(INTERFACE_NUMBER, EndpointDirection::Out)
            .map_err(SudError::Io)?
            .ok_or(SudError::EndpointNotFound(EndpointDirection::Out))?;
        Ok((ep_in, ep_out))
    }

    // Undo a half-finished open. The caller sees the first error.
    fn restore(device: &mut D, reattach: bool) {
        if let Err(e) = device.release_interface(INTERFACE_NUMBER) {
            warn!(error = ?e, "failed to release interface");
        }
        if reattach {
            if let Err(e) = device.attach_kernel_driver(INTERFACE_NUMBER) {
                warn!(error = ?e, "failed to re-attach kernel driver");
            }
        }
    }
}

impl<D: SudUsbDevice> SudTransport for SudSession<D> {
    type Error = D::Error;

    fn write_command(&mut self, command: &[u8]) -> Result<usize, Self::Error> {
        debug!(len = command.len(), "writing command");
        self.device.write(self.ep_out.address, command)
    }

    fn read_packet(&mut self, buffer: &mut [u8]) -> nb::Result<usize, Self::Error> {
        self.device.read(self.ep_in.address, buffer)
    }

    fn packet_size(&self) -> usize {
        (self.ep_in.max_packet_size as usize).min(MAX_PACKET_SIZE)
    }
}

impl<D, C> SyncDevice<SudSession<D>, C>
where
    D: SudUsbDevice,
    C: SudTimer,
{
    /// Opens a session on `bus` and wraps it for issuing actions.
    pub fn open<B>(bus: &mut B, timer: C) -> Result<Self, SudError<D::Error>>
    where
        B: SudUsbBus<Device = D>,
    {
        Ok(SyncDevice::new(SudSession::open(bus)?, timer))
    }

    /// Closes the underlying session. See [`SudSession::close`].
    pub fn close(self) -> Result<D, SudError<D::Error>> {
        let (session, _timer) = self.into_parts();
        session.close()
    }
}

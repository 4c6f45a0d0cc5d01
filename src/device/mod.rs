// src/device/mod.rs

pub mod session;
pub mod sync_device;

#[cfg(test)]
pub(crate) mod mock;

pub use session::{Endpoint, SudSession, SudUsbBus, SudUsbDevice, PRODUCT_ID, VENDOR_ID};
pub use sync_device::{SyncDevice, SyncDeviceConfig};

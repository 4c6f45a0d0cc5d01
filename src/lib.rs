// src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod common;
pub mod device;

// Re-export key types for convenience
pub use common::{Action, Response, SudError};
pub use device::{SudSession, SyncDevice, SyncDeviceConfig};

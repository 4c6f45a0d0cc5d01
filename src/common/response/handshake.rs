// src/common/response/handshake.rs

use super::{AcknowledgedResponse, Acknowledgement, BaseResponse};
use crate::common::decode::DecodedFields;
use crate::common::error::{DecodeError, SudError};
use crate::common::types::{DeviceType, FieldName, Validator};
use core::convert::TryFrom;
use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::{String, ToString};

/// Firmware version, packed on the wire as `major * 10000 + minor * 100 + rev`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub rev: u32,
}

impl FirmwareVersion {
    pub const fn from_raw(raw: u32) -> Self {
        FirmwareVersion {
            major: raw / 10000,
            minor: (raw / 100) % 100,
            rev: raw % 100,
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.rev)
    }
}

/// Received when entering interactive mode. Carries device metadata.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InteractiveHandshake {
    ack: Acknowledgement,
    device_type: u8,
    version: u16,
}

impl InteractiveHandshake {
    pub fn from_fields(fields: &DecodedFields<'_>) -> Result<Self, DecodeError> {
        let ack = Acknowledgement::from_fields(fields)?;
        let mut device_type = 0;
        let mut version = 0;

        for (name, value) in fields.iter() {
            let field = *name;
            let wrong_type = DecodeError::FieldType { field };
            match field {
                FieldName::DeviceType => device_type = value.as_u8().ok_or(wrong_type)?,
                FieldName::Version => version = value.as_u16().ok_or(wrong_type)?,
                // Handled by the acknowledgement
                FieldName::ValidationBytes | FieldName::Ack => {}
                FieldName::Timestamp
                | FieldName::Flags
                | FieldName::Ph
                | FieldName::Nh3
                | FieldName::Temperature
                | FieldName::IsKelvin
                | FieldName::Kelvin
                | FieldName::KelvinX
                | FieldName::KelvinY
                | FieldName::Par
                | FieldName::Lux
                | FieldName::Pur
                | FieldName::Unused => {}
            }
        }

        Ok(InteractiveHandshake { ack, device_type, version })
    }

    /// Product line of the device. An unassigned code only fails here, not
    /// when the packet is decoded.
    pub fn device_type(&self) -> Result<DeviceType, SudError<()>> {
        DeviceType::try_from(self.device_type)
    }

    /// Raw device type code as sent by the device.
    pub fn device_type_code(&self) -> u8 {
        self.device_type
    }

    /// Firmware version of the device.
    pub fn version(&self) -> FirmwareVersion {
        FirmwareVersion::from_raw(self.version as u32)
    }

    /// Firmware version as `major.minor.rev`.
    #[cfg(feature = "alloc")]
    pub fn version_string(&self) -> String {
        self.version().to_string()
    }

    pub fn raw_version(&self) -> u16 {
        self.version
    }
}

impl BaseResponse for InteractiveHandshake {
    fn validation_bytes(&self) -> Validator {
        self.ack.validation_bytes()
    }
}

impl AcknowledgedResponse for InteractiveHandshake {
    fn ack(&self) -> bool {
        self.ack.ack()
    }
}

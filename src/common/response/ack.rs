// src/common/response/ack.rs

use super::{AcknowledgedResponse, BaseResponse};
use crate::common::decode::DecodedFields;
use crate::common::error::DecodeError;
use crate::common::types::{FieldName, Validator};

/// Response that only carries an ACK status.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    validation_bytes: Validator,
    ack: bool,
}

impl Acknowledgement {
    pub fn from_fields(fields: &DecodedFields<'_>) -> Result<Self, DecodeError> {
        let mut response = Acknowledgement {
            validation_bytes: Validator([0, 0]),
            ack: false,
        };

        for (name, value) in fields.iter() {
            let field = *name;
            let wrong_type = DecodeError::FieldType { field };
            match field {
                FieldName::ValidationBytes => {
                    response.validation_bytes = Validator(value.as_array().ok_or(wrong_type)?)
                }
                FieldName::Ack => response.ack = value.as_bool().ok_or(wrong_type)?,
                // Not part of this response
                FieldName::DeviceType
                | FieldName::Version
                | FieldName::Timestamp
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

        Ok(response)
    }
}

impl BaseResponse for Acknowledgement {
    fn validation_bytes(&self) -> Validator {
        self.validation_bytes
    }
}

impl AcknowledgedResponse for Acknowledgement {
    /// True if the device processed the command.
    fn ack(&self) -> bool {
        self.ack
    }
}

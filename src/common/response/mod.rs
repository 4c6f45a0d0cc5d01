// src/common/response/mod.rs

mod ack;
mod handshake;
mod reading;

pub use ack::Acknowledgement;
pub use handshake::{FirmwareVersion, InteractiveHandshake};
pub use reading::{RawFlags, SensorReading};

use super::decode::decode_fields;
use super::error::DecodeError;
use super::registry::{ReadDefinition, ResponseKind};
use super::types::Validator;

/// Fields every SUD response carries.
pub trait BaseResponse {
    /// Prefix of the packet this response was decoded from.
    fn validation_bytes(&self) -> Validator;
}

/// Responses that report whether the device accepted the command.
pub trait AcknowledgedResponse: BaseResponse {
    fn ack(&self) -> bool;
}

/// A fully decoded response, owned by whoever ran the action.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Generic acknowledgement, e.g. to `BYESUD`.
    Acknowledgement(Acknowledgement),
    /// Answer to `HELLOSUD`, with device metadata.
    InteractiveHandshake(InteractiveHandshake),
    /// Sensor or light meter reading.
    SensorReading(SensorReading),
}

impl Response {
    /// Decodes `raw` with `definition` and builds the variant it names.
    pub fn from_packet(raw: &[u8], definition: &ReadDefinition) -> Result<Self, DecodeError> {
        let fields = decode_fields(raw, definition)?;
        let response = match definition.kind {
            ResponseKind::Acknowledgement => {
                Response::Acknowledgement(Acknowledgement::from_fields(&fields)?)
            }
            ResponseKind::InteractiveHandshake => {
                Response::InteractiveHandshake(InteractiveHandshake::from_fields(&fields)?)
            }
            ResponseKind::SensorReading => {
                Response::SensorReading(SensorReading::from_fields(&fields)?)
            }
        };
        Ok(response)
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Acknowledgement(_) => ResponseKind::Acknowledgement,
            Response::InteractiveHandshake(_) => ResponseKind::InteractiveHandshake,
            Response::SensorReading(_) => ResponseKind::SensorReading,
        }
    }
}

impl BaseResponse for Response {
    fn validation_bytes(&self) -> Validator {
        match self {
            Response::Acknowledgement(r) => r.validation_bytes(),
            Response::InteractiveHandshake(r) => r.validation_bytes(),
            Response::SensorReading(r) => r.validation_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::action::Action;
    use crate::common::registry::{action_definition, MAX_PACKET_SIZE};

    #[test]
    fn test_from_packet_dispatches_on_kind() {
        let mut packet = [0u8; MAX_PACKET_SIZE];
        packet[0] = 0x77;
        packet[1] = 0x01;
        packet[2] = 1;
        let rdef = &action_definition(Action::LeaveInteractiveMode).reads[0];
        let response = Response::from_packet(&packet, rdef).unwrap();

        assert_eq!(response.kind(), ResponseKind::Acknowledgement);
        assert_eq!(response.validation_bytes(), Validator::new(0x77, 0x01));
        match response {
            Response::Acknowledgement(ack) => assert!(ack.ack()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_from_packet_propagates_decode_errors() {
        let rdef = &action_definition(Action::LightReading).reads[0];
        assert_eq!(
            Response::from_packet(&[0x00, 0x02], rdef),
            Err(DecodeError::PacketLength { expected: 64, got: 2 })
        );
    }
}

// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod action;
pub mod decode;
pub mod error;
pub mod hal_traits;
pub mod registry;
pub mod response;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From action.rs
pub use action::Action;

// From decode.rs
pub use decode::{decode_fields, DecodedFields};

// From error.rs
pub use error::{DecodeError, EndpointDirection, SudError};

// From hal_traits.rs
pub use hal_traits::{SudInstant, SudTimer, SudTransport};
#[cfg(feature = "std")]
pub use hal_traits::StdTimer;

// From registry.rs
pub use registry::{
    action_definition, light_reading_validator, read_definition_for, ActionDefinition,
    ReadDefinition, ResponseKind, MAX_PACKET_SIZE,
};

// From response/mod.rs
pub use response::{
    AcknowledgedResponse, Acknowledgement, BaseResponse, FirmwareVersion, InteractiveHandshake,
    RawFlags, Response, SensorReading,
};

// From types.rs
pub use types::{DeviceType, FieldKind, FieldName, FieldValue, Validator};

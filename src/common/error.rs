// src/common/error.rs

use super::types::FieldName;

/// Failure turning a raw packet into a response. Always points at a bad
/// `ReadDefinition` or a truncated packet, so it is never retried.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Decoded value count differs from the declared field-name count.
    #[error("Decoded {decoded} values but {expected} field names are declared")]
    DecodeMismatch { expected: usize, decoded: usize },

    /// Packet length differs from the size of the declared layout.
    #[error("Packet length mismatch: layout needs {expected} bytes, got {got}")]
    PacketLength { expected: usize, got: usize },

    /// A decoded primitive does not fit the attribute it is named after.
    #[error("Decoded value has the wrong type for field {field:?}")]
    FieldType { field: FieldName },

    /// Layout declares more primitives than the decoder can hold.
    #[error("Layout declares {count} fields, more than the decoder supports")]
    TooManyFields { count: usize },
}

/// Direction of a USB endpoint, used when one cannot be resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EndpointDirection {
    In,
    Out,
}

#[derive(Debug, thiserror::Error)]
pub enum SudError<E = ()>
where
    E: core::fmt::Debug, // Transport errors only need Debug
{
    /// Underlying transport error (command write, session setup or teardown).
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No matching packet arrived within the action's time budget.
    #[error("Operation timed out reading response")]
    Timeout,

    /// The final matched packet could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A decoded enumerant has no known mapping.
    #[error("Unknown {kind} value: {value}")]
    UnknownEnumValue { kind: &'static str, value: u8 },

    /// No USB device with the expected identity is attached.
    #[error("Device not found: {vendor_id:04x}:{product_id:04x}")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// The claimed interface lacks an endpoint in the given direction.
    #[error("No {0:?} endpoint on the device interface")]
    EndpointNotFound(EndpointDirection),

    /// A typed action helper received a different response variant.
    #[error("Unexpected response received")]
    UnexpectedResponse,
}

// No blanket From<E>: it would overlap with From<DecodeError>. Callers map
// transport errors explicitly with `.map_err(SudError::Io)`.

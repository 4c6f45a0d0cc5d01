// src/common/decode.rs

use super::error::DecodeError;
use super::registry::ReadDefinition;
use super::types::{FieldKind, FieldName, FieldValue};

use arrayvec::ArrayVec;

/// Upper bound on primitives in one layout. The sensor reading uses 16.
pub const MAX_FIELDS: usize = 24;

/// Decoded values of one packet, zipped with their declared names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFields<'a> {
    fields: ArrayVec<(FieldName, FieldValue<'a>), MAX_FIELDS>,
}

impl<'a> DecodedFields<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FieldName, FieldValue<'a>)> {
        self.fields.iter()
    }

    /// Value of the first field with this name.
    pub fn get(&self, name: FieldName) -> Option<FieldValue<'a>> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// Unpacks `raw` per `definition.layout` and pairs each value with its name.
///
/// Pure: the same input always gives the same output. Fails without
/// returning anything partial if the packet is the wrong size or if the
/// number of decoded values differs from the number of declared names.
pub fn decode_fields<'a>(
    raw: &'a [u8],
    definition: &ReadDefinition,
) -> Result<DecodedFields<'a>, DecodeError> {
    let expected_len = definition.encoded_len();
    if raw.len() != expected_len {
        return Err(DecodeError::PacketLength { expected: expected_len, got: raw.len() });
    }
    if definition.layout.len() > MAX_FIELDS {
        return Err(DecodeError::TooManyFields { count: definition.layout.len() });
    }

    let values = unpack(raw, definition.layout);

    if values.len() != definition.field_names.len() {
        return Err(DecodeError::DecodeMismatch {
            expected: definition.field_names.len(),
            decoded: values.len(),
        });
    }

    let fields = definition
        .field_names
        .iter()
        .copied()
        .zip(values)
        .collect();

    Ok(DecodedFields { fields })
}

// Caller guarantees `raw` covers the layout exactly and the layout fits.
fn unpack<'a>(raw: &'a [u8], layout: &[FieldKind]) -> ArrayVec<FieldValue<'a>, MAX_FIELDS> {
    let mut values = ArrayVec::new();
    let mut offset = 0;

    for kind in layout {
        let size = kind.size_in_bytes();
        let bytes = &raw[offset..offset + size];
        offset += size;

        let value = match kind {
            FieldKind::Bool => FieldValue::Bool(bytes[0] != 0),
            FieldKind::UnsignedU8 => FieldValue::UnsignedU8(bytes[0]),
            FieldKind::UnsignedU16 => FieldValue::UnsignedU16(u16::from_le_bytes([bytes[0], bytes[1]])),
            FieldKind::UnsignedU32 => {
                FieldValue::UnsignedU32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            FieldKind::SignedI32 => {
                FieldValue::SignedI32(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            FieldKind::Bytes(_) => FieldValue::Bytes(bytes),
        };
        values.push(value);
    }

    values
}

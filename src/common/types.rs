// src/common/types.rs

use super::error::SudError;
use core::convert::TryFrom;
use core::fmt;

// --- Validation Prefix ---

/// The leading two bytes of every SUD packet. It is the only key used to
/// match an incoming packet to the layout it is expected to have.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Validator(pub [u8; 2]);

impl Validator {
    pub const fn new(first: u8, second: u8) -> Self {
        Validator([first, second])
    }

    /// Extracts the prefix of a raw packet, if it has one.
    pub fn of_packet(packet: &[u8]) -> Option<Self> {
        match packet {
            [first, second, ..] => Some(Validator([*first, *second])),
            _ => None,
        }
    }

    /// True if `packet` starts with this prefix.
    #[inline]
    pub fn matches(&self, packet: &[u8]) -> bool {
        packet.starts_with(&self.0)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({:02x} {:02x})", self.0[0], self.0[1])
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x} {:02x}", self.0[0], self.0[1])
    }
}

// --- Field Layout Primitives ---

/// One fixed-width little-endian field of a packet layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldKind {
    /// One byte, non-zero is `true`.
    Bool,
    UnsignedU8,
    UnsignedU16,
    UnsignedU32,
    SignedI32,
    /// A block of raw bytes (headers, flags, reserved padding).
    Bytes(usize),
}

impl FieldKind {
    /// Returns the size in bytes this field occupies on the wire.
    pub const fn size_in_bytes(&self) -> usize {
        match self {
            FieldKind::Bool => 1,
            FieldKind::UnsignedU8 => 1,
            FieldKind::UnsignedU16 => 2,
            FieldKind::UnsignedU32 => 4,
            FieldKind::SignedI32 => 4,
            FieldKind::Bytes(len) => *len,
        }
    }
}

/// A decoded primitive. Byte blocks borrow from the packet they came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldValue<'a> {
    Bool(bool),
    UnsignedU8(u8),
    UnsignedU16(u16),
    UnsignedU32(u32),
    SignedI32(i32),
    Bytes(&'a [u8]),
}

impl<'a> FieldValue<'a> {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            FieldValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match *self {
            FieldValue::UnsignedU8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match *self {
            FieldValue::UnsignedU16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            FieldValue::UnsignedU32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            FieldValue::SignedI32(v) => Some(v),
            _ => None,
        }
    }

    /// Byte block of exactly `N` bytes.
    pub fn as_array<const N: usize>(&self) -> Option<[u8; N]> {
        match *self {
            FieldValue::Bytes(bytes) => bytes.try_into().ok(),
            _ => None,
        }
    }
}

/// Names a position in a packet layout. `Unused` covers reserved and padding
/// bytes, which every response constructor discards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FieldName {
    ValidationBytes,
    Ack,
    DeviceType,
    Version,
    Timestamp,
    Flags,
    Ph,
    Nh3,
    Temperature,
    IsKelvin,
    Kelvin,
    KelvinX,
    KelvinY,
    Par,
    Lux,
    Pur,
    Unused,
}

// --- Device Type ---

/// The product line reported in the interactive-mode handshake.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DeviceType {
    Home = 0,
    Pond = 1,
    // 2 is not assigned
    Reef = 3,
}

impl TryFrom<u8> for DeviceType {
    // Lookup cannot involve I/O.
    type Error = SudError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DeviceType::Home),
            1 => Ok(DeviceType::Pond),
            3 => Ok(DeviceType::Reef),
            _ => Err(SudError::UnknownEnumValue { kind: "device type", value }),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceType::Home => "Home",
            DeviceType::Pond => "Pond",
            DeviceType::Reef => "Reef",
        };
        f.write_str(name)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_matching() {
        let v = Validator::new(0x88, 0x02);
        assert!(v.matches(&[0x88, 0x02, 0x01]));
        assert!(v.matches(&[0x88, 0x02]));
        assert!(!v.matches(&[0x88, 0x01, 0x01]));
        assert!(!v.matches(&[0x88]));
        assert!(!v.matches(&[]));
    }

    #[test]
    fn test_validator_of_packet() {
        assert_eq!(Validator::of_packet(&[0x00, 0x01, 0xff]), Some(Validator::new(0x00, 0x01)));
        assert_eq!(Validator::of_packet(&[0x00]), None);
    }

    #[test]
    fn test_field_kind_size() {
        assert_eq!(FieldKind::Bool.size_in_bytes(), 1);
        assert_eq!(FieldKind::UnsignedU8.size_in_bytes(), 1);
        assert_eq!(FieldKind::UnsignedU16.size_in_bytes(), 2);
        assert_eq!(FieldKind::UnsignedU32.size_in_bytes(), 4);
        assert_eq!(FieldKind::SignedI32.size_in_bytes(), 4);
        assert_eq!(FieldKind::Bytes(61).size_in_bytes(), 61);
        assert_eq!(FieldKind::Bytes(0).size_in_bytes(), 0);
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::UnsignedU8(3).as_bool(), None);
        assert_eq!(FieldValue::SignedI32(-7).as_i32(), Some(-7));
        assert_eq!(FieldValue::UnsignedU32(7).as_i32(), None);
        assert_eq!(FieldValue::Bytes(&[1, 2]).as_array::<2>(), Some([1, 2]));
        assert_eq!(FieldValue::Bytes(&[1, 2, 3]).as_array::<2>(), None);
    }

    #[test]
    fn test_device_type_from_u8() {
        assert_eq!(DeviceType::try_from(0).unwrap(), DeviceType::Home);
        assert_eq!(DeviceType::try_from(1).unwrap(), DeviceType::Pond);
        assert_eq!(DeviceType::try_from(3).unwrap(), DeviceType::Reef);
        assert!(matches!(
            DeviceType::try_from(2),
            Err(SudError::UnknownEnumValue { value: 2, .. })
        ));
        assert!(matches!(
            DeviceType::try_from(255),
            Err(SudError::UnknownEnumValue { value: 255, .. })
        ));
    }
}

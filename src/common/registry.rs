// src/common/registry.rs
//
// Wire layouts follow the structs in the vendor's sample driver (sud_data.h).
// All multi-byte values are little-endian and every packet is 64 bytes.

use super::action::Action;
use super::types::{FieldKind, FieldName, Validator};

use super::types::FieldKind::{Bool, Bytes, SignedI32, UnsignedU16, UnsignedU32, UnsignedU8};

/// Largest packet the device sends (its IN endpoint's max packet size).
pub const MAX_PACKET_SIZE: usize = 64;

/// Which response variant a `ReadDefinition` produces.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResponseKind {
    Acknowledgement,
    InteractiveHandshake,
    SensorReading,
}

/// Declarative description of one expected packet.
#[derive(Debug)]
pub struct ReadDefinition {
    /// Fields in wire order.
    pub layout: &'static [FieldKind],
    /// Prefix identifying packets of this shape.
    pub validator: Validator,
    /// One name per layout entry, positionally.
    pub field_names: &'static [FieldName],
    pub kind: ResponseKind,
}

impl ReadDefinition {
    /// Total size of the layout in bytes.
    pub const fn encoded_len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.layout.len() {
            total += self.layout[i].size_in_bytes();
            i += 1;
        }
        total
    }
}

/// An action's optional command and its ordered expected reads.
#[derive(Debug)]
pub struct ActionDefinition {
    pub action: Action,
    /// ASCII command, written unterminated. `None` means a passive read.
    pub command: Option<&'static [u8]>,
    /// Matched in order; only the last one is decoded.
    pub reads: &'static [ReadDefinition],
}

// --- Validation Prefixes ---

pub const GENERIC_ACK_VALIDATOR: Validator = Validator::new(0x88, 0x02);
pub const SENSOR_READING_VALIDATOR: Validator = Validator::new(0x00, 0x01);
pub const LIGHT_READING_VALIDATOR: Validator = Validator::new(0x00, 0x02);
pub const ENTER_INTERACTIVE_VALIDATOR: Validator = Validator::new(0x88, 0x01);
// Devices answer BYESUD with 77 01, not the documented 88 05.
pub const LEAVE_INTERACTIVE_VALIDATOR: Validator = Validator::new(0x77, 0x01);

// --- Layouts ---

// Header, ack, [unused]
const GENERIC_RESPONSE: [FieldKind; 3] = [Bytes(2), Bool, Bytes(61)];
const GENERIC_RESPONSE_FIELDS: [FieldName; 3] =
    [FieldName::ValidationBytes, FieldName::Ack, FieldName::Unused];

// Header, ack, device type, version, [unused]
const HELLOSUD_RESPONSE: [FieldKind; 5] = [Bytes(2), Bool, UnsignedU8, UnsignedU16, Bytes(58)];
const HELLOSUD_RESPONSE_FIELDS: [FieldName; 5] = [
    FieldName::ValidationBytes,
    FieldName::Ack,
    FieldName::DeviceType,
    FieldName::Version,
    FieldName::Unused,
];

// Header, timestamp, flags, [unused], pH, NH3, temperature, [unused],
// then the light meter block: [unused], kelvin, x, y, PAR, lux, PUR, [unused]
const SUDREADING: [FieldKind; 16] = [
    Bytes(2),
    UnsignedU32,
    Bytes(2),
    Bytes(2),
    SignedI32,
    SignedI32,
    SignedI32,
    Bytes(9),
    Bytes(11),
    SignedI32,
    SignedI32,
    SignedI32,
    UnsignedU32,
    UnsignedU32,
    UnsignedU8,
    Bytes(1),
];
const SUDREADING_FIELDS: [FieldName; 16] = [
    FieldName::ValidationBytes,
    FieldName::Timestamp,
    FieldName::Flags,
    FieldName::Unused,
    FieldName::Ph,
    FieldName::Nh3,
    FieldName::Temperature,
    FieldName::Unused,
    FieldName::Unused,
    FieldName::Kelvin,
    FieldName::KelvinX,
    FieldName::KelvinY,
    FieldName::Par,
    FieldName::Lux,
    FieldName::Pur,
    FieldName::Unused,
];

// Header, is-kelvin, light meter block, [unused]
const SUDLIGHTMETER: [FieldKind; 10] = [
    Bytes(2),
    Bool,
    Bytes(11),
    SignedI32,
    SignedI32,
    SignedI32,
    UnsignedU32,
    UnsignedU32,
    UnsignedU8,
    Bytes(29),
];
const SUDLIGHTMETER_FIELDS: [FieldName; 10] = [
    FieldName::ValidationBytes,
    FieldName::IsKelvin,
    FieldName::Unused,
    FieldName::Kelvin,
    FieldName::KelvinX,
    FieldName::KelvinY,
    FieldName::Par,
    FieldName::Lux,
    FieldName::Pur,
    FieldName::Unused,
];

// --- Commands ---

const HELLOSUD: &[u8] = b"HELLOSUD";
const BYESUD: &[u8] = b"BYESUD";
const READING: &[u8] = b"READING";

// --- Concrete definitions of every action ---

static ENTER_INTERACTIVE_READS: [ReadDefinition; 1] = [ReadDefinition {
    layout: &HELLOSUD_RESPONSE,
    validator: ENTER_INTERACTIVE_VALIDATOR,
    field_names: &HELLOSUD_RESPONSE_FIELDS,
    kind: ResponseKind::InteractiveHandshake,
}];

static LEAVE_INTERACTIVE_READS: [ReadDefinition; 1] = [ReadDefinition {
    layout: &GENERIC_RESPONSE,
    validator: LEAVE_INTERACTIVE_VALIDATOR,
    field_names: &GENERIC_RESPONSE_FIELDS,
    kind: ResponseKind::Acknowledgement,
}];

static SENSOR_READING_READS: [ReadDefinition; 2] = [
    ReadDefinition {
        layout: &GENERIC_RESPONSE,
        validator: GENERIC_ACK_VALIDATOR,
        field_names: &GENERIC_RESPONSE_FIELDS,
        kind: ResponseKind::Acknowledgement,
    },
    ReadDefinition {
        layout: &SUDREADING,
        validator: SENSOR_READING_VALIDATOR,
        field_names: &SUDREADING_FIELDS,
        kind: ResponseKind::SensorReading,
    },
];

static LIGHT_READING_READS: [ReadDefinition; 1] = [ReadDefinition {
    layout: &SUDLIGHTMETER,
    validator: LIGHT_READING_VALIDATOR,
    field_names: &SUDLIGHTMETER_FIELDS,
    kind: ResponseKind::SensorReading,
}];

// Indexed by `Action::index()`.
static ACTION_DEFINITIONS: [ActionDefinition; 4] = [
    ActionDefinition {
        action: Action::EnterInteractiveMode,
        command: Some(HELLOSUD),
        reads: &ENTER_INTERACTIVE_READS,
    },
    ActionDefinition {
        action: Action::LeaveInteractiveMode,
        command: Some(BYESUD),
        reads: &LEAVE_INTERACTIVE_READS,
    },
    ActionDefinition {
        action: Action::SensorReading,
        command: Some(READING),
        reads: &SENSOR_READING_READS,
    },
    ActionDefinition {
        action: Action::LightReading,
        command: None,
        reads: &LIGHT_READING_READS,
    },
];

/// Looks up the definition of `action`.
pub fn action_definition(action: Action) -> &'static ActionDefinition {
    &ACTION_DEFINITIONS[action.index()]
}

/// Prefix of the light meter packet, used to tell light readings apart from
/// full sensor readings after decoding.
pub fn light_reading_validator() -> Validator {
    action_definition(Action::LightReading).reads[0].validator
}

/// First read definition, in registry order, expecting packets with this prefix.
pub fn read_definition_for(validator: Validator) -> Option<&'static ReadDefinition> {
    ACTION_DEFINITIONS
        .iter()
        .flat_map(|def| def.reads.iter())
        .find(|rdef| rdef.validator == validator)
}

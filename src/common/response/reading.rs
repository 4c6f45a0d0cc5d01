// src/common/response/reading.rs

use super::BaseResponse;
use crate::common::decode::DecodedFields;
use crate::common::error::DecodeError;
use crate::common::registry::light_reading_validator;
use crate::common::types::{FieldName, Validator};

const PH_SCALE: f64 = 100.0;
const NH3_SCALE: f64 = 1000.0;
const TEMPERATURE_SCALE: f64 = 1000.0;

/// Device status bits sent with a sensor reading (in water, slide state,
/// per-channel state, error). Kept as raw bytes; the bit layout is not
/// confirmed against a device.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawFlags(pub [u8; 2]);

/// A sensor reading or a light meter reading. Both use this type; which one
/// it is follows from the packet prefix alone (see [`Self::is_light_reading`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SensorReading {
    validation_bytes: Validator,
    timestamp: u32,
    flags: Option<RawFlags>,
    ph: i32,
    nh3: i32,
    temperature: i32,
    is_kelvin: bool,
    kelvin: i32,
    kelvin_x: i32,
    kelvin_y: i32,
    par: u32,
    lux: u32,
    pur: u8,
}

impl SensorReading {
    pub fn from_fields(fields: &DecodedFields<'_>) -> Result<Self, DecodeError> {
        let mut r = SensorReading {
            validation_bytes: Validator([0, 0]),
            timestamp: 0,
            flags: None,
            ph: 0,
            nh3: 0,
            temperature: 0,
            is_kelvin: false,
            kelvin: 0,
            kelvin_x: 0,
            kelvin_y: 0,
            par: 0,
            lux: 0,
            pur: 0,
        };

        for (name, value) in fields.iter() {
            let field = *name;
            let wrong_type = DecodeError::FieldType { field };
            match field {
                FieldName::ValidationBytes => {
                    r.validation_bytes = Validator(value.as_array().ok_or(wrong_type)?)
                }
                FieldName::Timestamp => r.timestamp = value.as_u32().ok_or(wrong_type)?,
                FieldName::Flags => r.flags = Some(RawFlags(value.as_array().ok_or(wrong_type)?)),
                FieldName::Ph => r.ph = value.as_i32().ok_or(wrong_type)?,
                FieldName::Nh3 => r.nh3 = value.as_i32().ok_or(wrong_type)?,
                FieldName::Temperature => r.temperature = value.as_i32().ok_or(wrong_type)?,
                FieldName::IsKelvin => r.is_kelvin = value.as_bool().ok_or(wrong_type)?,
                FieldName::Kelvin => r.kelvin = value.as_i32().ok_or(wrong_type)?,
                FieldName::KelvinX => r.kelvin_x = value.as_i32().ok_or(wrong_type)?,
                FieldName::KelvinY => r.kelvin_y = value.as_i32().ok_or(wrong_type)?,
                FieldName::Par => r.par = value.as_u32().ok_or(wrong_type)?,
                FieldName::Lux => r.lux = value.as_u32().ok_or(wrong_type)?,
                FieldName::Pur => r.pur = value.as_u8().ok_or(wrong_type)?,
                FieldName::Ack | FieldName::DeviceType | FieldName::Version | FieldName::Unused => {}
            }
        }

        Ok(r)
    }

    /// True if decoded from a light meter packet rather than a full reading.
    pub fn is_light_reading(&self) -> bool {
        self.validation_bytes == light_reading_validator()
    }

    /// Whether the light reading lies on the kelvin (black body) line.
    ///
    /// `None` for full sensor readings: there the value lives in the flags,
    /// which are not decoded.
    pub fn is_kelvin(&self) -> Option<bool> {
        if self.is_light_reading() {
            Some(self.is_kelvin)
        } else {
            None
        }
    }

    /// Time the reading was taken, in seconds since the Unix epoch.
    /// Zero for light readings.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn ph(&self) -> f64 {
        self.ph as f64 / PH_SCALE
    }

    pub fn nh3(&self) -> f64 {
        self.nh3 as f64 / NH3_SCALE
    }

    /// Water temperature in degrees Celsius.
    pub fn temperature(&self) -> f64 {
        self.temperature as f64 / TEMPERATURE_SCALE
    }

    /// Raw status flags. `None` for light readings.
    pub fn flags(&self) -> Option<RawFlags> {
        self.flags
    }

    pub fn kelvin(&self) -> i32 {
        self.kelvin
    }

    /// X co-ordinate on the CIE colour space. Only meaningful near the kelvin line.
    pub fn kelvin_x(&self) -> i32 {
        self.kelvin_x
    }

    /// Y co-ordinate on the CIE colour space. Only meaningful near the kelvin line.
    pub fn kelvin_y(&self) -> i32 {
        self.kelvin_y
    }

    pub fn par(&self) -> u32 {
        self.par
    }

    pub fn lux(&self) -> u32 {
        self.lux
    }

    pub fn pur(&self) -> u8 {
        self.pur
    }
}

impl BaseResponse for SensorReading {
    fn validation_bytes(&self) -> Validator {
        self.validation_bytes
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::action::Action;
    use crate::common::decode::decode_fields;
    use crate::common::registry::{action_definition, MAX_PACKET_SIZE};

    fn light_block(p: &mut [u8], at: usize) {
        p[at..at + 4].copy_from_slice(&6500i32.to_le_bytes());
        p[at + 4..at + 8].copy_from_slice(&3135i32.to_le_bytes());
        p[at + 8..at + 12].copy_from_slice(&3237i32.to_le_bytes());
        p[at + 12..at + 16].copy_from_slice(&120u32.to_le_bytes());
        p[at + 16..at + 20].copy_from_slice(&4500u32.to_le_bytes());
        p[at + 20] = 87;
    }

    fn sensor_packet(ph: i32, nh3: i32, temperature: i32) -> [u8; MAX_PACKET_SIZE] {
        let mut p = [0u8; MAX_PACKET_SIZE];
        p[0] = 0x00;
        p[1] = 0x01;
        p[2..6].copy_from_slice(&1_560_000_000u32.to_le_bytes());
        p[6] = 0b0000_0100;
        p[7] = 0x80;
        p[10..14].copy_from_slice(&ph.to_le_bytes());
        p[14..18].copy_from_slice(&nh3.to_le_bytes());
        p[18..22].copy_from_slice(&temperature.to_le_bytes());
        light_block(&mut p, 42);
        p
    }

    fn light_packet(is_kelvin: bool) -> [u8; MAX_PACKET_SIZE] {
        let mut p = [0u8; MAX_PACKET_SIZE];
        p[0] = 0x00;
        p[1] = 0x02;
        p[2] = is_kelvin as u8;
        light_block(&mut p, 14);
        p
    }

    fn decode(packet: &[u8], action: Action) -> SensorReading {
        let reads = action_definition(action).reads;
        let rdef = &reads[reads.len() - 1];
        SensorReading::from_fields(&decode_fields(packet, rdef).unwrap()).unwrap()
    }

    #[test]
    fn test_sensor_reading_values() {
        let r = decode(&sensor_packet(816, 7, 25125), Action::SensorReading);
        assert!(!r.is_light_reading());
        assert_eq!(r.is_kelvin(), None);
        assert_eq!(r.timestamp(), 1_560_000_000);
        assert_eq!(r.ph(), 8.16);
        assert_eq!(r.nh3(), 0.007);
        assert_eq!(r.temperature(), 25.125);
        assert_eq!(r.flags(), Some(RawFlags([0b0000_0100, 0x80])));
        assert_eq!(r.kelvin(), 6500);
        assert_eq!(r.kelvin_x(), 3135);
        assert_eq!(r.kelvin_y(), 3237);
        assert_eq!(r.par(), 120);
        assert_eq!(r.lux(), 4500);
        assert_eq!(r.pur(), 87);
    }

    #[test]
    fn test_ph_scaling() {
        assert_eq!(decode(&sensor_packet(0, 0, 0), Action::SensorReading).ph(), 0.0);
        assert_eq!(decode(&sensor_packet(-100, 0, 0), Action::SensorReading).ph(), -1.0);
        assert_eq!(decode(&sensor_packet(700, 0, 0), Action::SensorReading).ph(), 7.0);
        assert_eq!(decode(&sensor_packet(0, -1000, -2000), Action::SensorReading).nh3(), -1.0);
        assert_eq!(decode(&sensor_packet(0, 0, -2000), Action::SensorReading).temperature(), -2.0);
    }

    #[test]
    fn test_light_reading_values() {
        let r = decode(&light_packet(true), Action::LightReading);
        assert!(r.is_light_reading());
        assert_eq!(r.is_kelvin(), Some(true));
        assert_eq!(r.flags(), None);
        assert_eq!(r.timestamp(), 0);
        assert_eq!(r.ph(), 0.0);
        assert_eq!(r.nh3(), 0.0);
        assert_eq!(r.temperature(), 0.0);
        assert_eq!(r.kelvin(), 6500);
        assert_eq!(r.lux(), 4500);
        assert_eq!(r.pur(), 87);

        let r = decode(&light_packet(false), Action::LightReading);
        assert_eq!(r.is_kelvin(), Some(false));
    }

    #[test]
    fn test_light_reading_decided_by_prefix_only() {
        // Same payload under both prefixes: only the prefix changes the answer.
        let mut packet = sensor_packet(816, 7, 25125);
        let rdef = &action_definition(Action::SensorReading).reads[1];

        let r = SensorReading::from_fields(&decode_fields(&packet, rdef).unwrap()).unwrap();
        assert!(!r.is_light_reading());

        packet[1] = 0x02;
        let r = SensorReading::from_fields(&decode_fields(&packet, rdef).unwrap()).unwrap();
        assert!(r.is_light_reading());
        assert_eq!(r.ph(), 8.16);
    }
}

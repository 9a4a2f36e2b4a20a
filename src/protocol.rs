//! Decoder for the positional state vector wire format.
//!
//! The feed encodes each state vector as a JSON array of heterogeneous
//! values in a fixed, documented order. [`FIELDS`] is the authoritative
//! index-to-name contract; decoding reads fields by these indices, so a
//! reordering of the wire tuple must be reflected here or data is
//! silently corrupted.

use crate::types::{AircraftCategory, PositionSource, StateVector};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("state record too short: need {need} fields, got {got}")]
    TooShort { need: usize, got: usize },
    #[error("field {index} ({name}): expected {expected}")]
    FieldType {
        index: usize,
        name: &'static str,
        expected: &'static str,
    },
}

/// Number of fields in an extended state vector record.
pub const FIELD_COUNT: usize = 18;
/// Number of fields when the trailing category is omitted.
pub const MIN_FIELDS: usize = 17;

/// Positional field order of the wire record.
pub const FIELDS: [&str; FIELD_COUNT] = [
    "icao24",
    "callsign",
    "origin_country",
    "time_position",
    "last_contact",
    "longitude",
    "latitude",
    "baro_altitude",
    "on_ground",
    "velocity",
    "true_track",
    "vertical_rate",
    "sensors",
    "geo_altitude",
    "squawk",
    "spi",
    "position_source",
    "category",
];

/// One undecoded wire record.
pub type RawStateVector = Vec<Value>;

/// Response envelope of the states endpoint. The feed reports `null`
/// instead of an empty array when nothing matched.
#[derive(Debug, Deserialize)]
pub struct StatesResponse {
    pub time: Option<u64>,
    pub states: Option<Vec<RawStateVector>>,
}

/// Decode every record of a states response.
pub fn decode_states(response: &StatesResponse) -> Result<Vec<StateVector>, DecodeError> {
    response
        .states
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|raw| decode_state_vector(raw))
        .collect()
}

/// Decode one positional wire record into a named state vector.
///
/// Values pass through unchanged, including nulls. Records may carry 17
/// fields (no category) or 18 (extended).
pub fn decode_state_vector(raw: &[Value]) -> Result<StateVector, DecodeError> {
    if raw.len() < MIN_FIELDS {
        return Err(DecodeError::TooShort {
            need: MIN_FIELDS,
            got: raw.len(),
        });
    }

    Ok(StateVector {
        icao24: str_at(raw, 0)?,
        callsign: opt_str_at(raw, 1)?,
        origin_country: str_at(raw, 2)?,
        time_position: opt_u64_at(raw, 3)?,
        last_contact: u64_at(raw, 4)?,
        longitude: opt_f64_at(raw, 5)?,
        latitude: opt_f64_at(raw, 6)?,
        baro_altitude: opt_f64_at(raw, 7)?,
        on_ground: bool_at(raw, 8)?,
        velocity: opt_f64_at(raw, 9)?,
        true_track: opt_f64_at(raw, 10)?,
        vertical_rate: opt_f64_at(raw, 11)?,
        sensors: sensors_at(raw, 12)?,
        geo_altitude: opt_f64_at(raw, 13)?,
        squawk: opt_str_at(raw, 14)?,
        spi: bool_at(raw, 15)?,
        position_source: PositionSource::from(u8_at(raw, 16)?),
        category: opt_u8_at(raw, 17)?.map(AircraftCategory::from),
    })
}

fn type_err(index: usize, expected: &'static str) -> DecodeError {
    DecodeError::FieldType {
        index,
        name: FIELDS[index],
        expected,
    }
}

fn str_at(raw: &[Value], index: usize) -> Result<String, DecodeError> {
    raw[index]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| type_err(index, "string"))
}

fn opt_str_at(raw: &[Value], index: usize) -> Result<Option<String>, DecodeError> {
    match &raw[index] {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(type_err(index, "string or null")),
    }
}

fn u64_at(raw: &[Value], index: usize) -> Result<u64, DecodeError> {
    raw[index]
        .as_u64()
        .ok_or_else(|| type_err(index, "integer"))
}

fn opt_u64_at(raw: &[Value], index: usize) -> Result<Option<u64>, DecodeError> {
    match &raw[index] {
        Value::Null => Ok(None),
        v => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| type_err(index, "integer or null")),
    }
}

fn opt_f64_at(raw: &[Value], index: usize) -> Result<Option<f64>, DecodeError> {
    match &raw[index] {
        Value::Null => Ok(None),
        v => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| type_err(index, "number or null")),
    }
}

fn bool_at(raw: &[Value], index: usize) -> Result<bool, DecodeError> {
    raw[index]
        .as_bool()
        .ok_or_else(|| type_err(index, "boolean"))
}

fn u8_at(raw: &[Value], index: usize) -> Result<u8, DecodeError> {
    raw[index]
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| type_err(index, "integer"))
}

/// Trailing fields may be absent entirely, not just null.
fn opt_u8_at(raw: &[Value], index: usize) -> Result<Option<u8>, DecodeError> {
    match raw.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| type_err(index, "integer or null")),
    }
}

fn sensors_at(raw: &[Value], index: usize) -> Result<Option<Vec<u32>>, DecodeError> {
    match &raw[index] {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| type_err(index, "array of integers"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Err(type_err(index, "array of integers or null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Vec<Value> {
        vec![
            json!("3c6444"),
            json!("DLH9LF  "),
            json!("Germany"),
            json!(1458564120),
            json!(1458564121),
            json!(6.1546),
            json!(49.4964),
            json!(9639.3),
            json!(false),
            json!(232.88),
            json!(98.26),
            json!(4.55),
            json!(null),
            json!(9547.86),
            json!("1021"),
            json!(false),
            json!(0),
            json!(2),
        ]
    }

    /// Encode a state vector back into its positional wire form.
    fn encode_state_vector(sv: &StateVector) -> Vec<Value> {
        vec![
            json!(sv.icao24),
            json!(sv.callsign),
            json!(sv.origin_country),
            json!(sv.time_position),
            json!(sv.last_contact),
            json!(sv.longitude),
            json!(sv.latitude),
            json!(sv.baro_altitude),
            json!(sv.on_ground),
            json!(sv.velocity),
            json!(sv.true_track),
            json!(sv.vertical_rate),
            json!(sv.sensors),
            json!(sv.geo_altitude),
            json!(sv.squawk),
            json!(sv.spi),
            json!(sv.position_source as u8),
            json!(sv.category.map(|c| c as u8)),
        ]
    }

    #[test]
    fn test_field_table_order() {
        // The wire contract, position by position. Changing this table or
        // the decoder without the other is a silent corruption bug.
        assert_eq!(FIELDS[0], "icao24");
        assert_eq!(FIELDS[1], "callsign");
        assert_eq!(FIELDS[2], "origin_country");
        assert_eq!(FIELDS[3], "time_position");
        assert_eq!(FIELDS[4], "last_contact");
        assert_eq!(FIELDS[5], "longitude");
        assert_eq!(FIELDS[6], "latitude");
        assert_eq!(FIELDS[7], "baro_altitude");
        assert_eq!(FIELDS[8], "on_ground");
        assert_eq!(FIELDS[9], "velocity");
        assert_eq!(FIELDS[10], "true_track");
        assert_eq!(FIELDS[11], "vertical_rate");
        assert_eq!(FIELDS[12], "sensors");
        assert_eq!(FIELDS[13], "geo_altitude");
        assert_eq!(FIELDS[14], "squawk");
        assert_eq!(FIELDS[15], "spi");
        assert_eq!(FIELDS[16], "position_source");
        assert_eq!(FIELDS[17], "category");
    }

    #[test]
    fn test_decode_positional_mapping() {
        let sv = decode_state_vector(&sample_record()).unwrap();

        assert_eq!(sv.icao24, "3c6444");
        assert_eq!(sv.callsign.as_deref(), Some("DLH9LF  "));
        assert_eq!(sv.origin_country, "Germany");
        assert_eq!(sv.time_position, Some(1458564120));
        assert_eq!(sv.last_contact, 1458564121);
        assert_eq!(sv.longitude, Some(6.1546));
        assert_eq!(sv.latitude, Some(49.4964));
        assert_eq!(sv.baro_altitude, Some(9639.3));
        assert!(!sv.on_ground);
        assert_eq!(sv.velocity, Some(232.88));
        assert_eq!(sv.true_track, Some(98.26));
        assert_eq!(sv.vertical_rate, Some(4.55));
        assert_eq!(sv.sensors, None);
        assert_eq!(sv.geo_altitude, Some(9547.86));
        assert_eq!(sv.squawk.as_deref(), Some("1021"));
        assert!(!sv.spi);
        assert_eq!(sv.position_source, PositionSource::AdsB);
        assert_eq!(sv.category, Some(AircraftCategory::Light));
    }

    #[test]
    fn test_nulls_pass_through() {
        let mut record = sample_record();
        for idx in [1, 3, 5, 6, 7, 9, 10, 11, 13, 14] {
            record[idx] = Value::Null;
        }

        let sv = decode_state_vector(&record).unwrap();
        assert_eq!(sv.callsign, None);
        assert_eq!(sv.time_position, None);
        assert_eq!(sv.longitude, None);
        assert_eq!(sv.latitude, None);
        assert_eq!(sv.baro_altitude, None);
        assert_eq!(sv.velocity, None);
        assert_eq!(sv.true_track, None);
        assert_eq!(sv.vertical_rate, None);
        assert_eq!(sv.geo_altitude, None);
        assert_eq!(sv.squawk, None);
    }

    #[test]
    fn test_seventeen_field_record_has_no_category() {
        let mut record = sample_record();
        record.truncate(MIN_FIELDS);

        let sv = decode_state_vector(&record).unwrap();
        assert_eq!(sv.category, None);
    }

    #[test]
    fn test_short_record_rejected() {
        let mut record = sample_record();
        record.truncate(16);

        assert_eq!(
            decode_state_vector(&record),
            Err(DecodeError::TooShort { need: 17, got: 16 })
        );
    }

    #[test]
    fn test_wrong_type_names_the_field() {
        let mut record = sample_record();
        record[6] = json!("not a latitude");

        assert_eq!(
            decode_state_vector(&record),
            Err(DecodeError::FieldType {
                index: 6,
                name: "latitude",
                expected: "number or null",
            })
        );
    }

    #[test]
    fn test_sensor_list_decodes() {
        let mut record = sample_record();
        record[12] = json!([1432, 998]);

        let sv = decode_state_vector(&record).unwrap();
        assert_eq!(sv.sensors, Some(vec![1432, 998]));
    }

    #[test]
    fn test_round_trip() {
        let original = decode_state_vector(&sample_record()).unwrap();
        let encoded = encode_state_vector(&original);
        let decoded = decode_state_vector(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_null_states_decodes_empty() {
        let response: StatesResponse =
            serde_json::from_str(r#"{"time": 1458564121, "states": null}"#).unwrap();
        assert_eq!(decode_states(&response).unwrap(), Vec::new());
    }
}

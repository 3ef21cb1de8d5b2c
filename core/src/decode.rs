//! Positional decoding of state vectors.
//!
//! # Design
//! The API encodes a state vector as a bare 17-element JSON array whose
//! meaning depends only on position. Decoding goes through an intermediate
//! `serde_json::Value`: the arity is checked first, then each slot is mapped
//! by index. Nullable slots become `None`; a null in a required slot, a value
//! of the wrong JSON type, or any other arity is a `SchemaMismatch`, since it
//! means the upstream schema is not the one this client understands.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::types::{PositionSource, StateVector, StatesResponse};

/// Number of positional values in an encoded state vector.
pub const STATE_VECTOR_ARITY: usize = 17;

/// Decode one positionally-encoded state vector.
pub fn decode_state_vector(value: &Value) -> Result<StateVector, ApiError> {
    let fields = value
        .as_array()
        .ok_or_else(|| mismatch(format!("expected an array, found {}", kind(value))))?;

    let [
        icao24,
        callsign,
        origin_country,
        time_position,
        last_contact,
        longitude,
        latitude,
        baro_altitude,
        on_ground,
        velocity,
        true_track,
        vertical_rate,
        sensors,
        geo_altitude,
        squawk,
        spi,
        position_source,
    ] = fields.as_slice()
    else {
        return Err(mismatch(format!(
            "expected {STATE_VECTOR_ARITY} fields, found {}",
            fields.len()
        )));
    };

    Ok(StateVector {
        icao24: required(icao24, "icao24", string)?,
        callsign: optional(callsign, "callsign", string)?,
        origin_country: required(origin_country, "origin_country", string)?,
        time_position: optional(time_position, "time_position", Value::as_i64)?,
        last_contact: required(last_contact, "last_contact", Value::as_i64)?,
        longitude: optional(longitude, "longitude", Value::as_f64)?,
        latitude: optional(latitude, "latitude", Value::as_f64)?,
        baro_altitude: optional(baro_altitude, "baro_altitude", Value::as_f64)?,
        on_ground: required(on_ground, "on_ground", Value::as_bool)?,
        velocity: optional(velocity, "velocity", Value::as_f64)?,
        true_track: optional(true_track, "true_track", Value::as_f64)?,
        vertical_rate: optional(vertical_rate, "vertical_rate", Value::as_f64)?,
        sensors: optional(sensors, "sensors", integers)?,
        geo_altitude: optional(geo_altitude, "geo_altitude", Value::as_f64)?,
        squawk: optional(squawk, "squawk", string)?,
        spi: optional(spi, "spi", Value::as_bool)?,
        position_source: PositionSource::from(required(
            position_source,
            "position_source",
            Value::as_i64,
        )?),
    })
}

/// Encode a state vector back into its positional form.
pub fn encode_state_vector(state: &StateVector) -> Value {
    json!([
        state.icao24,
        state.callsign,
        state.origin_country,
        state.time_position,
        state.last_contact,
        state.longitude,
        state.latitude,
        state.baro_altitude,
        state.on_ground,
        state.velocity,
        state.true_track,
        state.vertical_rate,
        state.sensors,
        state.geo_altitude,
        state.squawk,
        state.spi,
        i64::from(state.position_source),
    ])
}

/// Decode a `/api/states/*` body.
///
/// Malformed JSON or a malformed envelope is a `DeserializationError`; a bad
/// entry inside `states` is a `SchemaMismatch` naming its index.
pub fn decode_states_response(body: &str) -> Result<StatesResponse, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    decode_states_value(value)
}

/// Decode an already-parsed `/api/states/*` body. `states` may be `null` or
/// missing, both meaning no states.
pub fn decode_states_value(value: Value) -> Result<StatesResponse, ApiError> {
    #[derive(serde::Deserialize)]
    struct Envelope {
        time: i64,
        #[serde(default)]
        states: Option<Vec<Value>>,
    }

    let envelope: Envelope =
        serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))?;

    let states = envelope
        .states
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, value)| {
            decode_state_vector(value).map_err(|e| match e {
                ApiError::SchemaMismatch(msg) => mismatch(format!("states[{index}]: {msg}")),
                other => other,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StatesResponse {
        time: envelope.time,
        states,
    })
}

impl<'de> Deserialize<'de> for StatesResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_states_value(value).map_err(de::Error::custom)
    }
}

impl Serialize for StateVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_state_vector(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StateVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_state_vector(&value).map_err(de::Error::custom)
    }
}

fn mismatch(msg: String) -> ApiError {
    ApiError::SchemaMismatch(msg)
}

fn required<T>(value: &Value, field: &str, read: fn(&Value) -> Option<T>) -> Result<T, ApiError> {
    if value.is_null() {
        return Err(mismatch(format!("{field} must not be null")));
    }
    read(value).ok_or_else(|| mismatch(format!("{field} has unexpected type {}", kind(value))))
}

fn optional<T>(
    value: &Value,
    field: &str,
    read: fn(&Value) -> Option<T>,
) -> Result<Option<T>, ApiError> {
    if value.is_null() {
        return Ok(None);
    }
    read(value)
        .map(Some)
        .ok_or_else(|| mismatch(format!("{field} has unexpected type {}", kind(value))))
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn integers(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(Value::as_i64).collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

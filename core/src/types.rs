//! Domain records returned by the OpenSky API.
//!
//! # Design
//! Every nullable wire field is an `Option`, so "not reported" never collapses
//! into a default value: an unknown callsign is `None`, not `""`, and an
//! unknown altitude is `None`, not `0.0`. `StateVector` is positional on the
//! wire; its serde impls live in `decode`. `Flight` uses named fields and a
//! plain derive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin of a state vector's position.
///
/// Codes this client does not know are kept as `Other` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionSource {
    Adsb,
    Asterix,
    Mlat,
    Flarm,
    Other(i64),
}

impl From<i64> for PositionSource {
    fn from(code: i64) -> Self {
        match code {
            0 => PositionSource::Adsb,
            1 => PositionSource::Asterix,
            2 => PositionSource::Mlat,
            3 => PositionSource::Flarm,
            other => PositionSource::Other(other),
        }
    }
}

impl From<PositionSource> for i64 {
    fn from(source: PositionSource) -> Self {
        match source {
            PositionSource::Adsb => 0,
            PositionSource::Asterix => 1,
            PositionSource::Mlat => 2,
            PositionSource::Flarm => 3,
            PositionSource::Other(code) => code,
        }
    }
}

impl fmt::Display for PositionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSource::Adsb => f.write_str("ADS-B"),
            PositionSource::Asterix => f.write_str("ASTERIX"),
            PositionSource::Mlat => f.write_str("MLAT"),
            PositionSource::Flarm => f.write_str("FLARM"),
            PositionSource::Other(code) => write!(f, "unknown ({code})"),
        }
    }
}

/// State of one aircraft at a given time.
///
/// Timestamps are Unix seconds, distances meters, speeds m/s and angles
/// decimal degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// ICAO 24-bit transponder address, lowercase hex.
    pub icao24: String,
    /// Callsign (8 chars), if one has been received.
    pub callsign: Option<String>,
    /// Country inferred from the ICAO 24-bit address.
    pub origin_country: String,
    /// Last position update; `None` if no position report within the past 15s.
    pub time_position: Option<i64>,
    /// Last valid message of any kind from the transponder.
    pub last_contact: i64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    /// Whether the position came from a surface position report.
    pub on_ground: bool,
    /// Velocity over ground.
    pub velocity: Option<f64>,
    /// Clockwise from north (north = 0°).
    pub true_track: Option<f64>,
    /// Positive when climbing, negative when descending.
    pub vertical_rate: Option<f64>,
    /// Receivers that contributed to this state; `None` unless the request
    /// filtered by sensor.
    pub sensors: Option<Vec<i64>>,
    pub geo_altitude: Option<f64>,
    /// Transponder code.
    pub squawk: Option<String>,
    /// Special purpose indicator.
    pub spi: Option<bool>,
    pub position_source: PositionSource,
}

/// Response of `/api/states/all` and `/api/states/own`.
///
/// Deserializing goes through `decode::decode_states_response`, so serde and
/// the services agree on null handling and on schema errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatesResponse {
    /// Time the states are associated with, Unix seconds.
    pub time: i64,
    /// Empty when the server sends `"states": null`.
    pub states: Vec<StateVector>,
}

/// One flight from `/api/flights/*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub icao24: String,
    /// Estimated departure time, Unix seconds.
    pub first_seen: i64,
    /// ICAO code of the estimated departure airport, if identified.
    pub est_departure_airport: Option<String>,
    /// Estimated arrival time, Unix seconds.
    pub last_seen: i64,
    /// ICAO code of the estimated arrival airport, if identified.
    pub est_arrival_airport: Option<String>,
    /// Most frequently seen callsign during the flight.
    pub callsign: Option<String>,
    pub est_departure_airport_horiz_distance: Option<i64>,
    pub est_departure_airport_vert_distance: Option<i64>,
    pub est_arrival_airport_horiz_distance: Option<i64>,
    pub est_arrival_airport_vert_distance: Option<i64>,
    /// Other airports near `est_departure_airport`.
    pub departure_airport_candidates_count: i64,
    /// Other airports near `est_arrival_airport`.
    pub arrival_airport_candidates_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_source_codes() {
        assert_eq!(PositionSource::from(0), PositionSource::Adsb);
        assert_eq!(PositionSource::from(2), PositionSource::Mlat);
        assert_eq!(PositionSource::from(7), PositionSource::Other(7));
        assert_eq!(i64::from(PositionSource::Flarm), 3);
        assert_eq!(i64::from(PositionSource::Other(7)), 7);
        assert_eq!(PositionSource::Asterix.to_string(), "ASTERIX");
        assert_eq!(PositionSource::Other(7).to_string(), "unknown (7)");
    }

    #[test]
    fn flight_deserializes_named_fields() {
        let raw = r#"{
            "icao24": "3c6444",
            "firstSeen": 1517227200,
            "estDepartureAirport": "EDDF",
            "lastSeen": 1517230800,
            "estArrivalAirport": null,
            "callsign": "DLH9LF  ",
            "estDepartureAirportHorizDistance": 1542,
            "estDepartureAirportVertDistance": 66,
            "estArrivalAirportHorizDistance": null,
            "estArrivalAirportVertDistance": null,
            "departureAirportCandidatesCount": 1,
            "arrivalAirportCandidatesCount": 0
        }"#;
        let flight: Flight = serde_json::from_str(raw).unwrap();
        assert_eq!(flight.icao24, "3c6444");
        assert_eq!(flight.est_departure_airport.as_deref(), Some("EDDF"));
        assert_eq!(flight.est_arrival_airport, None);
        assert_eq!(flight.est_departure_airport_horiz_distance, Some(1542));
        assert_eq!(flight.est_arrival_airport_vert_distance, None);
        assert_eq!(flight.departure_airport_candidates_count, 1);
    }

    #[test]
    fn flight_missing_optional_fields_are_none() {
        let raw = r#"{
            "icao24": "abc123",
            "firstSeen": 1,
            "lastSeen": 2,
            "departureAirportCandidatesCount": 0,
            "arrivalAirportCandidatesCount": 0
        }"#;
        let flight: Flight = serde_json::from_str(raw).unwrap();
        assert!(flight.callsign.is_none());
        assert!(flight.est_departure_airport.is_none());
    }

    #[test]
    fn flight_rejects_missing_required_field() {
        let result: Result<Flight, _> = serde_json::from_str(r#"{"icao24":"abc123"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn states_response_null_states_is_empty() {
        let response: StatesResponse =
            serde_json::from_str(r#"{"time":1586031310,"states":null}"#).unwrap();
        assert_eq!(response.time, 1586031310);
        assert!(response.states.is_empty());
    }
}

//! Header-to-column mapping for delimited table input.

use crate::scan::split_fields;

/// Maps the twelve known field names to their position in a delimited line.
///
/// Rebuilt once per parse-file call; columns absent from the header keep
/// their canonical default position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub vehicle_id: usize,
    pub timestamp: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub speed: usize,
    pub heading: usize,
    pub engine_rpm: usize,
    pub fuel_level: usize,
    pub odometer_km: usize,
    pub engine_temp: usize,
    pub battery_volt: usize,
    pub diagnostic_code: usize,
}

impl Default for ColumnMap {
    /// Canonical column order: vehicle_id=0 through diagnostic_code=11.
    fn default() -> Self {
        Self {
            vehicle_id: 0,
            timestamp: 1,
            latitude: 2,
            longitude: 3,
            speed: 4,
            heading: 5,
            engine_rpm: 6,
            fuel_level: 7,
            odometer_km: 8,
            engine_temp: 9,
            battery_volt: 10,
            diagnostic_code: 11,
        }
    }
}

impl ColumnMap {
    /// Build a map from a header line. Matching is case-insensitive;
    /// unrecognized names are silently ignored.
    pub fn from_header(header: &str, delimiter: u8) -> Self {
        let mut fields = Vec::new();
        split_fields(header, delimiter, &mut fields);

        let mut map = Self::default();
        for (i, field) in fields.iter().enumerate() {
            match field.to_ascii_lowercase().as_str() {
                "vehicle_id" => map.vehicle_id = i,
                "timestamp" => map.timestamp = i,
                "latitude" => map.latitude = i,
                "longitude" => map.longitude = i,
                "speed" => map.speed = i,
                "heading" => map.heading = i,
                "engine_rpm" => map.engine_rpm = i,
                "fuel_level" => map.fuel_level = i,
                "odometer_km" => map.odometer_km = i,
                "engine_temp" => map.engine_temp = i,
                "battery_volt" => map.battery_volt = i,
                "diagnostic_code" => map.diagnostic_code = i,
                _ => {}
            }
        }
        map
    }
}

use serde::Serialize;

/// One normalized telemetry observation.
///
/// `diagnostic_code` is optional; an empty string means absent and the field
/// is omitted from JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub vehicle_id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// km/h
    pub speed: f64,
    /// degrees
    pub heading: f64,
    pub engine_rpm: i32,
    /// percentage
    pub fuel_level: f64,
    pub odometer_km: f64,
    /// Celsius
    pub engine_temp: f64,
    pub battery_volt: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub diagnostic_code: String,
}

impl TelemetryRecord {
    /// Range and emptiness checks over the constrained fields.
    ///
    /// Validity is derived, never stored; callers decide whether to filter
    /// on the result.
    pub fn is_valid(&self) -> bool {
        if self.vehicle_id.is_empty() {
            return false;
        }
        if self.latitude < -90.0 || self.latitude > 90.0 {
            return false;
        }
        if self.longitude < -180.0 || self.longitude > 180.0 {
            return false;
        }
        if self.speed < 0.0 {
            return false;
        }
        if self.fuel_level < 0.0 || self.fuel_level > 100.0 {
            return false;
        }
        if self.engine_rpm < 0 {
            return false;
        }
        true
    }

    /// Render this record as a single JSON object.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Configuration for a parser instance.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Discard records that fail [`TelemetryRecord::is_valid`]
    pub validate: bool,
    /// Table input starts with a header row
    pub has_header: bool,
    /// Field delimiter for table input
    pub delimiter: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            validate: true,
            has_header: true,
            delimiter: b',',
        }
    }
}

/// Counters owned by one parser session.
///
/// Never reset implicitly; call [`crate::TelemetryParser::reset_stats`]
/// before reusing a parser for a second file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseStats {
    /// Every input unit seen, including header lines and skipped blanks
    pub total_lines: u64,
    pub valid_records: u64,
    pub invalid_records: u64,
    /// Raw bytes consumed (text decoders only)
    pub bytes_processed: u64,
    pub parse_time_ms: f64,
    /// valid_records / elapsed seconds
    pub records_per_second: f64,
}

impl ParseStats {
    pub fn summary(&self) -> String {
        format!(
            "Parse Statistics:\n  \
             Total lines:      {}\n  \
             Valid records:    {}\n  \
             Invalid records:  {}\n  \
             Bytes processed:  {}\n  \
             Parse time:       {:.2} ms\n  \
             Records/second:   {:.0}",
            self.total_lines,
            self.valid_records,
            self.invalid_records,
            self.bytes_processed,
            self.parse_time_ms,
            self.records_per_second
        )
    }

    pub(crate) fn finish(&mut self, elapsed: std::time::Duration) {
        self.parse_time_ms = elapsed.as_secs_f64() * 1000.0;
        if self.parse_time_ms > 0.0 {
            self.records_per_second =
                (self.valid_records as f64 / self.parse_time_ms) * 1000.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_record() -> TelemetryRecord {
        TelemetryRecord {
            vehicle_id: "VH-1042".to_string(),
            timestamp: 1_700_000_000_000,
            latitude: 51.5,
            longitude: -0.12,
            speed: 62.5,
            heading: 270.0,
            engine_rpm: 2100,
            fuel_level: 73.4,
            odometer_km: 120_553.2,
            engine_temp: 88.0,
            battery_volt: 12.6,
            diagnostic_code: String::new(),
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(good_record().is_valid());
    }

    #[test]
    fn test_invalid_fields() {
        let mut r = good_record();
        r.vehicle_id.clear();
        assert!(!r.is_valid());

        let mut r = good_record();
        r.latitude = 200.0;
        assert!(!r.is_valid());

        let mut r = good_record();
        r.longitude = -180.5;
        assert!(!r.is_valid());

        let mut r = good_record();
        r.speed = -1.0;
        assert!(!r.is_valid());

        let mut r = good_record();
        r.fuel_level = 100.1;
        assert!(!r.is_valid());

        let mut r = good_record();
        r.engine_rpm = -50;
        assert!(!r.is_valid());
    }

    #[test]
    fn test_unconstrained_fields_do_not_invalidate() {
        let mut r = good_record();
        r.heading = -9999.0;
        r.engine_temp = 5000.0;
        r.battery_volt = -3.0;
        r.odometer_km = -1.0;
        assert!(r.is_valid());
    }

    #[test]
    fn test_json_omits_empty_diagnostic() {
        let r = good_record();
        let json = r.to_json();
        assert!(!json.contains("diagnostic_code"));

        let mut r = good_record();
        r.diagnostic_code = "P0420".to_string();
        assert!(r.to_json().contains("\"diagnostic_code\":\"P0420\""));
    }
}

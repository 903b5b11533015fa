/// Test utilities for building FLET binary files byte by byte
use byteorder::{LittleEndian, WriteBytesExt};
use fleetlog_parser::TelemetryRecord;
use std::io::Write;
use tempfile::NamedTempFile;

/// Builder for creating FLET test files independently of the crate's encoder
pub struct FletBuilder {
    data: Vec<u8>,
}

impl FletBuilder {
    /// Create a new builder with the standard header (magic "FLET", version 1)
    pub fn new() -> Self {
        Self::with_header(0x464C4554, 1)
    }

    /// Create a builder with a specific magic and version
    pub fn with_header(magic: u32, version: u8) -> Self {
        let mut data = Vec::new();
        data.write_u32::<LittleEndian>(magic).unwrap();
        data.push(version);
        Self { data }
    }

    /// Append one record in the wire layout
    pub fn record(mut self, r: &TelemetryRecord) -> Self {
        let vid = r.vehicle_id.as_bytes();
        self.data.push(vid.len() as u8);
        self.data.extend_from_slice(vid);

        self.data.write_i64::<LittleEndian>(r.timestamp).unwrap();
        self.data.write_f64::<LittleEndian>(r.latitude).unwrap();
        self.data.write_f64::<LittleEndian>(r.longitude).unwrap();
        self.data.write_f64::<LittleEndian>(r.speed).unwrap();
        self.data.write_f64::<LittleEndian>(r.heading).unwrap();
        self.data.write_i32::<LittleEndian>(r.engine_rpm).unwrap();
        self.data.write_f64::<LittleEndian>(r.fuel_level).unwrap();
        self.data.write_f64::<LittleEndian>(r.odometer_km).unwrap();
        self.data.write_f64::<LittleEndian>(r.engine_temp).unwrap();
        self.data.write_f64::<LittleEndian>(r.battery_volt).unwrap();

        let diag = r.diagnostic_code.as_bytes();
        self.data.push(diag.len() as u8);
        self.data.extend_from_slice(diag);
        self
    }

    /// Append raw bytes (for corruption tests)
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Build and return the final bytes
    pub fn build(self) -> Vec<u8> {
        self.data
    }

    /// Build and write to a temporary file
    pub fn build_file(self) -> NamedTempFile {
        write_temp_bytes(&self.build())
    }
}

impl Default for FletBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample record with every field populated
pub fn sample_record(id: &str) -> TelemetryRecord {
    TelemetryRecord {
        vehicle_id: id.to_string(),
        timestamp: 1_700_000_000_000,
        latitude: 40.7128,
        longitude: -74.006,
        speed: 55.5,
        heading: 180.0,
        engine_rpm: 2500,
        fuel_level: 80.0,
        odometer_km: 45_000.5,
        engine_temp: 90.5,
        battery_volt: 12.8,
        diagnostic_code: String::new(),
    }
}

/// Write text content to a temporary file
pub fn write_temp(content: &str) -> NamedTempFile {
    write_temp_bytes(content.as_bytes())
}

fn write_temp_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

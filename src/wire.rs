//! Low-level FLET binary codec.
//!
//! File layout: a 4-byte magic (`0x464C4554`, "FLET") and a 1-byte format
//! version, followed by a stream of length-prefixed records:
//!
//! ```text
//! [u8 vehicle_id len][vehicle_id bytes]
//! [i64 timestamp][f64 latitude][f64 longitude][f64 speed][f64 heading]
//! [i32 engine_rpm][f64 fuel_level][f64 odometer_km][f64 engine_temp]
//! [f64 battery_volt]
//! [u8 diagnostic len][diagnostic bytes]
//! ```
//!
//! All multi-byte fields are little-endian, so files read the same on any
//! host byte order.

use crate::error::{Error, Result};
use crate::models::TelemetryRecord;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

pub const MAGIC: u32 = 0x464C4554; // "FLET"
pub const VERSION: u8 = 1;

/// Magic + version.
pub const HEADER_LEN: usize = 5;

// Fixed-size numeric block between the two length-prefixed strings:
// timestamp + 4 doubles + rpm + 4 doubles.
const NUMERIC_BLOCK_LEN: usize = 8 + 8 * 4 + 4 + 8 * 4;

/// Append the file header to `buf`.
pub fn write_header(buf: &mut Vec<u8>) {
    buf.extend_from_slice(&MAGIC.to_le_bytes());
    buf.push(VERSION);
}

/// Append one encoded record to `buf`.
///
/// `vehicle_id` and `diagnostic_code` are truncated to 255 bytes; the length
/// prefix is a single byte.
pub fn encode_record(buf: &mut Vec<u8>, record: &TelemetryRecord) {
    let vid = record.vehicle_id.as_bytes();
    let vid_len = vid.len().min(255);
    buf.push(vid_len as u8);
    buf.extend_from_slice(&vid[..vid_len]);

    buf.extend_from_slice(&record.timestamp.to_le_bytes());
    buf.extend_from_slice(&record.latitude.to_le_bytes());
    buf.extend_from_slice(&record.longitude.to_le_bytes());
    buf.extend_from_slice(&record.speed.to_le_bytes());
    buf.extend_from_slice(&record.heading.to_le_bytes());
    buf.extend_from_slice(&record.engine_rpm.to_le_bytes());
    buf.extend_from_slice(&record.fuel_level.to_le_bytes());
    buf.extend_from_slice(&record.odometer_km.to_le_bytes());
    buf.extend_from_slice(&record.engine_temp.to_le_bytes());
    buf.extend_from_slice(&record.battery_volt.to_le_bytes());

    let diag = record.diagnostic_code.as_bytes();
    let diag_len = diag.len().min(255);
    buf.push(diag_len as u8);
    buf.extend_from_slice(&diag[..diag_len]);
}

/// Zero-copy reader over the bytes of a FLET file.
pub struct WireReader<'a> {
    data: &'a [u8],
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Magic and version both match.
    pub fn is_valid(&self) -> bool {
        self.data.len() >= HEADER_LEN
            && self.magic() == MAGIC
            && self.version() == VERSION
    }

    pub fn magic(&self) -> u32 {
        if self.data.len() < 4 {
            return 0;
        }
        let mut cursor = Cursor::new(&self.data[0..4]);
        cursor.read_u32::<LittleEndian>().unwrap_or(0)
    }

    pub fn version(&self) -> u8 {
        if self.data.len() < HEADER_LEN {
            return 0;
        }
        self.data[4]
    }

    /// Iterate over the record stream.
    ///
    /// Fails up front on a magic or version mismatch. A partially written
    /// trailing record surfaces as an error from the iterator rather than
    /// being silently dropped.
    pub fn records(&self) -> Result<WireIterator<'a>> {
        if self.data.len() < HEADER_LEN || self.magic() != MAGIC {
            return Err(Error::InvalidFormat("bad magic bytes".to_string()));
        }
        if self.version() != VERSION {
            return Err(Error::InvalidFormat(format!(
                "unsupported version {}",
                self.version()
            )));
        }

        Ok(WireIterator {
            data: self.data,
            pos: HEADER_LEN,
        })
    }
}

pub struct WireIterator<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireIterator<'a> {
    fn truncated(&mut self) -> Option<Result<TelemetryRecord>> {
        let at = self.pos;
        self.pos = self.data.len(); // stop iteration
        Some(Err(Error::InvalidFormat(format!(
            "truncated record at byte {}",
            at
        ))))
    }
}

impl<'a> Iterator for WireIterator<'a> {
    type Item = Result<TelemetryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }

        let vid_len = self.data[self.pos] as usize;
        let numeric_start = self.pos + 1 + vid_len;
        if numeric_start + NUMERIC_BLOCK_LEN + 1 > self.data.len() {
            return self.truncated();
        }

        let vehicle_id =
            match String::from_utf8(self.data[self.pos + 1..numeric_start].to_vec()) {
                Ok(s) => s,
                Err(e) => return Some(Err(e.into())),
            };

        let mut cursor =
            Cursor::new(&self.data[numeric_start..numeric_start + NUMERIC_BLOCK_LEN]);
        let mut record = TelemetryRecord {
            vehicle_id,
            ..Default::default()
        };
        // Reads from an exactly-sized slice cannot fail
        record.timestamp = cursor.read_i64::<LittleEndian>().unwrap_or(0);
        record.latitude = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.longitude = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.speed = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.heading = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.engine_rpm = cursor.read_i32::<LittleEndian>().unwrap_or(0);
        record.fuel_level = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.odometer_km = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.engine_temp = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);
        record.battery_volt = cursor.read_f64::<LittleEndian>().unwrap_or(0.0);

        let diag_len = self.data[numeric_start + NUMERIC_BLOCK_LEN] as usize;
        let diag_start = numeric_start + NUMERIC_BLOCK_LEN + 1;
        if diag_start + diag_len > self.data.len() {
            return self.truncated();
        }
        record.diagnostic_code =
            match String::from_utf8(self.data[diag_start..diag_start + diag_len].to_vec()) {
                Ok(s) => s,
                Err(e) => return Some(Err(e.into())),
            };

        self.pos = diag_start + diag_len;
        Some(Ok(record))
    }
}

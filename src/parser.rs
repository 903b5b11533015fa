//! High-level decoders for the three telemetry input formats.

use crate::columns::ColumnMap;
use crate::error::{Error, Result};
use crate::models::{ParseStats, ParserConfig, TelemetryRecord};
use crate::scan::{self, split_fields};
use crate::wire::WireReader;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

fn strict_f64(s: &str) -> Result<f64> {
    scan::decode_f64(s.as_bytes())
        .ok_or_else(|| Error::ParseError(format!("invalid numeric value '{}'", s)))
}

fn strict_i32(s: &str) -> Result<i32> {
    scan::decode_i32(s.as_bytes())
        .ok_or_else(|| Error::ParseError(format!("invalid integer value '{}'", s)))
}

/// Decoder for fleet telemetry files.
///
/// One parser owns its own [`ColumnMap`] and [`ParseStats`]; nothing is
/// shared between instances. Stats accumulate across parse calls until
/// [`reset_stats`] is called.
///
/// [`reset_stats`]: TelemetryParser::reset_stats
///
/// # Examples
///
/// ```no_run
/// use fleetlog_parser::{ParserConfig, TelemetryParser};
///
/// let mut parser = TelemetryParser::new(ParserConfig::default());
/// let records = parser.parse_file("telemetry.csv")?;
///
/// println!("{} records", records.len());
/// println!("{}", parser.stats().summary());
/// # Ok::<(), fleetlog_parser::Error>(())
/// ```
pub struct TelemetryParser {
    config: ParserConfig,
    stats: ParseStats,
    columns: ColumnMap,
}

impl TelemetryParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            stats: ParseStats::default(),
            columns: ColumnMap::default(),
        }
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Zero all counters before reusing this parser for another file.
    pub fn reset_stats(&mut self) {
        self.stats = ParseStats::default();
    }

    /// Parse a delimited table file, returning all accepted records.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<TelemetryRecord>> {
        let mut results = Vec::new();
        self.parse_table(path.as_ref(), |record| results.push(record))?;
        Ok(results)
    }

    /// Parse a delimited table file, delivering each accepted record to
    /// `callback` instead of buffering the whole file.
    ///
    /// Decode logic and stats accounting are identical to [`parse_file`];
    /// only delivery differs, bounding memory to one record in flight.
    ///
    /// [`parse_file`]: TelemetryParser::parse_file
    pub fn parse_file_streaming<P, F>(&mut self, path: P, callback: F) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(TelemetryRecord),
    {
        self.parse_table(path.as_ref(), callback)
    }

    fn parse_table<F>(&mut self, path: &Path, mut on_record: F) -> Result<()>
    where
        F: FnMut(TelemetryRecord),
    {
        let start = Instant::now();

        let file = File::open(path)
            .map_err(|e| Error::Other(format!("Failed to open {}: {}", path.display(), e)))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        // The column map is rebuilt once per file
        self.columns = ColumnMap::default();
        if self.config.has_header {
            if let Some(header) = lines.next() {
                self.columns = ColumnMap::from_header(&header?, self.config.delimiter);
                self.stats.total_lines += 1;
            }
        }

        for line in lines {
            let line = line?;
            self.stats.total_lines += 1;
            self.stats.bytes_processed += line.len() as u64 + 1;

            let line = line.trim_end_matches(['\r', '\n', ' ']);
            if line.is_empty() {
                continue;
            }

            match self.decode_table_line(line) {
                Some(record) => {
                    on_record(record);
                    self.stats.valid_records += 1;
                }
                None => self.stats.invalid_records += 1,
            }
        }

        self.stats.finish(start.elapsed());
        Ok(())
    }

    /// Decode a single table line against the current column map.
    ///
    /// Returns `None` when the line has fewer than 11 fields, or when
    /// validation is enabled and the record fails it. Numeric decoding is
    /// lenient here: unparsable values degrade to 0.
    pub fn parse_line(&self, line: &str) -> Option<TelemetryRecord> {
        if line.is_empty() {
            return None;
        }
        self.decode_table_line(line)
    }

    fn decode_table_line(&self, line: &str) -> Option<TelemetryRecord> {
        let mut fields = Vec::with_capacity(16);
        split_fields(line, self.config.delimiter, &mut fields);
        if fields.len() < 11 {
            return None;
        }

        let get = |idx: usize| fields.get(idx).copied().unwrap_or("");
        let lenient = |idx: usize| scan::decode_f64(get(idx).as_bytes()).unwrap_or(0.0);

        let cols = &self.columns;
        let record = TelemetryRecord {
            vehicle_id: get(cols.vehicle_id).to_string(),
            timestamp: scan::decode_timestamp(get(cols.timestamp)),
            latitude: lenient(cols.latitude),
            longitude: lenient(cols.longitude),
            speed: lenient(cols.speed),
            heading: lenient(cols.heading),
            engine_rpm: scan::decode_i32(get(cols.engine_rpm).as_bytes()).unwrap_or(0),
            fuel_level: lenient(cols.fuel_level),
            odometer_km: lenient(cols.odometer_km),
            engine_temp: lenient(cols.engine_temp),
            battery_volt: lenient(cols.battery_volt),
            // Optional twelfth column, left empty when out of range
            diagnostic_code: get(cols.diagnostic_code).to_string(),
        };

        if self.config.validate && !record.is_valid() {
            return None;
        }
        Some(record)
    }

    /// Parse pipe-delimited log lines:
    /// `timestamp|vehicle_id|lat,lon|speed|rpm|fuel|odometer|temp|battery|diagnostic`.
    ///
    /// Blank lines and `#` comments are skipped without counting. Numeric
    /// fields are decoded strictly here — a value that is not a number
    /// aborts the whole parse with an error, unlike the lenient table and
    /// binary paths.
    pub fn parse_log<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<TelemetryRecord>> {
        let start = Instant::now();
        let path = path.as_ref();

        let file = File::open(path)
            .map_err(|e| Error::Other(format!("Failed to open {}: {}", path.display(), e)))?;
        let reader = BufReader::new(file);

        let mut results = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let mut parts: Vec<&str> = Vec::with_capacity(10);
            self.stats.total_lines += 1;
            self.stats.bytes_processed += line.len() as u64 + 1;

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            split_fields(&line, b'|', &mut parts);
            if parts.len() < 10 {
                self.stats.invalid_records += 1;
                continue;
            }

            let mut record = TelemetryRecord {
                timestamp: scan::decode_timestamp(parts[0]),
                vehicle_id: parts[1].to_string(),
                ..Default::default()
            };

            // Combined lat,lon field; both stay 0 when the comma is missing
            if let Some((lat, lon)) = parts[2].split_once(',') {
                record.latitude = strict_f64(lat)?;
                record.longitude = strict_f64(lon)?;
            }

            record.speed = strict_f64(parts[3])?;
            record.engine_rpm = strict_i32(parts[4])?;
            record.fuel_level = strict_f64(parts[5])?;
            record.odometer_km = strict_f64(parts[6])?;
            record.engine_temp = strict_f64(parts[7])?;
            record.battery_volt = strict_f64(parts[8])?;

            if !parts[9].is_empty() {
                record.diagnostic_code = parts[9].to_string();
            }

            if !self.config.validate || record.is_valid() {
                results.push(record);
                self.stats.valid_records += 1;
            } else {
                self.stats.invalid_records += 1;
            }
        }

        self.stats.finish(start.elapsed());
        Ok(results)
    }

    /// Parse a FLET binary file.
    ///
    /// The file is memory-mapped and decoded through [`WireReader`]. A magic
    /// or version mismatch and a truncated trailing record are both fatal.
    /// Bytes processed are not tracked on this path.
    pub fn parse_binary<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<TelemetryRecord>> {
        let start = Instant::now();
        let path = path.as_ref();

        let file = File::open(path)
            .map_err(|e| Error::Other(format!("Failed to open {}: {}", path.display(), e)))?;
        let mmap = unsafe { Mmap::map(&file)? };

        let reader = WireReader::new(&mmap);
        let mut results = Vec::new();

        for record in reader.records()? {
            let record = record?;
            self.stats.total_lines += 1;

            if !self.config.validate || record.is_valid() {
                results.push(record);
                self.stats.valid_records += 1;
            } else {
                self.stats.invalid_records += 1;
            }
        }

        self.stats.finish(start.elapsed());
        Ok(results)
    }
}

impl Default for TelemetryParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

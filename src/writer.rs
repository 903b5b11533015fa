//! High-level API for writing telemetry records to the FLET binary format.

use crate::error::Result;
use crate::models::TelemetryRecord;
use crate::wire;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Buffered writer for FLET binary files.
///
/// The file header is written on creation; records are appended one at a
/// time or as a batch. Buffered bytes reach the file when [`flush`] is
/// called or the writer is dropped.
///
/// [`flush`]: BinaryWriter::flush
///
/// # Examples
///
/// ```no_run
/// use fleetlog_parser::{BinaryWriter, TelemetryRecord};
///
/// let mut writer = BinaryWriter::create("out.fbin")?;
/// writer.write(&TelemetryRecord::default())?;
/// writer.flush()?;
/// println!("wrote {} records", writer.records_written());
/// # Ok::<(), fleetlog_parser::Error>(())
/// ```
pub struct BinaryWriter {
    file: BufWriter<File>,
    buf: Vec<u8>,
    records_written: usize,
}

impl BinaryWriter {
    /// Create the output file and write the format header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = BufWriter::new(File::create(path.as_ref())?);

        let mut header = Vec::with_capacity(wire::HEADER_LEN);
        wire::write_header(&mut header);
        file.write_all(&header)?;

        Ok(Self {
            file,
            buf: Vec::with_capacity(256),
            records_written: 0,
        })
    }

    /// Append one record.
    pub fn write(&mut self, record: &TelemetryRecord) -> Result<()> {
        self.buf.clear();
        wire::encode_record(&mut self.buf, record);
        self.file.write_all(&self.buf)?;
        self.records_written += 1;
        Ok(())
    }

    /// Append a batch of records.
    pub fn write_batch(&mut self, records: &[TelemetryRecord]) -> Result<()> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flush all buffered bytes to the file.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    /// Number of records appended so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

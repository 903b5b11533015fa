//! # Fleet Telemetry Parser
//!
//! A high-performance Rust library for parsing vehicle telemetry from
//! delimited tables (CSV), pipe-delimited log lines, and the compact FLET
//! binary format, with symmetric binary re-encoding.
//!
//! ## Features
//!
//! - **Fast parsing**: single-scan field splitting, locale-free numeric
//!   decoding, memory-mapped binary input
//! - **Three input formats**: one normalized record shape regardless of source
//! - **Binary round trip**: read and write the FLET wire format
//! - **Streaming mode**: per-record callback delivery with O(1) memory
//! - **Parse statistics**: line, record, byte, and throughput counters per
//!   parser session
//!
//! ## Quick Start
//!
//! ```no_run
//! use fleetlog_parser::{ParserConfig, TelemetryParser};
//!
//! let mut parser = TelemetryParser::new(ParserConfig::default());
//! let records = parser.parse_file("telemetry.csv")?;
//!
//! println!("Parsed {} records", records.len());
//! println!("{}", parser.stats().summary());
//! # Ok::<(), fleetlog_parser::Error>(())
//! ```
//!
//! ## Streaming Large Files
//!
//! ```no_run
//! use fleetlog_parser::{ParserConfig, TelemetryParser};
//!
//! let mut parser = TelemetryParser::new(ParserConfig::default());
//! parser.parse_file_streaming("huge.csv", |record| {
//!     // One record in flight at a time
//!     println!("{}", record.to_json());
//! })?;
//! # Ok::<(), fleetlog_parser::Error>(())
//! ```
//!
//! ## Binary Conversion
//!
//! ```no_run
//! use fleetlog_parser::{BinaryWriter, ParserConfig, TelemetryParser};
//!
//! let mut parser = TelemetryParser::new(ParserConfig::default());
//! let records = parser.parse_file("telemetry.csv")?;
//!
//! let mut writer = BinaryWriter::create("telemetry.fbin")?;
//! writer.write_batch(&records)?;
//! writer.flush()?;
//! # Ok::<(), fleetlog_parser::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fatal conditions (unreadable file, bad magic or version, a truncated
//! binary record, a non-numeric field in the strict log path) surface as
//! [`Error`]. Per-record problems — too few fields, failed validation — are
//! not errors; they only increment the invalid-record counter.

// Public API modules
pub mod error;
pub mod parser;
pub mod writer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use models::{ParseStats, ParserConfig, TelemetryRecord};
pub use parser::TelemetryParser;
pub use writer::BinaryWriter;

// Internal modules (public but not part of the high-level API)
pub mod columns;
pub mod models;
pub mod scan;
pub mod wire;

// Convenience type aliases
/// Alias for the result of a buffered parse
pub type Records = Vec<TelemetryRecord>;

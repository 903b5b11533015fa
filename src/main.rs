//! Command-line interface for the fleet telemetry parser.
//!
//! Parses a telemetry file in one of three formats and optionally exports
//! JSON, converts to the FLET binary format, or benchmarks the parser.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use fleetlog_parser::{BinaryWriter, ParserConfig, TelemetryParser, TelemetryRecord};
use log::{info, LevelFilter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Delimited table with optional header row
    #[value(alias = "table")]
    Csv,
    /// Pipe-delimited log lines
    Log,
    /// FLET binary format
    Binary,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Parse fleet telemetry files (CSV, pipe-log, FLET binary)",
    long_about = "A high-performance parser for vehicle telemetry data. Reads delimited tables,\n\
                  pipe-delimited logs, or the compact FLET binary format, and can export JSON\n\
                  or re-encode to binary for faster future parsing."
)]
struct Args {
    /// Input telemetry file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Input format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Write parsed records as a JSON array to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Convert to binary format for faster future parsing
    #[arg(short, long, value_name = "FILE")]
    binary: Option<PathBuf>,

    /// Enable strict validation (discard out-of-range records)
    #[arg(short, long)]
    validate: bool,

    /// Input file has no header row
    #[arg(short = 'n', long)]
    no_header: bool,

    /// Field delimiter for table input
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Show detailed statistics
    #[arg(short, long)]
    stats: bool,

    /// Benchmark with the given number of iterations
    #[arg(short = 'B', long, value_name = "N")]
    benchmark: Option<u32>,
}

fn parse_input(parser: &mut TelemetryParser, args: &Args) -> Result<Vec<TelemetryRecord>> {
    let records = match args.format {
        Format::Csv => parser.parse_file(&args.input)?,
        Format::Log => parser.parse_log(&args.input)?,
        Format::Binary => parser.parse_binary(&args.input)?,
    };
    Ok(records)
}

fn benchmark(args: &Args, iterations: u32) -> Result<()> {
    info!("Benchmarking parser on: {}", args.input.display());
    info!("Iterations: {}", iterations);
    info!("");

    let config = ParserConfig {
        validate: args.validate,
        has_header: !args.no_header,
        delimiter: args.delimiter as u8,
    };

    let mut total_time = 0.0;
    let mut total_records = 0;

    for i in 0..iterations {
        let mut parser = TelemetryParser::new(config.clone());
        let records = parse_input(&mut parser, args)?;

        total_time += parser.stats().parse_time_ms;
        total_records = records.len();

        info!(
            "  Iteration {}: {:.2} ms",
            i + 1,
            parser.stats().parse_time_ms
        );
    }

    let avg_time = total_time / f64::from(iterations);
    let records_per_sec = (total_records as f64 / avg_time) * 1000.0;

    info!("");
    info!("Results:");
    info!("  Records:          {}", total_records);
    info!("  Average time:     {:.2} ms", avg_time);
    info!("  Records/second:   {:.0}", records_per_sec);

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    if let Some(iterations) = args.benchmark {
        return benchmark(&args, iterations);
    }

    let config = ParserConfig {
        validate: args.validate,
        has_header: !args.no_header,
        delimiter: args.delimiter as u8,
    };

    let mut parser = TelemetryParser::new(config);

    info!("🚚 Fleet Telemetry Parser");
    info!("   Input:  {}", args.input.display());
    info!("   Format: {:?}", args.format);
    info!("");

    let records = parse_input(&mut parser, &args)?;
    let stats = parser.stats();

    info!(
        "✓ Parsed {} records in {:.2} ms",
        stats.valid_records, stats.parse_time_ms
    );
    info!("  Speed: {:.0} records/second", stats.records_per_second);
    info!("");

    if args.stats {
        for line in stats.summary().lines() {
            info!("{}", line);
        }
        info!("");
    }

    if let Some(output) = &args.output {
        let file = File::create(output)
            .map_err(|e| anyhow::anyhow!("Cannot create output file {}: {}", output.display(), e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &records)?;
        out.write_all(b"\n")?;
        out.flush()?;

        info!("✓ Wrote JSON output to: {}", output.display());
    }

    if let Some(binary) = &args.binary {
        let mut writer = BinaryWriter::create(binary)?;
        writer.write_batch(&records)?;
        writer.flush()?;

        info!(
            "✓ Wrote binary output to: {} ({} records)",
            binary.display(),
            writer.records_written()
        );
    }

    // Sample preview when no output target was given
    if args.output.is_none() && args.binary.is_none() && !records.is_empty() {
        info!("Sample records (first 5):");
        for r in records.iter().take(5) {
            let diag = if r.diagnostic_code.is_empty() {
                String::new()
            } else {
                format!(" | ⚠️ {}", r.diagnostic_code)
            };
            info!(
                "  [{}] {} | {:.4},{:.4} | {:.1} km/h | RPM: {} | Fuel: {:.1}%{}",
                r.timestamp, r.vehicle_id, r.latitude, r.longitude, r.speed, r.engine_rpm,
                r.fuel_level, diag
            );
        }
    }

    Ok(())
}

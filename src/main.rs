use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use structopt::StructOpt;

use grib2_decode::{Config, Decoder};

#[macro_use]
extern crate log;

#[derive(Debug, StructOpt)]
#[structopt(name = "grib2-decode", about = "Decode GRIB2 messages to JSON")]
struct Cli {
    /// config file
    #[structopt(long = "config", short = "c", default_value = "config.yaml")]
    config_file: PathBuf,

    /// GRIB2 file, possibly holding several messages
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// only decode sections 1 to 5
    #[structopt(long = "metadata-only")]
    metadata_only: bool,

    /// stop after this many messages
    #[structopt(long = "max-messages")]
    max_messages: Option<usize>,

    /// include values in the output
    #[structopt(long = "values")]
    values: bool,
}

/// A decoded grid without its values.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GridSummary<'a> {
    byte_range: &'a grib2_decode::MessageRange,
    identification: &'a grib2_decode::grib::Identification,
    grid: &'a grib2_decode::grib::GridDefinition,
    product: &'a grib2_decode::grib::ProductInfo,
    diagnostics: &'a [grib2_decode::grib::Diagnostic],
    missing: usize,
    min: Option<f64>,
    max: Option<f64>,
}

impl<'a> GridSummary<'a> {
    fn new(grid: &'a grib2_decode::DecodedGrid) -> Self {
        let present = || grid.values.iter().flatten().copied();
        GridSummary {
            byte_range: &grid.byte_range,
            identification: &grid.identification,
            grid: &grid.grid,
            product: &grid.product,
            diagnostics: &grid.diagnostics,
            missing: grid.values.iter().filter(|v| v.is_none()).count(),
            min: present().reduce(f64::min),
            max: present().reduce(f64::max),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> grib2_decode::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    std::env::var("RUST_LOG").map_err(|_| {
        std::env::set_var("RUST_LOG", "error,grib2_decode=info");
    }).unwrap_or_default();
    env_logger::init();

    let args = Cli::from_args();

    let config = Config::load(&args.config_file)
        .with_context(|| format!("Failed to load config {}", args.config_file.display()))?;

    let mut decoder_config = config.decoder;
    if args.max_messages.is_some() {
        decoder_config.max_messages = args.max_messages;
    }
    let decoder = Decoder::new(decoder_config);

    if args.metadata_only {
        let buf = std::fs::read(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
        let report = decoder.decode_metadata_only(&buf, args.max_messages);
        info!("{} messages, {} failures", report.messages.len(), report.failures.len());
        print_json(&report)?;
        return Ok(());
    }

    let report = decoder
        .decode_file(&args.input)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    for failure in &report.failures {
        error!("{}", failure);
    }

    if args.values {
        print_json(&report)?;
    } else {
        let grids: Vec<GridSummary> = report.grids.iter().map(GridSummary::new).collect();
        print_json(&serde_json::json!({
            "grids": grids,
            "failures": report.failures,
        }))?;
    }

    Ok(())
}

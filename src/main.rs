use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use huff::{BitOrder, CodecOptions, Job, Mode, Report, Termination};
use tracing_subscriber::EnvFilter;

/// Huffman encoder/decoder. Encodes by default.
#[derive(Parser, Debug)]
#[command(name = "huff", version)]
struct Args {
    /// File to read
    source: PathBuf,

    /// File to write
    destination: PathBuf,

    /// Decode SOURCE instead of encoding it
    #[arg(short, long)]
    decode: bool,

    /// Print the code table and a size/time report
    #[arg(short, long)]
    verbose: bool,

    /// Frequency table written on encode and read on decode
    #[arg(long, env = "HUFF_FREQ_STORE", default_value = huff::store::DEFAULT_STORE_PATH)]
    freq_store: PathBuf,

    /// Bit position of the first payload bit in each byte
    #[arg(long, value_enum, default_value_t = BitOrderArg::Msb)]
    bit_order: BitOrderArg,

    /// When decoding stops
    #[arg(long, value_enum, default_value_t = TerminationArg::Count)]
    termination: TerminationArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BitOrderArg {
    Msb,
    Lsb,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TerminationArg {
    /// Stop after the number of symbols recorded in the frequency store
    Count,
    /// Read every payload bit, including padding
    ByteBoundary,
}

impl Args {
    fn options(&self) -> CodecOptions {
        CodecOptions {
            bit_order: match self.bit_order {
                BitOrderArg::Msb => BitOrder::MsbFirst,
                BitOrderArg::Lsb => BitOrder::LsbFirst,
            },
            termination: match self.termination {
                TerminationArg::Count => Termination::SymbolCount,
                TerminationArg::ByteBoundary => Termination::ByteBoundary,
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "huff=debug" } else { "huff=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mode = if args.decode { Mode::Decode } else { Mode::Encode };
    let job = Job::new(mode, &args.source, &args.destination)
        .with_frequency_store(&args.freq_store)
        .with_options(args.options());

    let action = match mode {
        Mode::Encode => "encode",
        Mode::Decode => "decode",
    };
    let report = job
        .run()
        .with_context(|| format!("failed to {action} {}", args.source.display()))?;

    if args.verbose {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    if let Some(codes) = &report.codes {
        for (symbol, code) in codes.iter() {
            println!("{}={}", symbol.escape_ascii(), code);
        }
    }

    if report.mode == Mode::Encode {
        println!("Source size: {}", report.source_len);
        println!("Destination size: {}", report.destination_len);
        match report.ratio_percent() {
            Some(ratio) => println!("Compression ratio: {ratio:.2}%"),
            None => println!("Compression ratio: n/a"),
        }
        println!("Elapsed: {}ms", report.elapsed.as_millis());
    }
}

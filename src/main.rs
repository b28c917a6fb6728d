use anyhow::{bail, Context, Result};
use clap::Parser;
use optionledger::{match_trades, CsvLoader, LoadOptions, ReportOptions, Reporter};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "optionledger",
    version,
    about = "Pair option opens and closes FIFO and report realized profit"
)]
struct Cli {
    /// Brokerage CSV export
    #[arg(env = "OPTIONLEDGER_INPUT")]
    input: PathBuf,

    /// Field delimiter of the export
    #[arg(short = 'd', long, default_value_t = ',')]
    delimiter: char,

    /// Also print profit rolled up by close date
    #[arg(long)]
    daily: bool,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// csv splits on raw bytes, so only ASCII delimiters are safe in UTF-8 input
fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter '{}' must be a single ASCII character", delimiter);
    }
    Ok(delimiter as u8)
}

fn run<W: Write>(cli: &Cli, out: W) -> Result<()> {
    let loader = CsvLoader::new(LoadOptions {
        delimiter: delimiter_byte(cli.delimiter)?,
        ..LoadOptions::default()
    });

    info!(path = %cli.input.display(), "loading transactions");
    let transactions = loader
        .read_path(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let result = match_trades(&transactions);

    Reporter::new(&result, ReportOptions { daily: cli.daily })
        .write(out)
        .context("failed to write report")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli, io::stdout().lock())
}

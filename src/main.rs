//! Command-line front end: parse an FST file and dump per-block artifacts.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Decode an FST file into per-block inspection artifacts.
#[derive(Parser, Debug)]
#[command(name = "fstdump", version, about)]
struct Cli {
    /// FST file to parse.
    input_fst: PathBuf,

    /// Directory to save extracted blocks. Removed and recreated on startup.
    #[arg(long = "output_dir", default_value = "output_blocks")]
    output_dir: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = fstdump::extract_blocks(&cli.input_fst, &cli.output_dir) {
        error!("{err}");
        process::exit(1);
    }
}

use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    generate::{self, GenerateArgs},
    labels::{self, LabelsArgs},
    raster::{self, RasterArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "swmb", about = "Shaltop parameter sweep deck generator")]
struct Cli {
    /// Log per-run and per-file detail.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write case files, field dumps and the driver script for a plan.
    Generate(GenerateArgs),
    /// Print the run labels a plan would produce without touching disk.
    Labels(LabelsArgs),
    /// Summarise an ASCII raster as JSON.
    Raster(RasterArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Labels(args) => labels::run(&args),
        Command::Raster(args) => raster::run(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

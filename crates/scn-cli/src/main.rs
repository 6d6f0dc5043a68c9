use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod io;

use commands::{
    census::{self, CensusArgs},
    compare::{self, CompareArgs},
    fit::{self, FitArgs},
    sample::{self, SampleArgs},
    summary::{self, SummaryArgs},
    version::{self, VersionArgs},
};

#[derive(Parser, Debug)]
#[command(name = "scn", about = "Structural coefficient analysis CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute path census coefficients for a graph.
    Census(CensusArgs),
    /// Fit and validate the UBCM null model for a graph.
    Fit(FitArgs),
    /// Draw random graphs from a fitted UBCM ensemble.
    Sample(SampleArgs),
    /// Run the full null-model comparison: p-values and calibrated effects.
    Compare(CompareArgs),
    /// Print a descriptive summary of a graph.
    Summary(SummaryArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Census(args) => census::run(&args),
        Command::Fit(args) => fit::run(&args),
        Command::Sample(args) => sample::run(&args),
        Command::Compare(args) => compare::run(&args),
        Command::Summary(args) => summary::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

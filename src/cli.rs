use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ClearView CE-QUAL-W2 output toolkit.
#[derive(Parser)]
#[command(
    name = "clearview",
    version,
    about = "Load CE-QUAL-W2 model output and convert or summarise it"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Load a model output file and persist it to another format.
    Convert(ConvertArgs),
    /// Load a model output file and print summary statistics.
    Stats(StatsArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to the model output file (.npt, .csv, .opt).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination path; format chosen by extension
    /// (.sqlite/.db, .h5/.hdf5, .nc, .csv).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Simulation start year for timestamping (overrides config).
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Skip malformed rows instead of aborting.
    #[arg(long)]
    pub lenient: bool,

    /// Table or group name in the destination (default: input file stem).
    #[arg(short, long)]
    pub key: Option<String>,
}

/// Arguments for the `stats` subcommand.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the model output file (.npt, .csv, .opt).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Simulation start year for timestamping (overrides config).
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Skip malformed rows instead of aborting.
    #[arg(long)]
    pub lenient: bool,
}

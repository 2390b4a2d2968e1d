use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Folio: digest-keyed object storage, one file per value",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a folio.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store directory (overrides the config file)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every stored record
    List,
    /// Store a JSON record
    Put(RecordArgs),
    /// Delete a JSON record
    Delete(RecordArgs),
    /// Show the resolved store directory and base locations
    Paths,
}

#[derive(Args)]
pub struct RecordArgs {
    /// The record as a JSON object, e.g. '{"title": "a"}'
    pub json: String,
}

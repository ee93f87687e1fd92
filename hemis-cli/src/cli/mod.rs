//! Command-line surface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hemis-cli",
    about = "Ingest higher-education report workbooks and submit them to the registry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, validate and submit a report workbook
    Upload(commands::upload::UploadArgs),
    /// Extract and summarize a workbook without submitting anything
    Inspect(commands::inspect::InspectArgs),
}

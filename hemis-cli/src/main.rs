mod api;
mod cli;
mod ingest;
mod upload;
mod workbook;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Upload(args) => cli::commands::upload::handle_upload(args).await,
        Commands::Inspect(args) => cli::commands::inspect::handle_inspect(args).await,
    }
}

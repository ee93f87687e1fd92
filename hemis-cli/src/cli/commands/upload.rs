//! Upload command handler: workbook in, run summary out

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::api::RegistryClient;
use crate::ingest::{Category, IngestOptions, extract_units};
use crate::upload::{BatchUploader, RunSummary, UploadOptions};
use crate::workbook::read_workbook;

#[derive(Args)]
pub struct UploadArgs {
    /// Path to the report workbook (xlsx or legacy xls)
    pub file: PathBuf,

    /// Institution id the workbook reports for
    #[arg(long)]
    pub institution: String,

    /// Restrict the run to these categories (comma-separated labels);
    /// default is every category
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Registry API base URL; falls back to REGISTRY_API_URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Registry API bearer token; falls back to REGISTRY_API_TOKEN
    #[arg(long)]
    pub token: Option<String>,

    /// Units submitted concurrently (1 = strictly sequential)
    #[arg(long, default_value_t = 1)]
    pub max_in_flight: usize,

    /// Extract and validate only; submit nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run summary as JSON instead of the colored report
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub async fn handle_upload(args: UploadArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    if !args.file.exists() {
        anyhow::bail!("Workbook file does not exist: {}", args.file.display());
    }
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read workbook: {}", args.file.display()))?;
    let workbook = read_workbook(&bytes)?;

    let mut options = IngestOptions::new(&args.institution);
    if !args.category.is_empty() {
        options.categories = parse_categories(&args.category)?;
    }

    let extraction = extract_units(&workbook, &options);
    if !args.json {
        println!(
            "Extracted {} upload units from {} ({} rows skipped)",
            extraction.units.len().to_string().bold(),
            args.file.display(),
            extraction.skipped
        );
    }

    if args.dry_run {
        for unit in &extraction.units {
            println!("  {}", unit.label().dimmed());
        }
        println!("{}", "Dry run: nothing submitted".yellow());
        return Ok(());
    }

    let api_url = resolve(args.api_url, "REGISTRY_API_URL")
        .context("No registry URL. Pass --api-url or set REGISTRY_API_URL.")?;
    let token = resolve(args.token, "REGISTRY_API_TOKEN")
        .context("No registry token. Pass --token or set REGISTRY_API_TOKEN.")?;

    let client = RegistryClient::new(api_url, token);
    let uploader = BatchUploader::new(
        &client,
        UploadOptions {
            max_in_flight: args.max_in_flight,
        },
    );

    let skipped = extraction.skipped;
    let show_progress = !args.json;
    let mut summary = uploader
        .submit_all(extraction.units, |pct| {
            if show_progress {
                print!("\rSubmitting... {:>3}%", pct);
                let _ = std::io::stdout().flush();
            }
        })
        .await?;
    summary.skipped = skipped;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        print_summary(&summary);
    }
    if summary.failed > 0 {
        anyhow::bail!("{} records were rejected by the registry", summary.failed);
    }
    Ok(())
}

fn parse_categories(labels: &[String]) -> Result<Vec<Category>> {
    labels
        .iter()
        .map(|label| {
            Category::parse(label)
                .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", label))
        })
        .collect()
}

fn resolve(flag: Option<String>, env_var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(env_var).ok())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} accepted, {} skipped, {} failed",
        summary.accepted.to_string().green().bold(),
        summary.skipped.to_string().yellow(),
        summary.failed.to_string().red()
    );
    for failure in &summary.failures {
        println!("  {} {}: {}", "✗".red(), failure.record, failure.reason);
    }
}

//! Inspect command handler: what would an upload submit?

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use serde_json::json;

use crate::ingest::{IngestOptions, extract_units};
use crate::workbook::read_workbook;

#[derive(Args)]
pub struct InspectArgs {
    /// Path to the report workbook (xlsx or legacy xls)
    pub file: PathBuf,

    /// Institution id stamped on extracted records
    #[arg(long, default_value = "-")]
    pub institution: String,

    /// Emit the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub async fn handle_inspect(args: InspectArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    if !args.file.exists() {
        anyhow::bail!("Workbook file does not exist: {}", args.file.display());
    }
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read workbook: {}", args.file.display()))?;
    let workbook = read_workbook(&bytes)?;

    let extraction = extract_units(&workbook, &IngestOptions::new(&args.institution));

    let mut per_category: BTreeMap<&'static str, usize> = BTreeMap::new();
    for unit in &extraction.units {
        *per_category.entry(unit.category().label()).or_insert(0) += 1;
    }

    if args.json {
        let payload = json!({
            "file": args.file.display().to_string(),
            "sheets": workbook.sheets.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
            "units": extraction.units.len(),
            "skipped": extraction.skipped,
            "per_category": per_category,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", args.file.display().to_string().bold());
    println!(
        "  {} sheets: {}",
        workbook.sheets.len(),
        workbook
            .sheets
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
            .dimmed()
    );
    for (category, count) in &per_category {
        println!("  {:<24} {}", category, count.to_string().green());
    }
    println!(
        "  {} upload units, {} rows skipped",
        extraction.units.len().to_string().bold(),
        extraction.skipped
    );
    Ok(())
}

//! Ingestion pipeline: parsed workbook to the ordered list of upload units
//!
//! One pass per category, in the fixed category order: select the sheet by
//! position, walk its data rows, map each through the positional schema,
//! validate/derive, and deduplicate. Everything here is synchronous and
//! side-effect free apart from logging; submission lives in [`crate::upload`].

pub mod category;
pub mod dedup;
pub mod mapper;
pub mod normalize;
pub mod records;
pub mod schema;
pub mod validate;

use log::{debug, info};

use crate::workbook::{Workbook, data_rows, sheet_for_category};

pub use category::{CATEGORY_ORDER, Category, HEADER_ROWS};
pub use records::{GraduateRecord, Sex, UploadUnit};

/// Knobs for one extraction pass.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Institution the workbook reports for; stamped on every record.
    pub institution_id: String,
    /// Categories to extract. Defaults to all of them; a subset restricts
    /// the pass without changing sheet positions.
    pub categories: Vec<Category>,
    /// Rows of banner/title content above the data block on every sheet.
    pub header_rows: usize,
}

impl IngestOptions {
    pub fn new(institution_id: impl Into<String>) -> Self {
        Self {
            institution_id: institution_id.into(),
            categories: CATEGORY_ORDER.to_vec(),
            header_rows: HEADER_ROWS,
        }
    }
}

/// Result of one extraction pass: units in sheet order, plus the number of
/// rows that were skipped (blank identity column, failed a required-field
/// check, or duplicated an earlier row). Skips are not errors.
#[derive(Debug)]
pub struct Extraction {
    pub units: Vec<UploadUnit>,
    pub skipped: usize,
}

/// Extract every accepted upload unit from the workbook, in category order
/// then sheet row order.
///
/// Missing sheets skip their category silently: partial submissions are
/// allowed. Fully-empty rows are spacing and are not counted; a row with
/// content but a blank identity column counts as a skip.
pub fn extract_units(workbook: &Workbook, options: &IngestOptions) -> Extraction {
    let mut units = Vec::new();
    let mut skipped = 0;
    let mut deduplicator = dedup::Deduplicator::new();

    for (position, category) in CATEGORY_ORDER.iter().enumerate() {
        if !options.categories.contains(category) {
            continue;
        }
        let Some(sheet) = sheet_for_category(workbook, position) else {
            info!(
                "No sheet at position {} for {}, category skipped",
                position, category
            );
            continue;
        };

        let identity_column = if category.is_program_level() {
            schema::program::IDENTITY.column
        } else {
            schema::graduate::IDENTITY.column
        };

        for row in data_rows(sheet, options.header_rows) {
            if row.cell(identity_column).is_empty() {
                debug!(
                    "{} row {}: identity column blank, skipped",
                    category, row.index
                );
                skipped += 1;
                continue;
            }
            let mapped = mapper::map_row(*category, &row);
            match validate::validate(mapped, &options.institution_id) {
                Ok(unit) => {
                    if deduplicator.insert(&unit) {
                        units.push(unit);
                    } else {
                        debug!(
                            "{} row {}: duplicate of an earlier row, skipped",
                            category, row.index
                        );
                        skipped += 1;
                    }
                }
                Err(reason) => {
                    debug!("{} row {}: {}, skipped", category, row.index, reason);
                    skipped += 1;
                }
            }
        }
    }

    info!(
        "Extracted {} upload units, {} rows skipped",
        units.len(),
        skipped
    );
    Extraction { units, skipped }
}

//! Row extraction: the data rows of a sheet, below the banner/header block

use super::{Cell, Sheet};

/// One raw data row, indexed by column position.
///
/// `index` is the 1-based sheet row number, kept for error reporting only.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    pub index: usize,
    pub cells: &'a [Cell],
}

impl RawRow<'_> {
    /// Cell at a column position; positions past the stored row are blank.
    pub fn cell(&self, column: usize) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Empty)
    }
}

/// Lazy iterator over the candidate data rows of a sheet.
///
/// Rows above `header_rows` are banner/title/header content and never data;
/// fully-empty rows are spacing, also never data. Rows with content but a
/// blank identity column still come through: the pipeline decides whether
/// they count as skips. Ordering is preserved; nothing is reordered or
/// deduplicated here.
pub fn data_rows<'a>(sheet: &'a Sheet, header_rows: usize) -> impl Iterator<Item = RawRow<'a>> + 'a {
    sheet
        .rows
        .iter()
        .enumerate()
        .skip(header_rows)
        .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
        .map(|(i, cells)| RawRow {
            index: i + 1,
            cells,
        })
}

//! Workbook parsing: binary spreadsheet bytes to an in-memory grid model
//!
//! Everything downstream of this module works on [`Workbook`]/[`Sheet`]/[`Cell`]
//! instead of calamine types, so the extraction and mapping stages can be
//! tested against hand-built grids.

use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;

pub mod rows;

pub use rows::{RawRow, data_rows};

/// A parsed workbook: ordered sheets, as stored in the file.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// One sheet: a rectangular grid of cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

/// A single cell value, narrowed from the underlying format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Parse raw spreadsheet bytes (xlsx or legacy xls) into a [`Workbook`].
///
/// Fails before any extraction when the bytes are not a parseable
/// spreadsheet. Pure transformation; no side effects.
pub fn read_workbook(bytes: &[u8]) -> Result<Workbook> {
    let mut reader = open_workbook_auto_from_rs(Cursor::new(bytes))
        .context("Malformed workbook: bytes are not a supported spreadsheet format")?;

    let mut sheets = Vec::new();
    for name in reader.sheet_names() {
        let range = reader
            .worksheet_range(&name)
            .with_context(|| format!("Failed to read sheet: {}", name))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        sheets.push(Sheet { name, rows });
    }

    Ok(Workbook { sheets })
}

/// Select the sheet for a category by its expected ordinal position.
///
/// Returns `None` when the workbook has fewer sheets than expected; partial
/// submissions (a subset of categories) are allowed, so the caller skips the
/// category instead of failing the run.
pub fn sheet_for_category(workbook: &Workbook, index: usize) -> Option<&Sheet> {
    workbook.sheets.get(index)
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        // Whitespace-only cells behave as blanks throughout the pipeline
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Cell::Date(ndt.date()),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) => parse_iso_date(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};

    fn sample_workbook_bytes() -> Vec<u8> {
        let mut book = XlsxWorkbook::new();

        let first = book.add_worksheet();
        first.set_name("Doctorate").unwrap();
        first.write_string(0, 0, "Annual Report").unwrap();
        first.write_string(1, 1, "BSCS").unwrap();
        first.write_number(1, 2, 101.0).unwrap();
        first.write_string(2, 1, "   ").unwrap();

        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let second = book.add_worksheet();
        second.set_name("Masters").unwrap();
        second
            .write_datetime_with_format(
                0,
                0,
                &ExcelDateTime::from_ymd(2021, 6, 30).unwrap(),
                &date_format,
            )
            .unwrap();

        book.save_to_buffer().unwrap()
    }

    #[test]
    fn test_read_workbook_sheets_in_order() {
        let bytes = sample_workbook_bytes();
        let workbook = read_workbook(&bytes).unwrap();

        assert_eq!(workbook.sheets.len(), 2);
        assert_eq!(workbook.sheets[0].name, "Doctorate");
        assert_eq!(workbook.sheets[1].name, "Masters");
    }

    #[test]
    fn test_cell_conversion() {
        let bytes = sample_workbook_bytes();
        let workbook = read_workbook(&bytes).unwrap();

        let doctorate = &workbook.sheets[0];
        assert_eq!(doctorate.rows[0][0], Cell::Text("Annual Report".into()));
        assert_eq!(doctorate.rows[1][1], Cell::Text("BSCS".into()));
        assert_eq!(doctorate.rows[1][2], Cell::Number(101.0));
        // Whitespace-only strings collapse to Empty
        assert_eq!(doctorate.rows[2][1], Cell::Empty);

        let masters = &workbook.sheets[1];
        assert_eq!(
            masters.rows[0][0],
            Cell::Date(NaiveDate::from_ymd_opt(2021, 6, 30).unwrap())
        );
    }

    #[test]
    fn test_read_workbook_rejects_garbage() {
        let result = read_workbook(b"definitely not a spreadsheet");
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Malformed workbook"));
    }

    #[test]
    fn test_sheet_for_category_missing_index() {
        let bytes = sample_workbook_bytes();
        let workbook = read_workbook(&bytes).unwrap();

        assert!(sheet_for_category(&workbook, 1).is_some());
        assert!(sheet_for_category(&workbook, 6).is_none());
    }
}

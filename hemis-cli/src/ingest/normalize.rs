//! Type coercion for raw cell values
//!
//! Every function here narrows a cell to a well-typed value or a sentinel
//! absence; none of them fail. Whether an absence is acceptable is the
//! validator's call, not this module's.

use chrono::{Duration, NaiveDate};

use crate::workbook::Cell;

use super::records::Sex;

/// Trimmed text. Numeric cells render as text (codes are often stored as
/// numbers by spreadsheet tools), integral floats without a fraction.
pub fn text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Cell::Number(f) => {
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Cell::Bool(b) => Some(b.to_string()),
        Cell::Date(d) => Some(d.to_string()),
    }
}

/// Lenient numeric coercion for accumulation-type fields: absent or
/// unparseable input becomes 0. Thousands separators are tolerated.
pub fn number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(f) => *f,
        Cell::Text(s) => s.trim().replace(',', "").parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Lenient whole-number headcount; 0 when absent or unparseable.
pub fn count(cell: &Cell) -> i64 {
    number(cell).round() as i64
}

/// Strict whole number for fields that must be a genuine number (e.g.
/// `year_granted`): unparseable input yields `None`, not 0, so the
/// validator can reject the record.
pub fn year(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Number(f) if f.fract() == 0.0 => Some(*f as i64),
        Cell::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Calendar date from native date cells, Excel serial numbers, or common
/// string formats. Unparseable or empty input yields `None`.
pub fn date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Number(serial) => serial_date(*serial),
        Cell::Text(s) => parse_date_string(s.trim()),
        _ => None,
    }
}

/// Sex codes: uppercase/trim, then the closed {M, F} set. Full words are
/// accepted; anything else normalizes to `None`.
pub fn sex(cell: &Cell) -> Option<Sex> {
    let raw = text(cell)?;
    match raw.trim().to_uppercase().as_str() {
        "M" | "MALE" => Some(Sex::Male),
        "F" | "FEMALE" => Some(Sex::Female),
        _ => None,
    }
}

/// Excel serial dates count days from the 1900 epoch (with its historical
/// off-by-two, hence 1899-12-30).
fn serial_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..3_000_000.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn parse_date_string(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%d/%m/%Y", "%B %d, %Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

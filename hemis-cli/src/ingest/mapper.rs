//! Field mapping: one raw row to the typed draft records for its category
//!
//! All column positions come from the static schema tables; this module
//! never indexes a row with a literal. Required fields stay optional on the
//! drafts; presence is checked by the validator, which also computes the
//! derived totals.

use chrono::NaiveDate;

use crate::workbook::RawRow;

use super::category::Category;
use super::normalize;
use super::records::Sex;
use super::schema::{graduate, program};

/// Draft of a program row: program, enrollment and statistics fields as
/// coerced from the sheet, before validation/derivation.
#[derive(Debug, Clone)]
pub struct ProgramRowDraft {
    pub category: Category,
    pub source_row: usize,
    pub program_name: Option<String>,
    pub program_code: Option<String>,
    pub major_name: Option<String>,
    pub major_code: Option<String>,
    pub authority_code: Option<String>,
    pub lab_units: f64,
    pub lecture_units: f64,
    pub tuition_per_unit: f64,
    pub annual_fees: f64,
    pub male_by_year: [i64; 7],
    pub female_by_year: [i64; 7],
    pub lecture_units_actual: f64,
    pub laboratory_units_actual: f64,
    pub graduates_males: i64,
    pub graduates_females: i64,
    pub scholarship_count: i64,
    pub grantee_count: i64,
}

/// Draft of a graduates-sheet row.
#[derive(Debug, Clone)]
pub struct GraduateRowDraft {
    pub source_row: usize,
    pub student_number: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub sex: Option<Sex>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_graduated: Option<NaiveDate>,
    pub program_name: Option<String>,
    pub major_name: Option<String>,
    pub authority_code: Option<String>,
    pub year_granted: Option<i64>,
}

/// What one raw row maps to, depending on its category.
#[derive(Debug, Clone)]
pub enum MappedRow {
    Program(ProgramRowDraft),
    Graduate(GraduateRowDraft),
}

/// Map one raw row through the fixed positional schema of its category.
pub fn map_row(category: Category, row: &RawRow) -> MappedRow {
    if category.is_program_level() {
        MappedRow::Program(map_program_row(category, row))
    } else {
        MappedRow::Graduate(map_graduate_row(row))
    }
}

fn map_program_row(category: Category, row: &RawRow) -> ProgramRowDraft {
    ProgramRowDraft {
        category,
        source_row: row.index,
        program_name: normalize::text(row.cell(program::PROGRAM_NAME.column)),
        program_code: normalize::text(row.cell(program::PROGRAM_CODE.column)),
        major_name: normalize::text(row.cell(program::MAJOR_NAME.column)),
        major_code: normalize::text(row.cell(program::MAJOR_CODE.column)),
        authority_code: normalize::text(row.cell(program::AUTHORITY_CODE.column)),
        lab_units: normalize::number(row.cell(program::LAB_UNITS.column)),
        lecture_units: normalize::number(row.cell(program::LECTURE_UNITS.column)),
        tuition_per_unit: normalize::number(row.cell(program::TUITION_PER_UNIT.column)),
        annual_fees: normalize::number(row.cell(program::ANNUAL_FEES.column)),
        male_by_year: std::array::from_fn(|i| {
            normalize::count(row.cell(program::MALE_BY_YEAR[i].column))
        }),
        female_by_year: std::array::from_fn(|i| {
            normalize::count(row.cell(program::FEMALE_BY_YEAR[i].column))
        }),
        lecture_units_actual: normalize::number(row.cell(program::LECTURE_UNITS_ACTUAL.column)),
        laboratory_units_actual: normalize::number(
            row.cell(program::LABORATORY_UNITS_ACTUAL.column),
        ),
        graduates_males: normalize::count(row.cell(program::GRADUATES_MALES.column)),
        graduates_females: normalize::count(row.cell(program::GRADUATES_FEMALES.column)),
        scholarship_count: normalize::count(row.cell(program::SCHOLARSHIP_COUNT.column)),
        grantee_count: normalize::count(row.cell(program::GRANTEE_COUNT.column)),
    }
}

fn map_graduate_row(row: &RawRow) -> GraduateRowDraft {
    GraduateRowDraft {
        source_row: row.index,
        student_number: normalize::text(row.cell(graduate::STUDENT_NUMBER.column)),
        last_name: normalize::text(row.cell(graduate::LAST_NAME.column)),
        first_name: normalize::text(row.cell(graduate::FIRST_NAME.column)),
        middle_name: normalize::text(row.cell(graduate::MIDDLE_NAME.column)),
        sex: normalize::sex(row.cell(graduate::SEX.column)),
        date_of_birth: normalize::date(row.cell(graduate::DATE_OF_BIRTH.column)),
        date_graduated: normalize::date(row.cell(graduate::DATE_GRADUATED.column)),
        program_name: normalize::text(row.cell(graduate::PROGRAM_NAME.column)),
        major_name: normalize::text(row.cell(graduate::MAJOR_NAME.column)),
        authority_code: normalize::text(row.cell(graduate::AUTHORITY_CODE.column)),
        year_granted: normalize::year(row.cell(graduate::YEAR_GRANTED.column)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Cell;

    fn txt(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn raw_row(cells: &[Cell]) -> RawRow<'_> {
        RawRow { index: 12, cells }
    }

    fn program_cells() -> Vec<Cell> {
        let mut cells = vec![Cell::Empty; 30];
        cells[1] = txt("BSCS");
        cells[2] = txt("CS01");
        cells[3] = txt("Major A");
        cells[4] = txt("M01");
        cells[6] = Cell::Number(1.0); // lab units
        cells[7] = Cell::Number(2.0); // lecture units
        cells[10] = Cell::Number(15.0); // 1st year male
        cells[17] = Cell::Number(20.0); // 1st year female
        cells[26] = Cell::Number(3.0); // graduates male
        cells[27] = Cell::Number(4.0); // graduates female
        cells
    }

    #[test]
    fn test_program_row_positional_mapping() {
        let cells = program_cells();
        let mapped = map_row(Category::Baccalaureate, &raw_row(&cells));

        let MappedRow::Program(draft) = mapped else {
            panic!("expected program draft");
        };
        assert_eq!(draft.program_name.as_deref(), Some("BSCS"));
        assert_eq!(draft.program_code.as_deref(), Some("CS01"));
        assert_eq!(draft.major_name.as_deref(), Some("Major A"));
        assert_eq!(draft.category, Category::Baccalaureate);
        assert_eq!(draft.source_row, 12);
        assert_eq!(draft.male_by_year[0], 15);
        assert_eq!(draft.female_by_year[0], 20);
        assert_eq!(draft.graduates_males, 3);
        assert_eq!(draft.graduates_females, 4);
    }

    #[test]
    fn test_absent_cells_map_to_defaults() {
        let mut cells = vec![Cell::Empty; 30];
        cells[1] = txt("BSIT");
        cells[2] = txt("IT01");
        let MappedRow::Program(draft) = map_row(Category::Masters, &raw_row(&cells)) else {
            panic!("expected program draft");
        };

        assert_eq!(draft.lab_units, 0.0);
        assert_eq!(draft.male_by_year, [0; 7]);
        assert_eq!(draft.major_name, None);
        assert_eq!(draft.authority_code, None);
    }

    #[test]
    fn test_graduate_row_mapping() {
        let mut cells = vec![Cell::Empty; 12];
        cells[1] = txt("2000-0415");
        cells[2] = txt("Reyes");
        cells[3] = txt("Ana");
        cells[5] = txt("F");
        cells[6] = txt("1979-02-11");
        cells[7] = txt("2000-04-01");
        cells[8] = txt("BS Biology");
        cells[11] = Cell::Number(2000.0);

        let MappedRow::Graduate(draft) = map_row(Category::Graduates, &raw_row(&cells)) else {
            panic!("expected graduate draft");
        };
        assert_eq!(draft.student_number.as_deref(), Some("2000-0415"));
        assert_eq!(draft.sex, Some(Sex::Female));
        assert_eq!(
            draft.date_of_birth,
            chrono::NaiveDate::from_ymd_opt(1979, 2, 11)
        );
        assert_eq!(draft.year_granted, Some(2000));
    }

    #[test]
    fn test_graduate_sex_outside_closed_set_maps_absent() {
        let mut cells = vec![Cell::Empty; 12];
        cells[1] = txt("2000-0001");
        cells[5] = txt("x");
        let MappedRow::Graduate(draft) = map_row(Category::Graduates, &raw_row(&cells)) else {
            panic!("expected graduate draft");
        };
        assert_eq!(draft.sex, None);
    }
}

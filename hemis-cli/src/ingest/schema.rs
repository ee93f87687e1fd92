//! Static positional column schemas for the reporting template
//!
//! Every sheet in the template has a fixed column order; these tables are the
//! single place where column indexes live. Each target field is bound to one
//! column as a `ColumnSpec { column, field, kind, required }` entry, so a
//! template revision changes this module and nothing else.
//!
//! Column 0 is the row sequence number on every sheet and is never mapped.

/// Bumped whenever the reporting template's column order changes.
pub const SCHEMA_VERSION: u32 = 1;

/// How a column's cells are coerced by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed text; empty becomes absent
    Text,
    /// Lenient numeric; absent or unparseable becomes 0
    Number,
    /// Lenient whole-number headcount; absent or unparseable becomes 0
    Count,
    /// Calendar date; unparseable becomes absent
    Date,
    /// Closed {M, F} set; anything else becomes absent
    Sex,
    /// Strict whole number; unparseable becomes absent so validation can reject
    Year,
}

/// Binding of one target field to one column position.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub column: usize,
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn col(column: usize, field: &'static str, kind: FieldKind, required: bool) -> ColumnSpec {
    ColumnSpec {
        column,
        field,
        kind,
        required,
    }
}

/// Program-level sheets: one row carries program, enrollment and statistics
/// fields side by side.
pub mod program {
    use super::{ColumnSpec, FieldKind::*, col};

    pub const PROGRAM_NAME: ColumnSpec = col(1, "program_name", Text, true);
    pub const PROGRAM_CODE: ColumnSpec = col(2, "program_code", Text, true);
    pub const MAJOR_NAME: ColumnSpec = col(3, "major_name", Text, false);
    pub const MAJOR_CODE: ColumnSpec = col(4, "major_code", Text, false);
    pub const AUTHORITY_CODE: ColumnSpec = col(5, "authority_code", Text, false);
    pub const LAB_UNITS: ColumnSpec = col(6, "lab_units", Number, false);
    pub const LECTURE_UNITS: ColumnSpec = col(7, "lecture_units", Number, false);
    pub const TUITION_PER_UNIT: ColumnSpec = col(8, "tuition_per_unit", Number, false);
    pub const ANNUAL_FEES: ColumnSpec = col(9, "annual_fees", Number, false);

    /// Headcounts for year levels 1 through 7, male then female blocks.
    pub const MALE_BY_YEAR: [ColumnSpec; 7] = [
        col(10, "enrollment_male_year1", Count, false),
        col(11, "enrollment_male_year2", Count, false),
        col(12, "enrollment_male_year3", Count, false),
        col(13, "enrollment_male_year4", Count, false),
        col(14, "enrollment_male_year5", Count, false),
        col(15, "enrollment_male_year6", Count, false),
        col(16, "enrollment_male_year7", Count, false),
    ];
    pub const FEMALE_BY_YEAR: [ColumnSpec; 7] = [
        col(17, "enrollment_female_year1", Count, false),
        col(18, "enrollment_female_year2", Count, false),
        col(19, "enrollment_female_year3", Count, false),
        col(20, "enrollment_female_year4", Count, false),
        col(21, "enrollment_female_year5", Count, false),
        col(22, "enrollment_female_year6", Count, false),
        col(23, "enrollment_female_year7", Count, false),
    ];

    pub const LECTURE_UNITS_ACTUAL: ColumnSpec = col(24, "lecture_units_actual", Number, false);
    pub const LABORATORY_UNITS_ACTUAL: ColumnSpec =
        col(25, "laboratory_units_actual", Number, false);
    pub const GRADUATES_MALES: ColumnSpec = col(26, "graduates_males", Count, false);
    pub const GRADUATES_FEMALES: ColumnSpec = col(27, "graduates_females", Count, false);
    pub const SCHOLARSHIP_COUNT: ColumnSpec = col(28, "scholarship_count", Count, false);
    pub const GRANTEE_COUNT: ColumnSpec = col(29, "grantee_count", Count, false);

    /// The column whose non-emptiness marks a row as data.
    pub const IDENTITY: ColumnSpec = PROGRAM_NAME;

    pub const ALL: &[ColumnSpec] = &[
        PROGRAM_NAME,
        PROGRAM_CODE,
        MAJOR_NAME,
        MAJOR_CODE,
        AUTHORITY_CODE,
        LAB_UNITS,
        LECTURE_UNITS,
        TUITION_PER_UNIT,
        ANNUAL_FEES,
        MALE_BY_YEAR[0],
        MALE_BY_YEAR[1],
        MALE_BY_YEAR[2],
        MALE_BY_YEAR[3],
        MALE_BY_YEAR[4],
        MALE_BY_YEAR[5],
        MALE_BY_YEAR[6],
        FEMALE_BY_YEAR[0],
        FEMALE_BY_YEAR[1],
        FEMALE_BY_YEAR[2],
        FEMALE_BY_YEAR[3],
        FEMALE_BY_YEAR[4],
        FEMALE_BY_YEAR[5],
        FEMALE_BY_YEAR[6],
        LECTURE_UNITS_ACTUAL,
        LABORATORY_UNITS_ACTUAL,
        GRADUATES_MALES,
        GRADUATES_FEMALES,
        SCHOLARSHIP_COUNT,
        GRANTEE_COUNT,
    ];
}

/// Graduates sheet: one row is one graduate.
pub mod graduate {
    use super::{ColumnSpec, FieldKind::*, col};

    pub const STUDENT_NUMBER: ColumnSpec = col(1, "student_number", Text, true);
    pub const LAST_NAME: ColumnSpec = col(2, "last_name", Text, true);
    pub const FIRST_NAME: ColumnSpec = col(3, "first_name", Text, true);
    pub const MIDDLE_NAME: ColumnSpec = col(4, "middle_name", Text, false);
    pub const SEX: ColumnSpec = col(5, "sex", Sex, true);
    pub const DATE_OF_BIRTH: ColumnSpec = col(6, "date_of_birth", Date, true);
    pub const DATE_GRADUATED: ColumnSpec = col(7, "date_graduated", Date, true);
    pub const PROGRAM_NAME: ColumnSpec = col(8, "program_name", Text, true);
    pub const MAJOR_NAME: ColumnSpec = col(9, "major_name", Text, false);
    pub const AUTHORITY_CODE: ColumnSpec = col(10, "authority_code", Text, false);
    pub const YEAR_GRANTED: ColumnSpec = col(11, "year_granted", Year, true);

    /// The column whose non-emptiness marks a row as data.
    pub const IDENTITY: ColumnSpec = STUDENT_NUMBER;

    pub const ALL: &[ColumnSpec] = &[
        STUDENT_NUMBER,
        LAST_NAME,
        FIRST_NAME,
        MIDDLE_NAME,
        SEX,
        DATE_OF_BIRTH,
        DATE_GRADUATED,
        PROGRAM_NAME,
        MAJOR_NAME,
        AUTHORITY_CODE,
        YEAR_GRANTED,
    ];
}

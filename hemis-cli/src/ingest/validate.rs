//! Validation and derivation: drafts to accepted upload units
//!
//! Derived fields are always recomputed from their components here, never
//! trusted from the sheet. Bulk rows get presence/derivation checks only;
//! fuller business rules belong to interactive single-record entry, which
//! runs upstream of this pipeline.

use super::mapper::{GraduateRowDraft, MappedRow, ProgramRowDraft};
use super::records::{EnrollmentRecord, GraduateRecord, ProgramRecord, StatisticsRecord, UploadUnit};
use super::schema::{graduate, program};

/// Check required fields for the draft's variant and compute derived
/// fields. Returns the accepted unit or the reason it was rejected (which
/// required field was missing).
pub fn validate(mapped: MappedRow, institution_id: &str) -> Result<UploadUnit, String> {
    match mapped {
        MappedRow::Program(draft) => validate_program(draft, institution_id),
        MappedRow::Graduate(draft) => validate_graduate(draft, institution_id),
    }
}

fn validate_program(draft: ProgramRowDraft, institution_id: &str) -> Result<UploadUnit, String> {
    let program_name = require(draft.program_name, program::PROGRAM_NAME.field)?;
    let program_code = require(draft.program_code, program::PROGRAM_CODE.field)?;

    let subtotal_male: i64 = draft.male_by_year.iter().sum();
    let subtotal_female: i64 = draft.female_by_year.iter().sum();

    let record = ProgramRecord {
        institution_id: institution_id.to_string(),
        category: draft.category,
        source_row: draft.source_row,
        program_name,
        program_code,
        major_name: draft.major_name,
        major_code: draft.major_code,
        authority_code: draft.authority_code,
        lab_units: draft.lab_units,
        lecture_units: draft.lecture_units,
        total_units: draft.lab_units + draft.lecture_units,
        tuition_per_unit: draft.tuition_per_unit,
        annual_fees: draft.annual_fees,
    };

    let enrollment = EnrollmentRecord {
        program_id: None,
        category: draft.category,
        source_row: draft.source_row,
        male_by_year: draft.male_by_year,
        female_by_year: draft.female_by_year,
        subtotal_male,
        subtotal_female,
        grand_total: subtotal_male + subtotal_female,
    };

    let statistics = StatisticsRecord {
        program_id: None,
        category: draft.category,
        source_row: draft.source_row,
        lecture_units_actual: draft.lecture_units_actual,
        laboratory_units_actual: draft.laboratory_units_actual,
        total_units_actual: draft.lecture_units_actual + draft.laboratory_units_actual,
        graduates_males: draft.graduates_males,
        graduates_females: draft.graduates_females,
        graduates_total: draft.graduates_males + draft.graduates_females,
        scholarship_count: draft.scholarship_count,
        grantee_count: draft.grantee_count,
    };

    Ok(UploadUnit::Program {
        program: record,
        enrollment,
        statistics,
    })
}

fn validate_graduate(draft: GraduateRowDraft, institution_id: &str) -> Result<UploadUnit, String> {
    Ok(UploadUnit::Graduate(GraduateRecord {
        institution_id: institution_id.to_string(),
        source_row: draft.source_row,
        student_number: require(draft.student_number, graduate::STUDENT_NUMBER.field)?,
        last_name: require(draft.last_name, graduate::LAST_NAME.field)?,
        first_name: require(draft.first_name, graduate::FIRST_NAME.field)?,
        middle_name: draft.middle_name,
        sex: require(draft.sex, graduate::SEX.field)?,
        date_of_birth: require(draft.date_of_birth, graduate::DATE_OF_BIRTH.field)?,
        date_graduated: require(draft.date_graduated, graduate::DATE_GRADUATED.field)?,
        program_name: require(draft.program_name, graduate::PROGRAM_NAME.field)?,
        major_name: draft.major_name,
        authority_code: draft.authority_code,
        year_granted: require(draft.year_granted, graduate::YEAR_GRANTED.field)?,
    }))
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing required field: {}", field))
}

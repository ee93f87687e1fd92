//! JSON payloads for the registry's record creation endpoints

use serde_json::{Value, json};

use crate::ingest::records::{
    EnrollmentRecord, GraduateRecord, ProgramRecord, StatisticsRecord,
};

pub fn program_payload(record: &ProgramRecord) -> Value {
    json!({
        "institution_id": record.institution_id,
        "category": record.category.label(),
        "program_name": record.program_name,
        "program_code": record.program_code,
        "major_name": record.major_name,
        "major_code": record.major_code,
        "authority_code": record.authority_code,
        "lab_units": record.lab_units,
        "lecture_units": record.lecture_units,
        "total_units": record.total_units,
        "tuition_per_unit": record.tuition_per_unit,
        "annual_fees": record.annual_fees,
    })
}

/// `program_id` is the server-assigned id of the parent program, attached
/// after the parent persists.
pub fn enrollment_payload(record: &EnrollmentRecord, program_id: Option<&str>) -> Value {
    let mut payload = json!({
        "program_id": program_id,
        "category": record.category.label(),
        "subtotal_male": record.subtotal_male,
        "subtotal_female": record.subtotal_female,
        "grand_total": record.grand_total,
    });
    for (i, count) in record.male_by_year.iter().enumerate() {
        payload[format!("enrollment_male_year{}", i + 1)] = json!(count);
    }
    for (i, count) in record.female_by_year.iter().enumerate() {
        payload[format!("enrollment_female_year{}", i + 1)] = json!(count);
    }
    payload
}

pub fn statistics_payload(record: &StatisticsRecord, program_id: Option<&str>) -> Value {
    json!({
        "program_id": program_id,
        "category": record.category.label(),
        "lecture_units_actual": record.lecture_units_actual,
        "laboratory_units_actual": record.laboratory_units_actual,
        "total_units_actual": record.total_units_actual,
        "graduates_males": record.graduates_males,
        "graduates_females": record.graduates_females,
        "graduates_total": record.graduates_total,
        "scholarship_count": record.scholarship_count,
        "grantee_count": record.grantee_count,
    })
}

pub fn graduate_payload(record: &GraduateRecord) -> Value {
    json!({
        "institution_id": record.institution_id,
        "student_number": record.student_number,
        "last_name": record.last_name,
        "first_name": record.first_name,
        "middle_name": record.middle_name,
        "sex": record.sex.code(),
        "date_of_birth": record.date_of_birth.to_string(),
        "date_graduated": record.date_graduated.to_string(),
        "program_name": record.program_name,
        "major_name": record.major_name,
        "authority_code": record.authority_code,
        "year_granted": record.year_granted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::records::UploadUnit;
    use crate::ingest::records::tests::sample_program_unit;

    fn sample_parts() -> (ProgramRecord, EnrollmentRecord, StatisticsRecord) {
        let UploadUnit::Program {
            program,
            enrollment,
            statistics,
        } = sample_program_unit(12)
        else {
            unreachable!()
        };
        (program, enrollment, statistics)
    }

    #[test]
    fn test_program_payload_carries_derived_total() {
        let (program, _, _) = sample_parts();
        let payload = program_payload(&program);
        assert_eq!(payload["program_name"], "BSCS");
        assert_eq!(payload["category"], "Baccalaureate");
        assert_eq!(payload["total_units"], 3.0);
        // Not a payload concern
        assert!(payload.get("source_row").is_none());
    }

    #[test]
    fn test_children_carry_parent_id() {
        let (_, enrollment, statistics) = sample_parts();

        let payload = enrollment_payload(&enrollment, Some("prog-9"));
        assert_eq!(payload["program_id"], "prog-9");
        assert_eq!(payload["enrollment_male_year1"], 10);
        assert_eq!(payload["enrollment_female_year7"], 0);
        assert_eq!(payload["grand_total"], 61);

        let payload = statistics_payload(&statistics, Some("prog-9"));
        assert_eq!(payload["program_id"], "prog-9");
        assert_eq!(payload["graduates_total"], 7);
    }

    #[test]
    fn test_graduate_payload_formats_dates_and_sex() {
        let record = GraduateRecord {
            institution_id: "INST-01".into(),
            source_row: 15,
            student_number: "2000-0415".into(),
            last_name: "Reyes".into(),
            first_name: "Ana".into(),
            middle_name: None,
            sex: crate::ingest::records::Sex::Female,
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1979, 2, 11).unwrap(),
            date_graduated: chrono::NaiveDate::from_ymd_opt(2000, 4, 1).unwrap(),
            program_name: "BS Biology".into(),
            major_name: None,
            authority_code: None,
            year_granted: 2000,
        };
        let payload = graduate_payload(&record);
        assert_eq!(payload["sex"], "F");
        assert_eq!(payload["date_of_birth"], "1979-02-11");
        assert_eq!(payload["date_graduated"], "2000-04-01");
        assert_eq!(payload["middle_name"], serde_json::Value::Null);
    }
}

//! Validated domain records produced by one ingestion run

use chrono::NaiveDate;

use super::category::Category;

/// Graduate sex, restricted to a closed two-value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// A degree program offering. `total_units` is always derived from the
/// lab/lecture components, never read from the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramRecord {
    pub institution_id: String,
    pub category: Category,
    /// 1-based sheet row, for error reporting only (not structural identity)
    pub source_row: usize,
    pub program_name: String,
    pub program_code: String,
    pub major_name: Option<String>,
    pub major_code: Option<String>,
    pub authority_code: Option<String>,
    pub lab_units: f64,
    pub lecture_units: f64,
    pub total_units: f64,
    pub tuition_per_unit: f64,
    pub annual_fees: f64,
}

/// Per-year-level, per-sex headcounts for one program. Subtotals and the
/// grand total are derived sums.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRecord {
    /// Server-assigned parent program id, attached after the parent persists
    pub program_id: Option<String>,
    pub category: Category,
    pub source_row: usize,
    pub male_by_year: [i64; 7],
    pub female_by_year: [i64; 7],
    pub subtotal_male: i64,
    pub subtotal_female: i64,
    pub grand_total: i64,
}

/// Actual unit loads, graduate counts and grantee counts for one program.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRecord {
    pub program_id: Option<String>,
    pub category: Category,
    pub source_row: usize,
    pub lecture_units_actual: f64,
    pub laboratory_units_actual: f64,
    pub total_units_actual: f64,
    pub graduates_males: i64,
    pub graduates_females: i64,
    pub graduates_total: i64,
    pub scholarship_count: i64,
    pub grantee_count: i64,
}

/// One graduate. Independent per row; no parent/child linkage.
#[derive(Debug, Clone, PartialEq)]
pub struct GraduateRecord {
    pub institution_id: String,
    pub source_row: usize,
    pub student_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub date_graduated: NaiveDate,
    pub program_name: String,
    pub major_name: Option<String>,
    pub authority_code: Option<String>,
    pub year_granted: i64,
}

/// Everything one accepted row submits: a program with its two related
/// records, or a single graduate.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadUnit {
    Program {
        program: ProgramRecord,
        enrollment: EnrollmentRecord,
        statistics: StatisticsRecord,
    },
    Graduate(GraduateRecord),
}

impl UploadUnit {
    /// Records this unit submits (parent plus children, or one graduate).
    pub fn record_count(&self) -> usize {
        match self {
            UploadUnit::Program { .. } => 3,
            UploadUnit::Graduate(_) => 1,
        }
    }

    pub fn source_row(&self) -> usize {
        match self {
            UploadUnit::Program { program, .. } => program.source_row,
            UploadUnit::Graduate(g) => g.source_row,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            UploadUnit::Program { program, .. } => program.category,
            UploadUnit::Graduate(_) => Category::Graduates,
        }
    }

    /// Human-readable handle for summaries and failure reports.
    pub fn label(&self) -> String {
        match self {
            UploadUnit::Program { program, .. } => format!(
                "{} program {} (row {})",
                program.category, program.program_name, program.source_row
            ),
            UploadUnit::Graduate(g) => {
                format!("graduate {} (row {})", g.student_number, g.source_row)
            }
        }
    }

    /// Canonical structural-identity key: the full ordered tuple of the
    /// unit's field values in schema order, joined with unit separators.
    /// `source_row` is deliberately excluded so identical rows at different
    /// positions deduplicate; derived fields are functions of the rest and
    /// are included for free.
    pub fn dedup_key(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        match self {
            UploadUnit::Program {
                program,
                enrollment,
                statistics,
            } => {
                parts.push(program.institution_id.clone());
                parts.push(program.category.label().to_string());
                parts.push(program.program_name.clone());
                parts.push(program.program_code.clone());
                parts.push(opt(&program.major_name));
                parts.push(opt(&program.major_code));
                parts.push(opt(&program.authority_code));
                parts.push(num(program.lab_units));
                parts.push(num(program.lecture_units));
                parts.push(num(program.tuition_per_unit));
                parts.push(num(program.annual_fees));
                for count in enrollment.male_by_year.iter().chain(&enrollment.female_by_year) {
                    parts.push(count.to_string());
                }
                parts.push(num(statistics.lecture_units_actual));
                parts.push(num(statistics.laboratory_units_actual));
                parts.push(statistics.graduates_males.to_string());
                parts.push(statistics.graduates_females.to_string());
                parts.push(statistics.scholarship_count.to_string());
                parts.push(statistics.grantee_count.to_string());
            }
            UploadUnit::Graduate(g) => {
                parts.push(g.institution_id.clone());
                parts.push(Category::Graduates.label().to_string());
                parts.push(g.student_number.clone());
                parts.push(g.last_name.clone());
                parts.push(g.first_name.clone());
                parts.push(opt(&g.middle_name));
                parts.push(g.sex.code().to_string());
                parts.push(g.date_of_birth.to_string());
                parts.push(g.date_graduated.to_string());
                parts.push(g.program_name.clone());
                parts.push(opt(&g.major_name));
                parts.push(opt(&g.authority_code));
                parts.push(g.year_granted.to_string());
            }
        }
        parts.join("\u{1f}")
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Canonical numeric rendering: integral floats render without a fraction so
/// the identity key does not depend on how the sheet stored the number.
fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_program_unit(source_row: usize) -> UploadUnit {
        let category = Category::Baccalaureate;
        UploadUnit::Program {
            program: ProgramRecord {
                institution_id: "INST-01".into(),
                category,
                source_row,
                program_name: "BSCS".into(),
                program_code: "CS01".into(),
                major_name: Some("Major A".into()),
                major_code: Some("M01".into()),
                authority_code: None,
                lab_units: 1.0,
                lecture_units: 2.0,
                total_units: 3.0,
                tuition_per_unit: 450.0,
                annual_fees: 1500.0,
            },
            enrollment: EnrollmentRecord {
                program_id: None,
                category,
                source_row,
                male_by_year: [10, 8, 6, 4, 0, 0, 0],
                female_by_year: [12, 9, 7, 5, 0, 0, 0],
                subtotal_male: 28,
                subtotal_female: 33,
                grand_total: 61,
            },
            statistics: StatisticsRecord {
                program_id: None,
                category,
                source_row,
                lecture_units_actual: 2.0,
                laboratory_units_actual: 1.0,
                total_units_actual: 3.0,
                graduates_males: 3,
                graduates_females: 4,
                graduates_total: 7,
                scholarship_count: 2,
                grantee_count: 1,
            },
        }
    }

    #[test]
    fn test_dedup_key_ignores_source_row() {
        let a = sample_program_unit(12);
        let b = sample_program_unit(30);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_sensitive_to_field_values() {
        let a = sample_program_unit(12);
        let mut b = sample_program_unit(12);
        if let UploadUnit::Program { enrollment, .. } = &mut b {
            enrollment.female_by_year[2] += 1;
        }
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_numeric_rendering_is_stable() {
        let a = sample_program_unit(1);
        let mut b = sample_program_unit(1);
        if let UploadUnit::Program { program, .. } = &mut b {
            // Same value, different float provenance
            program.tuition_per_unit = 450.0_f64 + 0.0;
        }
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert!(a.dedup_key().contains("450"));
        assert!(!a.dedup_key().contains("450.0"));
    }

    #[test]
    fn test_labels_name_row_and_identity() {
        let unit = sample_program_unit(12);
        assert_eq!(unit.label(), "Baccalaureate program BSCS (row 12)");
        assert_eq!(unit.record_count(), 3);
    }
}

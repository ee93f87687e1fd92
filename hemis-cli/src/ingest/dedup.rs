//! Run-scoped structural deduplication of upload units

use std::collections::HashSet;

use super::records::UploadUnit;

/// Tracks the canonical identity keys seen during one ingestion run.
/// Scoped to a single run; a fresh run starts with an empty set.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the unit's identity. Returns true if the unit is new to this
    /// run, false if a structurally identical unit was already seen.
    pub fn insert(&mut self, unit: &UploadUnit) -> bool {
        self.seen.insert(unit.dedup_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::records::tests::sample_program_unit;

    #[test]
    fn test_first_occurrence_kept_duplicate_dropped() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.insert(&sample_program_unit(12)));
        // Same fields at another row position: structural duplicate
        assert!(!dedup.insert(&sample_program_unit(30)));
    }

    #[test]
    fn test_differing_units_both_kept() {
        let mut dedup = Deduplicator::new();
        let a = sample_program_unit(12);
        let mut b = sample_program_unit(13);
        if let UploadUnit::Program { program, .. } = &mut b {
            program.program_code = "CS02".into();
        }
        assert!(dedup.insert(&a));
        assert!(dedup.insert(&b));
    }

    #[test]
    fn test_fresh_run_forgets_prior_identities() {
        let unit = sample_program_unit(12);
        let mut first_run = Deduplicator::new();
        assert!(first_run.insert(&unit));

        let mut second_run = Deduplicator::new();
        assert!(second_run.insert(&unit));
    }
}

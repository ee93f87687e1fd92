//! Batch submission of upload units to the registry
//!
//! Units go out in extraction order. Within a program unit the parent is
//! always created before its enrollment/statistics children so the children
//! can carry the server-assigned program id. Per-record rejections are
//! collected and the run continues; a transport failure aborts the run.

pub mod payload;

use anyhow::Result;
use futures::{StreamExt, stream};
use log::warn;
use serde::Serialize;

use crate::api::{CreateOutcome, RecordStore, RecordType};
use crate::ingest::records::UploadUnit;

/// Knobs for one submission pass.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Units submitted concurrently. 1 (the default) is strictly
    /// sequential; higher values overlap whole units, never the records
    /// inside one.
    pub max_in_flight: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self { max_in_flight: 1 }
    }
}

/// One record the registry rejected.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub record: String,
    pub reason: String,
}

/// Terminal result of one ingestion run.
///
/// `accepted`/`skipped` count row units; `failed` counts individual
/// rejected records, matching the `failures` list.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub accepted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<Failure>,
}

struct UnitOutcome {
    accepted: bool,
    failures: Vec<Failure>,
    record_count: usize,
}

pub struct BatchUploader<'a> {
    store: &'a dyn RecordStore,
    options: UploadOptions,
}

impl<'a> BatchUploader<'a> {
    pub fn new(store: &'a dyn RecordStore, options: UploadOptions) -> Self {
        Self { store, options }
    }

    /// Submit every unit, in order, reporting whole-percentage progress
    /// after each unit completes. Progress is weighted by record count, so
    /// a program unit moves the bar three times as far as a graduate.
    ///
    /// `Err` means the registry became unreachable; everything submitted
    /// before that point stays submitted.
    pub async fn submit_all<F>(&self, units: Vec<UploadUnit>, mut on_progress: F) -> Result<RunSummary>
    where
        F: FnMut(u8),
    {
        let total_records: usize = units.iter().map(UploadUnit::record_count).sum();
        let mut summary = RunSummary::default();

        on_progress(0);
        if total_records == 0 {
            on_progress(100);
            return Ok(summary);
        }

        let concurrency = self.options.max_in_flight.max(1);
        let mut outcomes =
            stream::iter(units.into_iter().map(|unit| self.submit_unit(unit))).buffered(concurrency);

        let mut completed_records = 0usize;
        while let Some(outcome) = outcomes.next().await {
            let outcome = outcome?;
            completed_records += outcome.record_count;
            if outcome.accepted {
                summary.accepted += 1;
            }
            summary.failed += outcome.failures.len();
            summary.failures.extend(outcome.failures);
            on_progress((completed_records * 100 / total_records) as u8);
        }

        Ok(summary)
    }

    async fn submit_unit(&self, unit: UploadUnit) -> Result<UnitOutcome> {
        let record_count = unit.record_count();
        let label = unit.label();
        let mut failures = Vec::new();

        let accepted = match unit {
            UploadUnit::Program {
                program,
                enrollment,
                statistics,
            } => {
                let outcome = self
                    .store
                    .create(RecordType::Program, payload::program_payload(&program))
                    .await?;
                match outcome {
                    CreateOutcome::Created { id } => {
                        let program_id = id.as_deref();
                        self.submit_child(
                            RecordType::Enrollment,
                            payload::enrollment_payload(&enrollment, program_id),
                            &label,
                            &mut failures,
                        )
                        .await?;
                        self.submit_child(
                            RecordType::Statistics,
                            payload::statistics_payload(&statistics, program_id),
                            &label,
                            &mut failures,
                        )
                        .await?;
                        true
                    }
                    CreateOutcome::Rejected { reason } => {
                        warn!("{} rejected: {}", label, reason);
                        failures.push(Failure {
                            record: label.clone(),
                            reason,
                        });
                        // Children have nothing to attach to
                        for child in [RecordType::Enrollment, RecordType::Statistics] {
                            failures.push(Failure {
                                record: format!("{} for {}", child.label(), label),
                                reason: "parent program rejected, record not submitted".to_string(),
                            });
                        }
                        false
                    }
                }
            }
            UploadUnit::Graduate(graduate) => {
                let outcome = self
                    .store
                    .create(RecordType::Graduate, payload::graduate_payload(&graduate))
                    .await?;
                match outcome {
                    CreateOutcome::Created { .. } => true,
                    CreateOutcome::Rejected { reason } => {
                        warn!("{} rejected: {}", label, reason);
                        failures.push(Failure {
                            record: label.clone(),
                            reason,
                        });
                        false
                    }
                }
            }
        };

        Ok(UnitOutcome {
            accepted,
            failures,
            record_count,
        })
    }

    async fn submit_child(
        &self,
        record_type: RecordType,
        payload: serde_json::Value,
        parent_label: &str,
        failures: &mut Vec<Failure>,
    ) -> Result<()> {
        match self.store.create(record_type, payload).await? {
            CreateOutcome::Created { .. } => {}
            CreateOutcome::Rejected { reason } => {
                warn!("{} for {} rejected: {}", record_type.label(), parent_label, reason);
                failures.push(Failure {
                    record: format!("{} for {}", record_type.label(), parent_label),
                    reason,
                });
            }
        }
        Ok(())
    }
}

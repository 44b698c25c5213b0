//! Merge stage: concatenates per-source outputs into one silver dataset.

use std::collections::HashSet;

use tracing::{error, info};

use silver_model::{OrgId, SilverRecord, SourceId, ValidationFinding};

use crate::engine::{BatchOutput, BatchStats};
use crate::error::{ReconError, Result};

/// Row accounting for one source in a merged run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: SourceId,
    pub org_id: OrgId,
    pub stats: BatchStats,
}

/// Silver records and findings from every source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedOutput {
    pub records: Vec<SilverRecord>,
    pub findings: Vec<ValidationFinding>,
    pub sources: Vec<SourceSummary>,
}

impl MergedOutput {
    pub fn input_rows(&self) -> usize {
        self.sources.iter().map(|s| s.stats.input_rows).sum()
    }

    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn rejected(&self) -> usize {
        self.sources.iter().map(|s| s.stats.rejected).sum()
    }

    /// Findings that excluded their row from the output.
    pub fn rejections(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|finding| finding.is_rejection())
    }
}

/// Concatenate batch outputs without deduplicating across sources.
///
/// The same `patient_id` from two sources yields two records told apart by
/// `org_id`. A repeated `(org_id, patient_id)` pair means an upstream stage
/// broke its invariants and is reported as a fatal error.
pub fn merge(batches: Vec<BatchOutput>) -> Result<MergedOutput> {
    let mut merged = MergedOutput::default();
    let mut keys: HashSet<(String, String)> = HashSet::new();

    for batch in batches {
        for record in &batch.records {
            let (org_id, patient_id) = record.provenance_key();
            if !keys.insert((org_id.to_string(), patient_id.to_string())) {
                error!(source = %batch.source, org_id, "duplicate provenance key in merge");
                return Err(ReconError::DuplicateProvenance {
                    org_id: batch.org_id.clone(),
                    patient_id: patient_id.to_string(),
                    source_id: batch.source.clone(),
                });
            }
        }
        merged.sources.push(SourceSummary {
            source: batch.source,
            org_id: batch.org_id,
            stats: batch.stats,
        });
        merged.records.extend(batch.records);
        merged.findings.extend(batch.findings);
    }

    info!(
        sources = merged.sources.len(),
        records = merged.records.len(),
        findings = merged.findings.len(),
        "merged silver output"
    );
    Ok(merged)
}

//! Per-source reconciliation.
//!
//! The engine never branches on which source it is reading: everything
//! source-specific comes from the [`SourceAdapter`].

use tracing::{info, info_span, trace};

use silver_map::SourceAdapter;
use silver_model::{
    CandidateRecord, OrgId, RawRow, SilverRecord, SourceId, TargetField, ValidationFinding,
};
use silver_normalize::{
    DobRules, Normalized, normalize_date_of_birth, normalize_enrollment_status, normalize_gender,
    normalize_identifier, normalize_name, normalize_phone,
};
use silver_validate::{BatchValidator, Verdict};

use crate::options::ReconcileOptions;

/// Row accounting for one batch. `accepted + rejected == input_rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub input_rows: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Findings that did not reject their row.
    pub warnings: usize,
}

impl BatchStats {
    pub fn is_balanced(&self) -> bool {
        self.accepted + self.rejected == self.input_rows
    }
}

/// Result of reconciling one source batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub source: SourceId,
    pub org_id: OrgId,
    /// Accepted records in input order.
    pub records: Vec<SilverRecord>,
    /// Findings ordered by row, then by field.
    pub findings: Vec<ValidationFinding>,
    pub stats: BatchStats,
}

/// Reconcile one source's bronze rows into silver records and findings.
///
/// Rows are processed in order; the first row with a given `patient_id` wins.
pub fn reconcile_batch(
    adapter: &SourceAdapter,
    rows: &[RawRow],
    options: &ReconcileOptions,
) -> BatchOutput {
    let span = info_span!("reconcile_batch", source = %adapter.source);
    let _guard = span.enter();

    let rules = options.dob_rules();
    let mut validator = BatchValidator::new(adapter.source.clone(), options.policy);
    let mut output = BatchOutput {
        source: adapter.source.clone(),
        org_id: adapter.org_id.clone(),
        records: Vec::new(),
        findings: Vec::new(),
        stats: BatchStats {
            input_rows: rows.len(),
            ..BatchStats::default()
        },
    };

    for (row_idx, row) in rows.iter().enumerate() {
        let (candidate, mut findings) = normalize_row(adapter, row_idx, row, &rules);
        match validator.validate(candidate, &mut findings) {
            Verdict::Accepted(record) => {
                output.records.push(record);
                output.stats.accepted += 1;
            }
            Verdict::Rejected(_) => output.stats.rejected += 1,
        }
        output.stats.warnings += findings.iter().filter(|f| !f.is_rejection()).count();
        output.findings.append(&mut findings);
    }

    info!(
        input_rows = output.stats.input_rows,
        accepted = output.stats.accepted,
        rejected = output.stats.rejected,
        warnings = output.stats.warnings,
        "batch reconciled"
    );
    output
}

/// Collects the findings raised while normalizing one row.
struct RowScope<'a> {
    adapter: &'a SourceAdapter,
    raw: &'a RawRow,
    row: usize,
    findings: Vec<ValidationFinding>,
}

impl RowScope<'_> {
    fn field<T>(
        &mut self,
        field: TargetField,
        normalize: impl FnOnce(&str) -> Normalized<T>,
    ) -> T {
        let raw = self.adapter.resolve(self.raw, field);
        let normalized = normalize(raw);
        if let Some(reason) = normalized.reason {
            trace!(row = self.row, field = %field, reason = %reason, "field finding");
            self.findings.push(ValidationFinding::warning(
                self.adapter.source.clone(),
                self.row,
                field,
                reason,
                raw,
            ));
        }
        normalized.value
    }
}

/// Resolve and normalize every target field of one row.
///
/// Findings come back in silver column order, all at warning severity.
fn normalize_row(
    adapter: &SourceAdapter,
    row_idx: usize,
    raw: &RawRow,
    rules: &DobRules,
) -> (CandidateRecord, Vec<ValidationFinding>) {
    let mut scope = RowScope {
        adapter,
        raw,
        row: row_idx,
        findings: Vec::new(),
    };
    let candidate = CandidateRecord {
        row: row_idx,
        raw_patient_id: adapter.resolve(raw, TargetField::PatientId).to_string(),
        patient_id: scope.field(TargetField::PatientId, normalize_identifier),
        first_name: scope.field(TargetField::FirstName, normalize_name),
        last_name: scope.field(TargetField::LastName, normalize_name),
        date_of_birth: scope.field(TargetField::DateOfBirth, |value| {
            normalize_date_of_birth(value, adapter.date_formats.as_slice(), rules)
        }),
        gender: scope.field(TargetField::Gender, |value| {
            normalize_gender(value, &adapter.gender)
        }),
        enrollment_status: scope.field(TargetField::EnrollmentStatus, |value| {
            normalize_enrollment_status(value, &adapter.enrollment_status)
        }),
        phone: scope.field(TargetField::Phone, normalize_phone),
        org_id: adapter.org_id.to_string(),
    };
    (candidate, scope.findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use silver_map::ColumnMap;
    use silver_model::{EnrollmentStatus, FindingField, Gender, ReasonCode, Severity};

    fn options() -> ReconcileOptions {
        ReconcileOptions::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn adapter() -> SourceAdapter {
        SourceAdapter::new(
            SourceId::new("springfield").unwrap(),
            OrgId::new("springfield").unwrap(),
            ColumnMap::identity(),
        )
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    fn clean(patient_id: &str) -> RawRow {
        row(&[
            ("patient_id", patient_id),
            ("first_name", " Maria "),
            ("last_name", "Gonzalez"),
            ("date_of_birth", "03/15/1948"),
            ("gender", "female"),
            ("enrollment_status", "active"),
            ("phone", "(217) 555-0101"),
        ])
    }

    #[test]
    fn clean_row_is_fully_normalized() {
        let output = reconcile_batch(&adapter(), &[clean("10001")], &options());
        assert!(output.findings.is_empty());
        assert_eq!(output.records.len(), 1);
        let record = &output.records[0];
        assert_eq!(record.first_name, "Maria");
        assert_eq!(record.date_of_birth, "1948-03-15");
        assert_eq!(record.gender, Gender::F);
        assert_eq!(record.enrollment_status, EnrollmentStatus::Active);
        assert_eq!(record.phone, "2175550101");
        assert_eq!(record.org_id, "springfield");
    }

    #[test]
    fn findings_follow_field_order() {
        let mut raw = clean("10001");
        raw.insert("gender", "");
        raw.insert("phone", "555-01");
        raw.insert("date_of_birth", "sometime");
        let output = reconcile_batch(&adapter(), &[raw], &options());
        let fields: Vec<_> = output.findings.iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![
                FindingField::Target(TargetField::DateOfBirth),
                FindingField::Target(TargetField::Gender),
                FindingField::Target(TargetField::Phone),
            ]
        );
        assert_eq!(output.findings[0].raw_value, "sometime");
        assert_eq!(output.stats.warnings, 3);
        assert_eq!(output.stats.accepted, 1);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let raw = row(&[("patient_id", "10001")]);
        let output = reconcile_batch(&adapter(), &[raw], &options());
        assert!(output.records.is_empty());
        let rejection = output
            .findings
            .iter()
            .find(|f| f.severity == Severity::Reject)
            .unwrap();
        assert_eq!(rejection.reason, ReasonCode::MissingRequiredField);
        assert_eq!(rejection.raw_value, "10001");
    }

    #[test]
    fn stats_balance() {
        let mut bad = clean("10002");
        bad.insert("enrollment_status", "Pending");
        let rows = [clean("10001"), bad, clean("10001")];
        let output = reconcile_batch(&adapter(), &rows, &options());
        assert_eq!(output.stats.input_rows, 3);
        assert_eq!(output.stats.accepted, 1);
        assert_eq!(output.stats.rejected, 2);
        assert!(output.stats.is_balanced());
    }
}

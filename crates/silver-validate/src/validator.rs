use std::collections::HashSet;

use tracing::debug;

use silver_model::{
    CandidateRecord, FindingField, ReasonCode, Severity, SilverRecord, SourceId, TargetField,
    ValidationFinding,
};

use crate::policy::{FieldPolicy, ValidationPolicy};

/// Text fields that must be non-empty for a record to be usable.
const REQUIRED_TEXT_FIELDS: [TargetField; 3] = [
    TargetField::PatientId,
    TargetField::FirstName,
    TargetField::LastName,
];

/// Fields whose findings only reject under an escalating policy.
const SOFT_FIELDS: [TargetField; 2] = [TargetField::DateOfBirth, TargetField::Phone];

/// Decision for one candidate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(SilverRecord),
    Rejected(ReasonCode),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

/// Validator for one source batch.
///
/// Holds the set of patient ids accepted so far, so one instance must be used
/// per batch and fed rows in batch order.
pub struct BatchValidator {
    source: SourceId,
    policy: ValidationPolicy,
    seen: HashSet<String>,
}

impl BatchValidator {
    pub fn new(source: SourceId, policy: ValidationPolicy) -> Self {
        Self {
            source,
            policy,
            seen: HashSet::new(),
        }
    }

    /// Apply the acceptance rules to one candidate.
    ///
    /// `findings` holds the normalizer findings already raised for this row.
    /// On rejection exactly one of them ends up with [`Severity::Reject`],
    /// either by promotion of an existing finding or by a new record-level one.
    pub fn validate(
        &mut self,
        candidate: CandidateRecord,
        findings: &mut Vec<ValidationFinding>,
    ) -> Verdict {
        let row = candidate.row;

        if REQUIRED_TEXT_FIELDS
            .iter()
            .any(|field| candidate.text(*field).is_empty())
        {
            return self.reject(
                findings,
                row,
                FindingField::Record,
                ReasonCode::MissingRequiredField,
                &candidate.raw_patient_id,
            );
        }

        let raw_patient_id = candidate.raw_patient_id.clone();
        let Some(record) = candidate.into_record() else {
            return self.escalate(
                findings,
                row,
                TargetField::EnrollmentStatus,
                ReasonCode::MissingStatus,
            );
        };

        if self.seen.contains(&record.patient_id) {
            return self.reject(
                findings,
                row,
                FindingField::Target(TargetField::PatientId),
                ReasonCode::DuplicatePatientId,
                &raw_patient_id,
            );
        }

        for field in SOFT_FIELDS {
            if self.policy.for_field(field) == FieldPolicy::Reject
                && let Some(reason) = open_warning(findings, field)
            {
                return self.escalate(findings, row, field, reason);
            }
        }

        self.seen.insert(record.patient_id.clone());
        Verdict::Accepted(record)
    }

    fn reject(
        &self,
        findings: &mut Vec<ValidationFinding>,
        row: usize,
        field: FindingField,
        reason: ReasonCode,
        raw_value: &str,
    ) -> Verdict {
        debug!(source = %self.source, row, field = %field, reason = %reason, "row rejected");
        findings.push(ValidationFinding::reject(
            self.source.clone(),
            row,
            field,
            reason,
            raw_value,
        ));
        Verdict::Rejected(reason)
    }

    /// Promote the field's existing finding to the rejection reason.
    fn escalate(
        &self,
        findings: &mut Vec<ValidationFinding>,
        row: usize,
        field: TargetField,
        fallback: ReasonCode,
    ) -> Verdict {
        let target = FindingField::Target(field);
        match findings
            .iter_mut()
            .rev()
            .find(|finding| finding.field == target && finding.severity == Severity::Warning)
        {
            Some(finding) => {
                finding.severity = Severity::Reject;
                let reason = finding.reason;
                debug!(source = %self.source, row, field = %field, reason = %reason, "row rejected");
                Verdict::Rejected(reason)
            }
            None => self.reject(findings, row, target, fallback, ""),
        }
    }
}

fn open_warning(findings: &[ValidationFinding], field: TargetField) -> Option<ReasonCode> {
    let target = FindingField::Target(field);
    findings
        .iter()
        .find(|finding| finding.field == target && finding.severity == Severity::Warning)
        .map(|finding| finding.reason)
}

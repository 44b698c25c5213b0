use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::enums::TargetField;
use crate::ids::SourceId;

/// What a finding is about: one mapped field or the record as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FindingField {
    Target(TargetField),
    Record,
}

impl FindingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingField::Target(field) => field.as_str(),
            FindingField::Record => "record",
        }
    }
}

impl From<TargetField> for FindingField {
    fn from(field: TargetField) -> Self {
        FindingField::Target(field)
    }
}

impl fmt::Display for FindingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("record") {
            return Ok(FindingField::Record);
        }
        s.parse::<TargetField>().map(FindingField::Target)
    }
}

impl Serialize for FindingField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FindingField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Machine-readable reason attached to every finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    MissingId,
    MissingName,
    UnparseableDob,
    GenderDefaulted,
    GenderUnmapped,
    UnknownStatus,
    MissingStatus,
    InvalidPhone,
    MissingRequiredField,
    DuplicatePatientId,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::MissingId => "missing_id",
            ReasonCode::MissingName => "missing_name",
            ReasonCode::UnparseableDob => "unparseable_dob",
            ReasonCode::GenderDefaulted => "gender_defaulted",
            ReasonCode::GenderUnmapped => "gender_unmapped",
            ReasonCode::UnknownStatus => "unknown_status",
            ReasonCode::MissingStatus => "missing_status",
            ReasonCode::InvalidPhone => "invalid_phone",
            ReasonCode::MissingRequiredField => "missing_required_field",
            ReasonCode::DuplicatePatientId => "duplicate_patient_id",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Quality signal only; the record is still emitted.
    Warning,
    /// The single reason the row was excluded from output.
    Reject,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Reject => "reject",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data-quality anomaly detected while reconciling one bronze row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub source: SourceId,
    /// Zero-based row index within the source batch, header excluded.
    pub row: usize,
    pub field: FindingField,
    pub reason: ReasonCode,
    pub raw_value: String,
    pub severity: Severity,
}

impl ValidationFinding {
    pub fn warning(
        source: SourceId,
        row: usize,
        field: impl Into<FindingField>,
        reason: ReasonCode,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            source,
            row,
            field: field.into(),
            reason,
            raw_value: raw_value.into(),
            severity: Severity::Warning,
        }
    }

    pub fn reject(
        source: SourceId,
        row: usize,
        field: impl Into<FindingField>,
        reason: ReasonCode,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Reject,
            ..Self::warning(source, row, field, reason, raw_value)
        }
    }

    pub fn is_rejection(&self) -> bool {
        self.severity == Severity::Reject
    }
}

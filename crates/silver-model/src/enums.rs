//! Closed enumerations of the silver schema.
//!
//! Every value a silver record may carry for `gender` and
//! `enrollment_status` is a variant here, so the set of valid outputs is
//! enumerable (`ALL`) and can be tested exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative gender as published in the silver schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::M, Gender::F, Gender::Other];

    /// Returns the canonical output spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Parse a canonical gender spelling (case-insensitive).
    ///
    /// Source-specific spellings such as `Male` are synonyms and are resolved
    /// by the normalizer's synonym table, not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            "OTHER" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {s}")),
        }
    }
}

/// Program enrollment status of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Prospect,
    Deceased,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 4] = [
        EnrollmentStatus::Active,
        EnrollmentStatus::Inactive,
        EnrollmentStatus::Prospect,
        EnrollmentStatus::Deceased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "Active",
            EnrollmentStatus::Inactive => "Inactive",
            EnrollmentStatus::Prospect => "Prospect",
            EnrollmentStatus::Deceased => "Deceased",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(EnrollmentStatus::Active),
            "INACTIVE" => Ok(EnrollmentStatus::Inactive),
            "PROSPECT" => Ok(EnrollmentStatus::Prospect),
            "DECEASED" => Ok(EnrollmentStatus::Deceased),
            _ => Err(format!("Unknown enrollment status: {s}")),
        }
    }
}

/// A silver field fed from a source column.
///
/// `org_id` is not listed: it is stamped from adapter configuration and never
/// read from source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    PatientId,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    EnrollmentStatus,
    Phone,
}

impl TargetField {
    /// All mapped fields in silver column order.
    pub const ALL: [TargetField; 7] = [
        TargetField::PatientId,
        TargetField::FirstName,
        TargetField::LastName,
        TargetField::DateOfBirth,
        TargetField::Gender,
        TargetField::EnrollmentStatus,
        TargetField::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::PatientId => "patient_id",
            TargetField::FirstName => "first_name",
            TargetField::LastName => "last_name",
            TargetField::DateOfBirth => "date_of_birth",
            TargetField::Gender => "gender",
            TargetField::EnrollmentStatus => "enrollment_status",
            TargetField::Phone => "phone",
        }
    }

    /// Fields whose absence rejects the record.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            TargetField::PatientId
                | TargetField::FirstName
                | TargetField::LastName
                | TargetField::EnrollmentStatus
        )
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TargetField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| format!("Unknown target field: {s}"))
    }
}

/// Result classification of one field normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The raw value was converted to its canonical form.
    Ok,
    /// The raw value was replaced by a safe default.
    Defaulted,
    /// The raw value has no valid canonical form.
    Invalid,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

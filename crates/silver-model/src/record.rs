//! Silver records and the pre-validation candidate they are built from.

use serde::{Deserialize, Serialize};

use crate::enums::{EnrollmentStatus, Gender, TargetField};

/// Silver output columns in published order.
pub const SILVER_COLUMNS: [&str; 8] = [
    "patient_id",
    "first_name",
    "last_name",
    "date_of_birth",
    "gender",
    "enrollment_status",
    "phone",
    "org_id",
];

/// A schema-conformant, validated patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverRecord {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`, or empty when the source value was rejected.
    pub date_of_birth: String,
    pub gender: Gender,
    pub enrollment_status: EnrollmentStatus,
    /// Ten digits, or empty.
    pub phone: String,
    pub org_id: String,
}

impl SilverRecord {
    /// Field values in [`SILVER_COLUMNS`] order.
    pub fn values(&self) -> [&str; 8] {
        [
            self.patient_id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.date_of_birth.as_str(),
            self.gender.as_str(),
            self.enrollment_status.as_str(),
            self.phone.as_str(),
            self.org_id.as_str(),
        ]
    }

    pub fn provenance_key(&self) -> (&str, &str) {
        (self.org_id.as_str(), self.patient_id.as_str())
    }
}

/// Normalized fields of one row awaiting the validator.
///
/// `enrollment_status` is `None` when the normalizer could not resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub row: usize,
    pub raw_patient_id: String,
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub enrollment_status: Option<EnrollmentStatus>,
    pub phone: String,
    pub org_id: String,
}

impl CandidateRecord {
    /// Text of a mapped field as it stands after normalization.
    pub fn text(&self, field: TargetField) -> &str {
        match field {
            TargetField::PatientId => self.patient_id.as_str(),
            TargetField::FirstName => self.first_name.as_str(),
            TargetField::LastName => self.last_name.as_str(),
            TargetField::DateOfBirth => self.date_of_birth.as_str(),
            TargetField::Gender => self.gender.as_str(),
            TargetField::EnrollmentStatus => self
                .enrollment_status
                .as_ref()
                .map(EnrollmentStatus::as_str)
                .unwrap_or(""),
            TargetField::Phone => self.phone.as_str(),
        }
    }

    /// Converts into a silver record; `None` while the status is unresolved.
    pub fn into_record(self) -> Option<SilverRecord> {
        let enrollment_status = self.enrollment_status?;
        Some(SilverRecord {
            patient_id: self.patient_id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            enrollment_status,
            phone: self.phone,
            org_id: self.org_id,
        })
    }
}

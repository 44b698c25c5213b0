//! Escalation policy for soft-quality fields.

use serde::{Deserialize, Serialize};

use silver_model::TargetField;

/// What a normalizer finding on a soft field does to its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Keep the record and report the finding.
    #[default]
    Warn,
    /// Reject the record with the finding as its reason.
    Reject,
}

/// Per-field escalation switches applied after the mandatory rules.
///
/// Gender is deliberately absent: its domain is total, so a gender finding
/// never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationPolicy {
    #[serde(default)]
    pub date_of_birth: FieldPolicy,
    #[serde(default)]
    pub phone: FieldPolicy,
}

impl ValidationPolicy {
    /// Reject rows with an unusable birth date or phone number.
    pub fn strict() -> Self {
        Self {
            date_of_birth: FieldPolicy::Reject,
            phone: FieldPolicy::Reject,
        }
    }

    #[must_use]
    pub fn with_date_of_birth(mut self, policy: FieldPolicy) -> Self {
        self.date_of_birth = policy;
        self
    }

    #[must_use]
    pub fn with_phone(mut self, policy: FieldPolicy) -> Self {
        self.phone = policy;
        self
    }

    pub fn for_field(&self, field: TargetField) -> FieldPolicy {
        match field {
            TargetField::DateOfBirth => self.date_of_birth,
            TargetField::Phone => self.phone,
            _ => FieldPolicy::Warn,
        }
    }
}

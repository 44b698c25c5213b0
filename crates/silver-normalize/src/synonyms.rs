//! Closed-enumeration normalization through synonym tables.
//!
//! Each source may spell gender and enrollment status its own way
//! (`Male`, `m`, `ENROLLED`, ...). A [`SynonymTable`] maps those spellings to
//! the closed silver enumerations. Lookup is case-insensitive and ignores
//! surrounding whitespace.
//!
//! The mapping functions are total:
//!
//! | input                | gender                          | enrollment status              |
//! |----------------------|---------------------------------|--------------------------------|
//! | known synonym        | mapped value, `Ok`              | mapped value, `Ok`             |
//! | unknown, non-empty   | `Other`, `Defaulted`            | none, `Invalid` unknown_status |
//! | empty                | `Other`, `Defaulted`            | none, `Invalid` missing_status |

use std::collections::BTreeMap;

use silver_model::{EnrollmentStatus, Gender, ReasonCode};

use crate::outcome::Normalized;

/// Lookup key for a synonym: trimmed and lowercased.
pub fn synonym_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive mapping from source spellings to a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for SynonymTable<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Copy> SynonymTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a synonym. Blank synonyms are ignored.
    pub fn insert(&mut self, synonym: &str, value: T) {
        let key = synonym_key(synonym);
        if key.is_empty() {
            return;
        }
        self.entries.insert(key, value);
    }

    #[must_use]
    pub fn with(mut self, synonym: &str, value: T) -> Self {
        self.insert(synonym, value);
        self
    }

    pub fn lookup(&self, raw: &str) -> Option<T> {
        self.entries.get(&synonym_key(raw)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Synonyms (lowercased) and their values, ordered by synonym.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// Built-in gender spellings every source understands.
pub fn default_gender_synonyms() -> SynonymTable<Gender> {
    SynonymTable::new()
        .with("M", Gender::M)
        .with("Male", Gender::M)
        .with("F", Gender::F)
        .with("Female", Gender::F)
        .with("Other", Gender::Other)
}

/// The four canonical status names, matched case-insensitively.
pub fn default_status_synonyms() -> SynonymTable<EnrollmentStatus> {
    EnrollmentStatus::ALL
        .into_iter()
        .fold(SynonymTable::new(), |table, status| {
            table.with(status.as_str(), status)
        })
}

/// Resolves a raw gender value; never fails.
pub fn normalize_gender(raw: &str, synonyms: &SynonymTable<Gender>) -> Normalized<Gender> {
    if raw.trim().is_empty() {
        return Normalized::defaulted(Gender::Other, ReasonCode::GenderDefaulted);
    }
    match synonyms.lookup(raw) {
        Some(gender) => Normalized::ok(gender),
        None => Normalized::defaulted(Gender::Other, ReasonCode::GenderUnmapped),
    }
}

/// Resolves a raw enrollment status; `None` means the record cannot be used.
pub fn normalize_enrollment_status(
    raw: &str,
    synonyms: &SynonymTable<EnrollmentStatus>,
) -> Normalized<Option<EnrollmentStatus>> {
    if raw.trim().is_empty() {
        return Normalized::invalid(None, ReasonCode::MissingStatus);
    }
    match synonyms.lookup(raw) {
        Some(status) => Normalized::ok(Some(status)),
        None => Normalized::invalid(None, ReasonCode::UnknownStatus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silver_model::Outcome;

    #[test]
    fn builtin_gender_spellings() {
        let table = default_gender_synonyms();
        assert_eq!(normalize_gender("m", &table).value, Gender::M);
        assert_eq!(normalize_gender(" FEMALE ", &table).value, Gender::F);
        assert_eq!(normalize_gender("other", &table), Normalized::ok(Gender::Other));
    }

    #[test]
    fn source_specific_gender_synonym() {
        let table = SynonymTable::new().with("Female", Gender::F);
        assert_eq!(normalize_gender("Female", &table), Normalized::ok(Gender::F));
    }

    #[test]
    fn empty_gender_defaults_to_other() {
        let result = normalize_gender("", &default_gender_synonyms());
        assert_eq!(result.value, Gender::Other);
        assert_eq!(result.outcome, Outcome::Defaulted);
        assert_eq!(result.reason, Some(ReasonCode::GenderDefaulted));
    }

    #[test]
    fn unmapped_gender_falls_through_to_other() {
        let result = normalize_gender("Nonbinary", &default_gender_synonyms());
        assert_eq!(result.value, Gender::Other);
        assert_eq!(result.outcome, Outcome::Defaulted);
        assert_eq!(result.reason, Some(ReasonCode::GenderUnmapped));
    }

    #[test]
    fn status_canonical_names_any_case() {
        let table = default_status_synonyms();
        assert_eq!(table.len(), 4);
        assert_eq!(
            normalize_enrollment_status("inactive", &table).value,
            Some(EnrollmentStatus::Inactive)
        );
        assert_eq!(
            normalize_enrollment_status("DECEASED", &table).value,
            Some(EnrollmentStatus::Deceased)
        );
    }

    #[test]
    fn status_synonym_and_failures() {
        let table = default_status_synonyms().with("Enrolled", EnrollmentStatus::Active);
        assert_eq!(
            normalize_enrollment_status("enrolled", &table),
            Normalized::ok(Some(EnrollmentStatus::Active))
        );
        let unknown = normalize_enrollment_status("Pending", &table);
        assert_eq!(unknown.outcome, Outcome::Invalid);
        assert_eq!(unknown.reason, Some(ReasonCode::UnknownStatus));
        let missing = normalize_enrollment_status("  ", &table);
        assert_eq!(missing.value, None);
        assert_eq!(missing.reason, Some(ReasonCode::MissingStatus));
    }

    #[test]
    fn blank_synonyms_are_ignored() {
        let table = SynonymTable::new().with("  ", Gender::M);
        assert!(table.is_empty());
    }
}

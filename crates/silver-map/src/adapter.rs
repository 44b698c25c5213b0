//! Source adapters.
//!
//! An adapter is pure data: which source column feeds each silver field, the
//! provenance stamp, the accepted date layouts, and the synonym tables for
//! closed enumerations. The reconciliation engine reads it by table lookup
//! only, so onboarding a source never touches engine code.

use std::collections::BTreeSet;

use silver_model::{EnrollmentStatus, Gender, OrgId, RawRow, SourceId, TargetField};
use silver_normalize::{
    DEFAULT_DATE_FORMATS, SynonymTable, default_gender_synonyms, default_status_synonyms,
    is_usable_date_format,
};

use crate::error::ConfigError;

fn field_slot(field: TargetField) -> usize {
    match field {
        TargetField::PatientId => 0,
        TargetField::FirstName => 1,
        TargetField::LastName => 2,
        TargetField::DateOfBirth => 3,
        TargetField::Gender => 4,
        TargetField::EnrollmentStatus => 5,
        TargetField::Phone => 6,
    }
}

/// Complete target-field → source-column mapping.
///
/// Construction fails unless every [`TargetField`] has a column, so lookups
/// are total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [String; 7],
}

impl ColumnMap {
    /// Builds a mapping from `(field, column)` pairs. Later pairs win.
    pub fn from_pairs<I, S>(source: &SourceId, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (TargetField, S)>,
        S: Into<String>,
    {
        let mut slots: [Option<String>; 7] = Default::default();
        for (field, column) in pairs {
            let column: String = column.into();
            let column = column.trim().to_string();
            if column.is_empty() {
                return Err(ConfigError::EmptyColumn {
                    source_id: source.to_string(),
                    field,
                });
            }
            slots[field_slot(field)] = Some(column);
        }
        let mut columns: [String; 7] = Default::default();
        for field in TargetField::ALL {
            let Some(column) = slots[field_slot(field)].take() else {
                return Err(ConfigError::MissingMapping {
                    source_id: source.to_string(),
                    field,
                });
            };
            columns[field_slot(field)] = column;
        }
        Ok(Self { columns })
    }

    /// Mapping where every source column is named after its target field.
    pub fn identity() -> Self {
        Self {
            columns: TargetField::ALL.map(|field| field.as_str().to_string()),
        }
    }

    pub fn column(&self, field: TargetField) -> &str {
        &self.columns[field_slot(field)]
    }

    /// `(field, column)` pairs in silver column order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetField, &str)> {
        TargetField::ALL
            .into_iter()
            .map(|field| (field, self.column(field)))
    }
}

/// Everything the engine needs to know about one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAdapter {
    pub source: SourceId,
    pub org_id: OrgId,
    pub columns: ColumnMap,
    /// Alternate birth date layouts, tried in order after ISO.
    pub date_formats: Vec<String>,
    pub gender: SynonymTable<Gender>,
    pub enrollment_status: SynonymTable<EnrollmentStatus>,
    /// Bronze file name relative to the input directory.
    pub file: Option<String>,
}

impl SourceAdapter {
    /// Adapter with built-in synonyms and the default date layouts.
    pub fn new(source: SourceId, org_id: OrgId, columns: ColumnMap) -> Self {
        Self {
            source,
            org_id,
            columns,
            date_formats: DEFAULT_DATE_FORMATS
                .iter()
                .map(|format| (*format).to_string())
                .collect(),
            gender: default_gender_synonyms(),
            enrollment_status: default_status_synonyms(),
            file: None,
        }
    }

    /// Replace the alternate date layouts after checking each one.
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut accepted = Vec::new();
        for format in formats {
            let format: String = format.into();
            if !is_usable_date_format(&format) {
                return Err(ConfigError::InvalidDateFormat {
                    source_id: self.source.to_string(),
                    format,
                });
            }
            accepted.push(format);
        }
        self.date_formats = accepted;
        Ok(self)
    }

    #[must_use]
    pub fn with_gender_synonym(mut self, synonym: &str, gender: Gender) -> Self {
        self.gender.insert(synonym, gender);
        self
    }

    #[must_use]
    pub fn with_status_synonym(mut self, synonym: &str, status: EnrollmentStatus) -> Self {
        self.enrollment_status.insert(synonym, status);
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Raw value of `field` in `row`; `""` when the column is absent.
    pub fn resolve<'a>(&self, row: &'a RawRow, field: TargetField) -> &'a str {
        row.get(self.columns.column(field))
    }

    /// Bronze file name, defaulting to `bronze_<source>_patients.csv`.
    pub fn input_file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("bronze_{}_patients.csv", self.source))
    }
}

/// Check invariants that span adapters: at least one, unique source ids,
/// unique `org_id`s.
pub fn check_adapter_set(adapters: &[SourceAdapter]) -> Result<(), ConfigError> {
    if adapters.is_empty() {
        return Err(ConfigError::NoSources);
    }
    let mut sources = BTreeSet::new();
    for adapter in adapters {
        if !sources.insert(adapter.source.as_str()) {
            return Err(ConfigError::DuplicateSource(adapter.source.to_string()));
        }
    }
    for (idx, adapter) in adapters.iter().enumerate() {
        if let Some(other) = adapters[..idx]
            .iter()
            .find(|other| other.org_id == adapter.org_id)
        {
            return Err(ConfigError::DuplicateOrgId {
                org_id: adapter.org_id.to_string(),
                first: other.source.to_string(),
                second: adapter.source.to_string(),
            });
        }
    }
    Ok(())
}

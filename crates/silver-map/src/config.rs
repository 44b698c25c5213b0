//! TOML adapter configuration.
//!
//! ```toml
//! [policy]
//! date_of_birth = "warn"
//! phone = "warn"
//! min_birth_year = 1900
//!
//! [[sources]]
//! id = "chicago"
//! org_id = "chicago"
//! date_formats = ["%m/%d/%Y"]
//!
//! [sources.columns]
//! patient_id = "mrn"
//! date_of_birth = "birth_date"
//! # ... one entry per target field
//!
//! [sources.gender]
//! Male = "M"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use silver_model::{EnrollmentStatus, Gender, OrgId, SourceId, TargetField};
use silver_normalize::{DEFAULT_MIN_BIRTH_YEAR, synonym_key};
use silver_validate::{FieldPolicy, ValidationPolicy};

use crate::adapter::{ColumnMap, SourceAdapter, check_adapter_set};
use crate::error::ConfigError;

/// On-disk layout of a sources file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesFile {
    #[serde(default)]
    pub policy: Option<PolicySection>,
    #[serde(default)]
    pub sources: Vec<SourceSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    #[serde(default)]
    pub date_of_birth: Option<FieldPolicy>,
    #[serde(default)]
    pub phone: Option<FieldPolicy>,
    #[serde(default)]
    pub min_birth_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    pub id: String,
    pub org_id: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub date_formats: Option<Vec<String>>,
    /// Target field name → source column name.
    pub columns: BTreeMap<String, String>,
    /// Source spelling → `M`, `F` or `Other`.
    #[serde(default)]
    pub gender: BTreeMap<String, String>,
    /// Source spelling → canonical status name.
    #[serde(default)]
    pub enrollment_status: BTreeMap<String, String>,
}

/// Validated configuration ready for the reconciler.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    /// Adapters in processing order.
    pub adapters: Vec<SourceAdapter>,
    pub policy: ValidationPolicy,
    pub min_birth_year: i32,
}

/// Read and validate a sources file.
pub fn load_sources(path: &Path) -> Result<SourcesConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let config = parse_sources(&contents, path)?;
    info!(
        path = %path.display(),
        sources = config.adapters.len(),
        "loaded source adapters"
    );
    Ok(config)
}

/// Parse and validate sources TOML. `origin` is only used in error messages.
pub fn parse_sources(contents: &str, origin: &Path) -> Result<SourcesConfig, ConfigError> {
    let file: SourcesFile = toml::from_str(contents).map_err(|e| ConfigError::Toml {
        path: PathBuf::from(origin),
        source: e,
    })?;
    build_config(file)
}

/// Turn the raw file layout into checked adapters.
pub fn build_config(file: SourcesFile) -> Result<SourcesConfig, ConfigError> {
    let adapters = file
        .sources
        .into_iter()
        .map(build_adapter)
        .collect::<Result<Vec<_>, _>>()?;
    check_adapter_set(&adapters)?;

    let policy_section = file.policy.unwrap_or_default();
    let policy = ValidationPolicy {
        date_of_birth: policy_section.date_of_birth.unwrap_or_default(),
        phone: policy_section.phone.unwrap_or_default(),
    };
    Ok(SourcesConfig {
        adapters,
        policy,
        min_birth_year: policy_section
            .min_birth_year
            .unwrap_or(DEFAULT_MIN_BIRTH_YEAR),
    })
}

/// Build one adapter, reporting the first configuration problem found.
pub fn build_adapter(section: SourceSection) -> Result<SourceAdapter, ConfigError> {
    let source = SourceId::new(section.id)?;
    let org_id = OrgId::new(section.org_id)?;

    let mut pairs: Vec<(TargetField, String)> = Vec::with_capacity(section.columns.len());
    for (field, column) in section.columns {
        let target = field
            .parse::<TargetField>()
            .map_err(|_| ConfigError::UnknownField {
                source_id: source.to_string(),
                field: field.clone(),
            })?;
        if pairs.iter().any(|(mapped, _)| *mapped == target) {
            return Err(ConfigError::DuplicateMapping {
                source_id: source.to_string(),
                field: target,
            });
        }
        pairs.push((target, column));
    }
    let columns = ColumnMap::from_pairs(&source, pairs)?;

    let mut adapter = SourceAdapter::new(source, org_id, columns);
    if let Some(formats) = section.date_formats {
        adapter = adapter.with_date_formats(formats)?;
    }
    check_synonym_keys(&adapter, "gender", section.gender.keys())?;
    check_synonym_keys(&adapter, "enrollment_status", section.enrollment_status.keys())?;
    for (synonym, value) in &section.gender {
        let gender = value
            .parse::<Gender>()
            .map_err(|_| invalid_synonym(&adapter, "gender", synonym, value))?;
        adapter = adapter.with_gender_synonym(synonym, gender);
    }
    for (synonym, value) in &section.enrollment_status {
        let status = value
            .parse::<EnrollmentStatus>()
            .map_err(|_| invalid_synonym(&adapter, "enrollment_status", synonym, value))?;
        adapter = adapter.with_status_synonym(synonym, status);
    }
    if let Some(file) = section.file {
        adapter = adapter.with_file(file);
    }
    debug!(
        source = %adapter.source,
        org_id = %adapter.org_id,
        date_formats = adapter.date_formats.len(),
        gender_synonyms = adapter.gender.len(),
        status_synonyms = adapter.enrollment_status.len(),
        "built source adapter"
    );
    Ok(adapter)
}

/// Rejects synonym keys that collide after trimming and lowercasing.
fn check_synonym_keys<'a>(
    adapter: &SourceAdapter,
    kind: &'static str,
    synonyms: impl Iterator<Item = &'a String>,
) -> Result<(), ConfigError> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for synonym in synonyms {
        if let Some(first) = seen.insert(synonym_key(synonym), synonym) {
            return Err(ConfigError::DuplicateSynonym {
                source_id: adapter.source.to_string(),
                kind,
                first: first.to_string(),
                second: synonym.clone(),
            });
        }
    }
    Ok(())
}

fn invalid_synonym(
    adapter: &SourceAdapter,
    kind: &'static str,
    synonym: &str,
    value: &str,
) -> ConfigError {
    ConfigError::InvalidSynonym {
        source_id: adapter.source.to_string(),
        kind,
        synonym: synonym.to_string(),
        value: value.to_string(),
    }
}

#![deny(unsafe_code)]

use std::path::PathBuf;

use silver_model::{ModelError, TargetField};

/// Adapter configuration problems. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("no sources configured")]
    NoSources,

    #[error("source {source_id}: no column mapped for target field {field}")]
    MissingMapping {
        source_id: String,
        field: TargetField,
    },

    #[error("source {source_id}: unknown target field {field:?} in column mapping")]
    UnknownField { source_id: String, field: String },

    #[error("source {source_id}: target field {field} is mapped more than once")]
    DuplicateMapping {
        source_id: String,
        field: TargetField,
    },

    #[error("source {source_id}: {kind} synonyms {first:?} and {second:?} collide")]
    DuplicateSynonym {
        source_id: String,
        kind: &'static str,
        first: String,
        second: String,
    },

    #[error("source {source_id}: empty column name for target field {field}")]
    EmptyColumn {
        source_id: String,
        field: TargetField,
    },

    #[error("source {source_id}: {kind} synonym {synonym:?} maps to unknown value {value:?}")]
    InvalidSynonym {
        source_id: String,
        kind: &'static str,
        synonym: String,
        value: String,
    },

    #[error("source {source_id}: unusable date format {format:?}")]
    InvalidDateFormat { source_id: String, format: String },

    #[error("duplicate source id {0}")]
    DuplicateSource(String),

    #[error("sources {first} and {second} share org_id {org_id}")]
    DuplicateOrgId {
        org_id: String,
        first: String,
        second: String,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

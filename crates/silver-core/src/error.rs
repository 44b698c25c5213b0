use thiserror::Error;

use silver_map::ConfigError;
use silver_model::{OrgId, SourceId};

/// Fatal reconciliation errors.
///
/// Data-quality problems never surface here; they are findings.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no input batch supplied for configured source {0}")]
    MissingBatch(SourceId),

    #[error("input batch supplied for unconfigured source {0}")]
    UnknownSource(SourceId),

    #[error(
        "merged output repeats org_id {org_id} with patient_id {patient_id} (from source {source_id})"
    )]
    DuplicateProvenance {
        org_id: OrgId,
        patient_id: String,
        source_id: SourceId,
    },
}

pub type Result<T> = std::result::Result<T, ReconError>;

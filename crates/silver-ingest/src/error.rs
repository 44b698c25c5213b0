use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("bronze file not found for source {source_id}: {path}")]
    MissingFile { source_id: String, path: PathBuf },

    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read record {record} of {path}")]
    Record {
        path: PathBuf,
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("duplicate column {column:?} in header of {path}")]
    DuplicateHeader { path: PathBuf, column: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;

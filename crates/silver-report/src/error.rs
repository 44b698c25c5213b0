use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV output")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON output")]
    Json(#[from] serde_json::Error),

    #[error("unknown findings format {0:?} (expected json or csv)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;

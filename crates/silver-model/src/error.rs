use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid source id: {0:?}")]
    InvalidSourceId(String),
    #[error("invalid org id: {0:?}")]
    InvalidOrgId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

#![deny(unsafe_code)]

//! Per-source adapters and their TOML configuration.

pub mod adapter;
pub mod config;
pub mod error;

pub use adapter::{ColumnMap, SourceAdapter, check_adapter_set};
pub use config::{
    PolicySection, SourceSection, SourcesConfig, SourcesFile, build_adapter, build_config,
    load_sources, parse_sources,
};
pub use error::ConfigError;

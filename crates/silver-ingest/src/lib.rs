//! Bronze CSV ingestion.
//!
//! Turns one source's CSV export into an ordered batch of [`RawRow`]s. No
//! type coercion happens here; every value stays a string.
//!
//! [`RawRow`]: silver_model::RawRow

pub mod batch;
pub mod csv_table;
pub mod error;

pub use batch::{load_batches, load_source_batch, missing_columns, source_path};
pub use csv_table::{BronzeTable, read_bronze_table, read_raw_rows};
pub use error::{IngestError, Result};

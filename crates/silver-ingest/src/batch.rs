//! One bronze file per configured source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use silver_map::SourceAdapter;
use silver_model::{RawRow, SourceId};

use crate::csv_table::read_bronze_table;
use crate::error::{IngestError, Result};

/// Location of a source's bronze file under `input_dir`.
pub fn source_path(input_dir: &Path, adapter: &SourceAdapter) -> PathBuf {
    input_dir.join(adapter.input_file_name())
}

/// Mapped columns the header does not carry. They read as empty on every row.
pub fn missing_columns<'a>(headers: &[String], adapter: &'a SourceAdapter) -> Vec<&'a str> {
    adapter
        .columns
        .iter()
        .map(|(_, column)| column)
        .filter(|column| !headers.iter().any(|header| header.as_str() == *column))
        .collect()
}

/// Read one source's bronze rows, warning about unmapped header gaps.
pub fn load_source_batch(input_dir: &Path, adapter: &SourceAdapter) -> Result<Vec<RawRow>> {
    let path = source_path(input_dir, adapter);
    if !path.is_file() {
        return Err(IngestError::MissingFile {
            source_id: adapter.source.to_string(),
            path,
        });
    }
    let table = read_bronze_table(&path)?;
    let missing = missing_columns(&table.headers, adapter);
    if !missing.is_empty() {
        warn!(
            source = %adapter.source,
            columns = ?missing,
            "mapped columns missing from bronze header"
        );
    }
    info!(
        source = %adapter.source,
        path = %path.display(),
        rows = table.rows.len(),
        "loaded bronze batch"
    );
    Ok(table.rows)
}

/// Load every adapter's bronze file, keyed by source.
pub fn load_batches(
    input_dir: &Path,
    adapters: &[SourceAdapter],
) -> Result<BTreeMap<SourceId, Vec<RawRow>>> {
    adapters
        .iter()
        .map(|adapter| {
            load_source_batch(input_dir, adapter).map(|rows| (adapter.source.clone(), rows))
        })
        .collect()
}

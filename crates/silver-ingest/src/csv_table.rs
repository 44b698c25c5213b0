use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use silver_model::RawRow;

use crate::error::{IngestError, Result};

/// Bronze table as read: header plus verbatim string rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BronzeTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}

/// Read a bronze CSV file.
///
/// The first non-blank line is the header. Records whose cells are all blank
/// are skipped, so the `row` index of a finding counts non-blank data records
/// only. Cell values are kept exactly as written; rows shorter than the header leave their trailing columns absent
/// and cells beyond the header are dropped.
pub fn read_bronze_table(path: &Path) -> Result<BronzeTable> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let table = read_from(reader, path)?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read bronze table"
    );
    Ok(table)
}

/// Read bronze rows only; see [`read_bronze_table`].
pub fn read_raw_rows(path: &Path) -> Result<Vec<RawRow>> {
    read_bronze_table(path).map(|table| table.rows)
}

fn read_from<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<BronzeTable> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Record {
            path: path.to_path_buf(),
            record: idx as u64 + 1,
            source,
        })?;
        if is_blank(&record) {
            debug!(
                path = %path.display(),
                record = idx as u64 + 1,
                "skipped blank record"
            );
            continue;
        }
        if headers.is_none() {
            headers = Some(parse_header(&record, path)?);
            continue;
        }
        let columns = headers.as_deref().unwrap_or_default();
        rows.push(
            columns
                .iter()
                .zip(record.iter())
                .filter(|(column, _)| !column.is_empty())
                .map(|(column, value)| (column.as_str(), value))
                .collect(),
        );
    }
    Ok(BronzeTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

fn parse_header(record: &csv::StringRecord, path: &Path) -> Result<Vec<String>> {
    let headers: Vec<String> = record.iter().map(normalize_header).collect();
    let mut seen = BTreeSet::new();
    for column in &headers {
        if !column.is_empty() && !seen.insert(column.as_str()) {
            return Err(IngestError::DuplicateHeader {
                path: path.to_path_buf(),
                column: column.clone(),
            });
        }
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(contents: &str) -> BronzeTable {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(contents.as_bytes());
        read_from(reader, Path::new("inline.csv")).unwrap()
    }

    #[test]
    fn strips_bom_and_keeps_values_verbatim() {
        let table = read("\u{feff}patient_id, first_name\n 10001 ,Maria \n");
        assert_eq!(table.headers, vec!["patient_id", "first_name"]);
        assert_eq!(table.rows[0].get("patient_id"), " 10001 ");
        assert_eq!(table.rows[0].get("first_name"), "Maria ");
    }

    #[test]
    fn short_rows_leave_columns_absent() {
        let table = read("a,b,c\n1,2\n1,2,3,4\n");
        assert!(!table.rows[0].contains("c"));
        assert_eq!(table.rows[0].get("c"), "");
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = read("\na,b\n\n1,2\n , \n3,4\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("a"), "3");
    }

    #[test]
    fn comma_only_record_does_not_take_a_row_index() {
        let table = read("a,b\n1,2\n,\n3,4\n");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("a"), "1");
        assert_eq!(table.rows[1].get("a"), "3");
    }

    #[test]
    fn quoted_fields_survive() {
        let table = read("name,phone\n\"Smith, Jr.\",\"(217) 555-0101\"\n");
        assert_eq!(table.rows[0].get("name"), "Smith, Jr.");
    }

    #[test]
    fn duplicate_header_is_an_error() {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader("a,a\n1,2\n".as_bytes());
        let err = read_from(reader, Path::new("dup.csv")).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateHeader { .. }));
    }

    #[test]
    fn empty_input_has_no_rows() {
        let table = read("");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use silver_model::ValidationFinding;

use crate::error::{ReportError, Result};

/// Findings report column order for CSV output.
pub const FINDING_COLUMNS: [&str; 6] = ["source", "row", "field", "reason", "raw_value", "severity"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingsFormat {
    #[default]
    Json,
    Csv,
}

impl FindingsFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FindingsFormat::Json => "json",
            FindingsFormat::Csv => "csv",
        }
    }

    /// `findings.json` or `findings.csv`.
    pub fn file_name(&self) -> String {
        format!("findings.{}", self.extension())
    }
}

impl fmt::Display for FindingsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FindingsFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(FindingsFormat::Json),
            "csv" => Ok(FindingsFormat::Csv),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Write findings in `format`, preserving their order.
pub fn write_findings<W: Write>(
    writer: W,
    findings: &[ValidationFinding],
    format: FindingsFormat,
) -> Result<()> {
    match format {
        FindingsFormat::Json => write_findings_json(writer, findings),
        FindingsFormat::Csv => write_findings_csv(writer, findings),
    }
}

/// Pretty-printed JSON array.
pub fn write_findings_json<W: Write>(mut writer: W, findings: &[ValidationFinding]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, findings)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(())
}

pub fn write_findings_csv<W: Write>(writer: W, findings: &[ValidationFinding]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(FINDING_COLUMNS)?;
    for finding in findings {
        let row = finding.row.to_string();
        csv.write_record([
            finding.source.as_str(),
            row.as_str(),
            finding.field.as_str(),
            finding.reason.as_str(),
            finding.raw_value.as_str(),
            finding.severity.as_str(),
        ])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

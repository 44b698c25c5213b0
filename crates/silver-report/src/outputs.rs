use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use silver_core::MergedOutput;

use crate::error::{ReportError, Result};
use crate::findings::{FindingsFormat, write_findings};
use crate::silver::{SILVER_FILE_NAME, write_silver_csv};

/// Files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub silver: PathBuf,
    pub findings: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(output_dir: &Path, format: FindingsFormat) -> Self {
        Self {
            silver: output_dir.join(SILVER_FILE_NAME),
            findings: output_dir.join(format.file_name()),
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the silver CSV and the findings report into `output_dir`.
pub fn write_outputs(
    output_dir: &Path,
    output: &MergedOutput,
    format: FindingsFormat,
) -> Result<OutputPaths> {
    fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let paths = OutputPaths::in_dir(output_dir, format);

    write_silver_csv(create(&paths.silver)?, &output.records)?;
    info!(
        path = %paths.silver.display(),
        records = output.records.len(),
        "wrote silver records"
    );

    write_findings(create(&paths.findings)?, &output.findings, format)?;
    info!(
        path = %paths.findings.display(),
        findings = output.findings.len(),
        format = %format,
        "wrote findings report"
    );
    Ok(paths)
}

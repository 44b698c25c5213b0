//! Output writers for reconciled patient data.
//!
//! - **silver**: `silver_patients.csv` with the eight silver columns
//! - **findings**: the findings report as pretty JSON or CSV
//! - **summary**: finding counts by source and reason

mod error;
mod findings;
mod outputs;
mod silver;
mod summary;

pub use error::{ReportError, Result};
pub use findings::{
    FINDING_COLUMNS, FindingsFormat, write_findings, write_findings_csv, write_findings_json,
};
pub use outputs::{OutputPaths, write_outputs};
pub use silver::{SILVER_FILE_NAME, write_silver_csv};
pub use summary::{FindingCount, FindingsSummary};

use std::path::PathBuf;

use silver_core::SourceSummary;
use silver_report::{FindingsSummary, OutputPaths};

/// Outcome of one `silver run`.
#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    /// `None` on a dry run.
    pub outputs: Option<OutputPaths>,
    pub sources: Vec<SourceSummary>,
    pub findings: FindingsSummary,
}

impl RunResult {
    pub fn input_rows(&self) -> usize {
        self.sources.iter().map(|s| s.stats.input_rows).sum()
    }

    pub fn accepted(&self) -> usize {
        self.sources.iter().map(|s| s.stats.accepted).sum()
    }

    pub fn rejected(&self) -> usize {
        self.sources.iter().map(|s| s.stats.rejected).sum()
    }
}

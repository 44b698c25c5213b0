//! The `run` pipeline: config, ingest, reconcile, write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, info_span, trace};

use silver_core::{MergedOutput, ReconcileOptions, Reconciler};
use silver_ingest::load_batches;
use silver_map::{SourcesConfig, load_sources};
use silver_report::{FindingsFormat, FindingsSummary, write_outputs};
use silver_validate::FieldPolicy;

use crate::logging::redact_value;
use crate::types::RunResult;

/// Inputs for one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input_dir: PathBuf,
    pub config_path: PathBuf,
    /// Defaults to `<input_dir>/silver`.
    pub output_dir: Option<PathBuf>,
    pub as_of: NaiveDate,
    pub findings_format: FindingsFormat,
    pub dry_run: bool,
    pub strict_dob: bool,
    pub strict_phone: bool,
    pub parallel: bool,
}

impl RunRequest {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            config_path: config_path.into(),
            output_dir: None,
            as_of,
            findings_format: FindingsFormat::default(),
            dry_run: false,
            strict_dob: false,
            strict_phone: false,
            parallel: true,
        }
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join("silver"))
    }

    /// Options from the sources file, with command line strictness on top.
    pub fn options(&self, config: &SourcesConfig) -> ReconcileOptions {
        let mut policy = config.policy;
        if self.strict_dob {
            policy = policy.with_date_of_birth(FieldPolicy::Reject);
        }
        if self.strict_phone {
            policy = policy.with_phone(FieldPolicy::Reject);
        }
        ReconcileOptions::from_config(config, self.as_of)
            .with_policy(policy)
            .with_parallel(self.parallel)
    }
}

pub fn run_pipeline(request: &RunRequest) -> Result<RunResult> {
    let span = info_span!("run", input = %request.input_dir.display(), as_of = %request.as_of);
    let _guard = span.enter();
    let output_dir = request.resolved_output_dir();

    let config = load_sources(&request.config_path)
        .with_context(|| format!("load sources config {}", request.config_path.display()))?;
    let options = request.options(&config);
    debug!(?options, "reconcile options");

    let batches = load_batches(&request.input_dir, &config.adapters)
        .with_context(|| format!("read bronze files from {}", request.input_dir.display()))?;

    let reconciler = Reconciler::from_config(config, options).context("build reconciler")?;
    let merged = reconciler.run(batches).context("reconcile sources")?;
    log_rejections(&merged);

    let outputs = if request.dry_run {
        info!("dry run: skipping output files");
        None
    } else {
        Some(write_outputs(&output_dir, &merged, request.findings_format).with_context(
            || format!("write outputs to {}", output_dir.display()),
        )?)
    };

    info!(
        input_rows = merged.input_rows(),
        accepted = merged.accepted(),
        rejected = merged.rejected(),
        "run complete"
    );
    Ok(RunResult {
        output_dir,
        outputs,
        findings: FindingsSummary::from_findings(&merged.findings),
        sources: merged.sources,
    })
}

fn log_rejections(merged: &MergedOutput) {
    for finding in merged.rejections() {
        trace!(
            source = %finding.source,
            row = finding.row,
            field = %finding.field,
            reason = %finding.reason,
            raw = redact_value(&finding.raw_value),
            "rejected row"
        );
    }
}

/// Parse a `YYYY-MM-DD` processing date.
pub fn parse_as_of(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid --as-of date {value:?} (expected YYYY-MM-DD)"))
}

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;

use silver_cli::pipeline::{RunRequest, parse_as_of, run_pipeline};
use silver_cli::types::RunResult;
use silver_map::load_sources;
use silver_report::FindingsFormat;
use silver_validate::FieldPolicy;

use crate::cli::{FindingsFormatArg, RunArgs, SourcesArgs};
use crate::summary::apply_table_style;

pub fn run_sources(args: &SourcesArgs) -> Result<()> {
    let config = load_sources(&args.config)
        .with_context(|| format!("load sources config {}", args.config.display()))?;
    let mut table = Table::new();
    table.set_header(vec![
        "Source",
        "Org ID",
        "File",
        "Date formats",
        "Gender synonyms",
        "Status synonyms",
    ]);
    apply_table_style(&mut table);
    for adapter in &config.adapters {
        table.add_row(vec![
            adapter.source.to_string(),
            adapter.org_id.to_string(),
            adapter.input_file_name(),
            adapter.date_formats.join(" "),
            adapter.gender.len().to_string(),
            adapter.enrollment_status.len().to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "Policy: date_of_birth={}, phone={}, min_birth_year={}",
        policy_name(config.policy.date_of_birth),
        policy_name(config.policy.phone),
        config.min_birth_year
    );
    Ok(())
}

pub fn run_reconcile(args: &RunArgs) -> Result<RunResult> {
    let as_of = match &args.as_of {
        Some(value) => parse_as_of(value)?,
        None => Local::now().date_naive(),
    };
    let mut request = RunRequest::new(&args.input_dir, &args.config, as_of);
    request.output_dir = args.output_dir.clone();
    request.findings_format = match args.findings_format {
        FindingsFormatArg::Json => FindingsFormat::Json,
        FindingsFormatArg::Csv => FindingsFormat::Csv,
    };
    request.dry_run = args.dry_run;
    request.strict_dob = args.strict_dob;
    request.strict_phone = args.strict_phone;
    request.parallel = !args.sequential;
    run_pipeline(&request)
}

fn policy_name(policy: FieldPolicy) -> &'static str {
    match policy {
        FieldPolicy::Warn => "warn",
        FieldPolicy::Reject => "reject",
    }
}

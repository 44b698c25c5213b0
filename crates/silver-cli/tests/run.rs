//! Runs the full pipeline over the demo bronze files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use silver_cli::pipeline::{RunRequest, parse_as_of, run_pipeline};
use silver_report::FindingsFormat;

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn request(output_dir: &Path) -> RunRequest {
    let root = repo_root();
    let mut request = RunRequest::new(
        root.join("demos/bronze"),
        root.join("config/sources.toml"),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    );
    request.output_dir = Some(output_dir.to_path_buf());
    request
}

#[test]
fn demo_run_writes_silver_and_findings() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_pipeline(&request(dir.path())).unwrap();

    assert_eq!(result.input_rows(), 13);
    assert_eq!(result.accepted(), 8);
    assert_eq!(result.rejected(), 5);
    let per_source: Vec<_> = result
        .sources
        .iter()
        .map(|s| (s.source.as_str(), s.stats.accepted, s.stats.rejected))
        .collect();
    assert_eq!(per_source, vec![("springfield", 4, 3), ("chicago", 4, 2)]);

    let silver = fs::read_to_string(dir.path().join("silver_patients.csv")).unwrap();
    let lines: Vec<&str> = silver.lines().collect();
    assert_eq!(
        lines[0],
        "patient_id,first_name,last_name,date_of_birth,gender,enrollment_status,phone,org_id"
    );
    assert_eq!(lines.len(), 9);
    assert!(lines.contains(&"10001,Maria,Gonzalez,1948-03-15,F,Active,2175550101,springfield"));
    assert!(lines.contains(&"10001,Aisha,Patel,1950-01-12,F,Active,3125550199,chicago"));
    assert!(lines.contains(&"10006,Michael,Brown,1970-06-11,Other,Deceased,2175550106,springfield"));

    let findings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("findings.json")).unwrap())
            .unwrap();
    let findings = findings.as_array().unwrap();
    let rejects = findings
        .iter()
        .filter(|f| f["severity"] == "reject")
        .count();
    assert_eq!(rejects, 5);
    assert!(findings.iter().any(|f| f["source"] == "springfield"
        && f["row"] == 5
        && f["reason"] == "duplicate_patient_id"));
}

#[test]
fn strict_flags_escalate_soft_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = request(dir.path());
    request.strict_dob = true;
    request.strict_phone = true;
    request.parallel = false;
    let result = run_pipeline(&request).unwrap();
    // 10005 (bad date and phone), C-2003 (future date), C-2006 (no phone)
    assert_eq!(result.rejected(), 8);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("out");
    let mut request = request(&output_dir);
    request.dry_run = true;
    request.findings_format = FindingsFormat::Csv;
    let result = run_pipeline(&request).unwrap();
    assert!(result.outputs.is_none());
    assert!(!output_dir.exists());
    assert_eq!(result.findings.total(), 13);
}

#[test]
fn missing_bronze_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        repo_root().join("demos/bronze/bronze_springfield_patients.csv"),
        dir.path().join("bronze_springfield_patients.csv"),
    )
    .unwrap();
    let mut request = request(&dir.path().join("out"));
    request.input_dir = dir.path().to_path_buf();
    let err = run_pipeline(&request).unwrap_err();
    assert!(format!("{err:#}").contains("chicago"));
}

#[test]
fn default_output_dir_is_under_input() {
    let request = RunRequest::new("bronze", "sources.toml", NaiveDate::MIN);
    assert_eq!(request.resolved_output_dir(), Path::new("bronze").join("silver"));
}

#[test]
fn as_of_must_be_iso() {
    assert_eq!(
        parse_as_of("2024-06-01").unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    );
    assert!(parse_as_of("06/01/2024").is_err());
}

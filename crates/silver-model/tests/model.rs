//! Tests for silver-model types.

use silver_model::{
    CandidateRecord, EnrollmentStatus, FindingField, Gender, ReasonCode, SILVER_COLUMNS,
    Severity, SilverRecord, SourceId, TargetField, ValidationFinding,
};

fn candidate() -> CandidateRecord {
    CandidateRecord {
        row: 0,
        raw_patient_id: " 10001 ".to_string(),
        patient_id: "10001".to_string(),
        first_name: "Maria".to_string(),
        last_name: "Gonzalez".to_string(),
        date_of_birth: "1948-03-15".to_string(),
        gender: Gender::F,
        enrollment_status: Some(EnrollmentStatus::Active),
        phone: "2175550101".to_string(),
        org_id: "springfield".to_string(),
    }
}

#[test]
fn record_values_follow_column_order() {
    let record = candidate().into_record().expect("status resolved");
    assert_eq!(
        record.values(),
        [
            "10001",
            "Maria",
            "Gonzalez",
            "1948-03-15",
            "F",
            "Active",
            "2175550101",
            "springfield"
        ]
    );
    assert_eq!(SILVER_COLUMNS.len(), record.values().len());
    assert_eq!(record.provenance_key(), ("springfield", "10001"));
}

#[test]
fn candidate_without_status_is_not_a_record() {
    let mut unresolved = candidate();
    unresolved.enrollment_status = None;
    assert_eq!(unresolved.text(TargetField::EnrollmentStatus), "");
    assert!(unresolved.into_record().is_none());
}

#[test]
fn record_serializes_enums_as_canonical_strings() {
    let record: SilverRecord = candidate().into_record().unwrap();
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["gender"], "F");
    assert_eq!(json["enrollment_status"], "Active");
}

#[test]
fn finding_serializes_wire_names() {
    let finding = ValidationFinding::warning(
        SourceId::new("chicago").unwrap(),
        3,
        TargetField::EnrollmentStatus,
        ReasonCode::MissingStatus,
        "",
    );
    let json = serde_json::to_value(&finding).expect("serialize finding");
    assert_eq!(json["source"], "chicago");
    assert_eq!(json["row"], 3);
    assert_eq!(json["field"], "enrollment_status");
    assert_eq!(json["reason"], "missing_status");
    assert_eq!(json["severity"], "warning");

    let back: ValidationFinding = serde_json::from_value(json).expect("deserialize finding");
    assert_eq!(back, finding);
}

#[test]
fn record_level_findings_use_record_field() {
    let finding = ValidationFinding::reject(
        SourceId::new("springfield").unwrap(),
        7,
        FindingField::Record,
        ReasonCode::MissingRequiredField,
        "10007",
    );
    assert!(finding.is_rejection());
    assert_eq!(finding.severity, Severity::Reject);
    assert_eq!(finding.field.to_string(), "record");
    assert_eq!("record".parse::<FindingField>().unwrap(), FindingField::Record);
}

//! Properties that hold for any bronze batch.

use chrono::NaiveDate;
use proptest::prelude::*;

use silver_core::{ReconcileOptions, reconcile_batch};
use silver_map::{ColumnMap, SourceAdapter};
use silver_model::{OrgId, RawRow, SourceId};

fn adapter() -> SourceAdapter {
    SourceAdapter::new(
        SourceId::new("springfield").unwrap(),
        OrgId::new("springfield").unwrap(),
        ColumnMap::identity(),
    )
}

fn options() -> ReconcileOptions {
    ReconcileOptions::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[0-9]{1,3}",
        "[A-Za-z ]{1,12}",
        Just("03/15/1948".to_string()),
        Just("2099-01-01".to_string()),
        Just("Active".to_string()),
        Just("female".to_string()),
        Just("(217) 555-0101".to_string()),
    ]
}

fn raw_row() -> impl Strategy<Value = RawRow> {
    let columns = [
        "patient_id",
        "first_name",
        "last_name",
        "date_of_birth",
        "gender",
        "enrollment_status",
        "phone",
    ];
    proptest::collection::vec(proptest::option::of(cell()), columns.len()).prop_map(
        move |cells| {
            columns
                .iter()
                .zip(cells)
                .filter_map(|(column, value)| value.map(|value| (*column, value)))
                .collect::<RawRow>()
        },
    )
}

proptest! {
    #[test]
    fn rows_are_accepted_or_rejected_exactly_once(rows in proptest::collection::vec(raw_row(), 0..24)) {
        let output = reconcile_batch(&adapter(), &rows, &options());
        prop_assert_eq!(output.stats.input_rows, rows.len());
        prop_assert!(output.stats.is_balanced());
        prop_assert_eq!(output.records.len(), output.stats.accepted);
        let rejections = output.findings.iter().filter(|f| f.is_rejection()).count();
        prop_assert_eq!(rejections, output.stats.rejected);
    }

    #[test]
    fn reconciling_is_deterministic(rows in proptest::collection::vec(raw_row(), 0..16)) {
        let first = reconcile_batch(&adapter(), &rows, &options());
        let second = reconcile_batch(&adapter(), &rows, &options());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn accepted_records_satisfy_silver_schema(rows in proptest::collection::vec(raw_row(), 0..24)) {
        let output = reconcile_batch(&adapter(), &rows, &options());
        let mut ids = std::collections::HashSet::new();
        for record in &output.records {
            prop_assert!(!record.patient_id.is_empty());
            prop_assert!(!record.first_name.is_empty());
            prop_assert!(!record.last_name.is_empty());
            prop_assert!(record.date_of_birth.is_empty() || record.date_of_birth.len() == 10);
            prop_assert!(record.date_of_birth.as_str() <= "2024-06-01");
            prop_assert!(
                record.phone.is_empty()
                    || (record.phone.len() == 10 && record.phone.bytes().all(|b| b.is_ascii_digit()))
            );
            prop_assert_eq!(record.org_id.as_str(), "springfield");
            prop_assert!(ids.insert(record.patient_id.clone()));
        }
    }

    #[test]
    fn findings_are_ordered_by_row(rows in proptest::collection::vec(raw_row(), 0..24)) {
        let output = reconcile_batch(&adapter(), &rows, &options());
        prop_assert!(output.findings.windows(2).all(|pair| pair[0].row <= pair[1].row));
        prop_assert!(output.findings.iter().all(|f| f.row < rows.len()));
    }
}

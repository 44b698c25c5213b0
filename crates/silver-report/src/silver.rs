use std::io::Write;

use silver_model::{SILVER_COLUMNS, SilverRecord};

use crate::error::Result;

/// Default silver output file name.
pub const SILVER_FILE_NAME: &str = "silver_patients.csv";

/// Write records as CSV with the silver header, in the given order.
pub fn write_silver_csv<W: Write>(writer: W, records: &[SilverRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(SILVER_COLUMNS)?;
    for record in records {
        csv.write_record(record.values())?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use silver_model::{EnrollmentStatus, Gender};

    #[test]
    fn header_and_values_in_column_order() {
        let record = SilverRecord {
            patient_id: "10001".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Gonzalez, Jr".to_string(),
            date_of_birth: "1948-03-15".to_string(),
            gender: Gender::F,
            enrollment_status: EnrollmentStatus::Active,
            phone: String::new(),
            org_id: "springfield".to_string(),
        };
        let mut buffer = Vec::new();
        write_silver_csv(&mut buffer, &[record]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "patient_id,first_name,last_name,date_of_birth,gender,enrollment_status,phone,org_id\n\
             10001,Maria,\"Gonzalez, Jr\",1948-03-15,F,Active,,springfield\n"
        );
    }

    #[test]
    fn empty_output_still_has_header() {
        let mut buffer = Vec::new();
        write_silver_csv(&mut buffer, &[]).unwrap();
        assert_eq!(buffer.iter().filter(|b| **b == b'\n').count(), 1);
    }
}

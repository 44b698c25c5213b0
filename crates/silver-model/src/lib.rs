//! Shared data model for bronze-to-silver patient reconciliation.

pub mod enums;
pub mod error;
pub mod finding;
pub mod ids;
pub mod raw;
pub mod record;

pub use enums::{EnrollmentStatus, Gender, Outcome, TargetField};
pub use error::{ModelError, Result};
pub use finding::{FindingField, ReasonCode, Severity, ValidationFinding};
pub use ids::{OrgId, SourceId};
pub use raw::RawRow;
pub use record::{CandidateRecord, SILVER_COLUMNS, SilverRecord};

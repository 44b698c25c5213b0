//! Record-level validation for reconciled patient rows.
//!
//! Per-field normalizers only see one value at a time. The validator decides
//! whether a whole candidate row becomes a silver record:
//!
//! 1. `patient_id`, `first_name`, `last_name` must be non-empty
//! 2. `enrollment_status` must have resolved to the closed set
//! 3. `patient_id` must not repeat within the source batch
//! 4. soft fields (`date_of_birth`, `phone`) reject only when the
//!    [`ValidationPolicy`] says so
//!
//! The first failing rule is the row's only rejection reason.

pub mod policy;
pub mod validator;

pub use policy::{FieldPolicy, ValidationPolicy};
pub use validator::{BatchValidator, Verdict};

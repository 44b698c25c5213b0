//! Field normalizers for bronze-to-silver reconciliation.
//!
//! Every normalizer is a total function from one raw string to a
//! [`Normalized`] value:
//!
//! - **text**: identifiers and person names (whitespace only, casing kept)
//! - **date**: birth dates to `YYYY-MM-DD` with future/floor checks
//! - **synonyms**: closed enumerations (gender, enrollment status) resolved
//!   through per-source synonym tables
//! - **phone**: digits-only, ten-digit North American numbers

pub mod date;
pub mod outcome;
pub mod phone;
pub mod synonyms;
pub mod text;

pub use date::{
    DEFAULT_DATE_FORMATS, DEFAULT_MIN_BIRTH_YEAR, DobRules, ISO_DATE_FORMAT,
    is_usable_date_format, normalize_date_of_birth, parse_birth_date,
};
pub use outcome::Normalized;
pub use phone::normalize_phone;
pub use synonyms::{
    SynonymTable, default_gender_synonyms, default_status_synonyms, normalize_enrollment_status,
    normalize_gender, synonym_key,
};
pub use text::{normalize_identifier, normalize_name};

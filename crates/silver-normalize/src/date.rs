//! Birth date parsing and normalization.
//!
//! Canonical output is ISO 8601 calendar date (`YYYY-MM-DD`). Sources that
//! export dates in other layouts list their formats in adapter
//! configuration as chrono `strftime` patterns; ISO input is always accepted.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};

use silver_model::ReasonCode;

use crate::outcome::Normalized;

/// Canonical silver date layout.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Alternate layouts tried when an adapter does not list its own.
///
/// chrono accepts one or two digits for `%m`/`%d`, so this also covers
/// `M/D/YYYY`.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%m/%d/%Y"];

/// Earliest plausible birth year.
pub const DEFAULT_MIN_BIRTH_YEAR: i32 = 1900;

/// Plausibility bounds for a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DobRules {
    /// Processing date; later birth dates are rejected.
    pub as_of: NaiveDate,
    /// Birth years below this are rejected.
    pub min_year: i32,
}

impl DobRules {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            min_year: DEFAULT_MIN_BIRTH_YEAR,
        }
    }

    #[must_use]
    pub fn with_min_year(mut self, min_year: i32) -> Self {
        self.min_year = min_year;
        self
    }

    pub fn is_plausible(&self, date: NaiveDate) -> bool {
        date.year() >= self.min_year && date <= self.as_of
    }
}

/// Returns true for strings shaped exactly like `YYYY-MM-DD`.
fn has_iso_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parses a raw birth date using ISO first, then each alternate format.
///
/// Returns `None` when no layout yields a real calendar date.
pub fn parse_birth_date<S: AsRef<str>>(raw: &str, formats: &[S]) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if has_iso_shape(trimmed)
        && let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
    {
        return Some(date);
    }
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format.as_ref()).ok())
}

/// Normalizes a birth date to `YYYY-MM-DD`.
///
/// Unparseable, future, and pre-floor dates all yield an empty value with
/// [`ReasonCode::UnparseableDob`].
pub fn normalize_date_of_birth<S: AsRef<str>>(
    raw: &str,
    formats: &[S],
    rules: &DobRules,
) -> Normalized<String> {
    match parse_birth_date(raw, formats) {
        Some(date) if rules.is_plausible(date) => {
            Normalized::ok(date.format(ISO_DATE_FORMAT).to_string())
        }
        _ => Normalized::invalid(String::new(), ReasonCode::UnparseableDob),
    }
}

/// Checks that a `strftime` pattern can both render and re-read a full date.
///
/// Used when loading adapter configuration so a bad pattern fails at startup
/// instead of silently rejecting every row.
pub fn is_usable_date_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(probe) = NaiveDate::from_ymd_opt(1948, 3, 15) else {
        return false;
    };
    let mut rendered = String::new();
    if write!(rendered, "{}", probe.format(format)).is_err() {
        return false;
    }
    NaiveDate::parse_from_str(&rendered, format).ok() == Some(probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use silver_model::Outcome;

    fn rules() -> DobRules {
        DobRules::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn iso_dates_pass_through() {
        let result = normalize_date_of_birth("1948-03-15", DEFAULT_DATE_FORMATS, &rules());
        assert_eq!(result, Normalized::ok("1948-03-15".to_string()));
    }

    #[test]
    fn us_dates_are_converted() {
        let result = normalize_date_of_birth("03/15/1948", DEFAULT_DATE_FORMATS, &rules());
        assert_eq!(result.value, "1948-03-15");
        assert_eq!(result.outcome, Outcome::Ok);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn unpadded_us_dates_are_converted() {
        let result = normalize_date_of_birth(" 3/5/1961 ", DEFAULT_DATE_FORMATS, &rules());
        assert_eq!(result.value, "1961-03-05");
    }

    #[test]
    fn impossible_calendar_dates_are_rejected() {
        let result = normalize_date_of_birth("1950-02-30", DEFAULT_DATE_FORMATS, &rules());
        assert_eq!(result.outcome, Outcome::Invalid);
        assert_eq!(result.reason, Some(ReasonCode::UnparseableDob));
        assert_eq!(result.value, "");
    }

    #[test]
    fn future_and_ancient_dates_are_rejected() {
        for raw in ["2024-06-02", "12/31/1899"] {
            let result = normalize_date_of_birth(raw, DEFAULT_DATE_FORMATS, &rules());
            assert_eq!(result.outcome, Outcome::Invalid, "{raw}");
        }
        let boundary = normalize_date_of_birth("2024-06-01", DEFAULT_DATE_FORMATS, &rules());
        assert!(boundary.is_ok());
    }

    #[test]
    fn alternate_formats_only_apply_when_configured() {
        let european: &[&str] = &["%d.%m.%Y"];
        assert_eq!(parse_birth_date("15.03.1948", european), NaiveDate::from_ymd_opt(1948, 3, 15));
        assert_eq!(parse_birth_date("15.03.1948", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_birth_date("1948-03-15", &[] as &[&str]), NaiveDate::from_ymd_opt(1948, 3, 15));
    }

    #[test]
    fn date_format_usability() {
        assert!(is_usable_date_format("%m/%d/%Y"));
        assert!(is_usable_date_format("%d.%m.%Y"));
        assert!(!is_usable_date_format("%m/%Y"));
        assert!(!is_usable_date_format("%H:%M"));
        assert!(!is_usable_date_format("%Q"));
    }
}

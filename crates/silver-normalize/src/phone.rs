//! Phone number normalization.

use silver_model::ReasonCode;

use crate::outcome::Normalized;

const NATIONAL_DIGITS: usize = 10;
const COUNTRY_CODE: char = '1';

/// Strips punctuation from a phone number and keeps ten national digits.
///
/// An eleven-digit number with a leading `1` country code loses the prefix.
/// Any other digit count defaults to the empty string; phone is never
/// required, so this is a quality signal rather than a rejection.
pub fn normalize_phone(raw: &str) -> Normalized<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        NATIONAL_DIGITS => Normalized::ok(digits),
        len if len == NATIONAL_DIGITS + 1 && digits.starts_with(COUNTRY_CODE) => {
            Normalized::ok(digits[1..].to_string())
        }
        _ => Normalized::defaulted(String::new(), ReasonCode::InvalidPhone),
    }
}

//! Date storage format and coercion of user-entered form values.
//!
//! Form input never fails: blank or malformed numbers become zero.

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn date_from_sql(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

/// Whole-number field (sets, reps, minutes). Negative values clamp to 0.
pub fn parse_count(input: &str) -> i64 {
    input.trim().parse::<i64>().map(|n| n.max(0)).unwrap_or(0)
}

/// Decimal field (weight, distance). Negative or non-finite values become 0.
pub fn parse_decimal(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Goal field: only digits are considered; anything that does not yield a
/// positive number keeps `current`.
pub fn parse_goal(input: &str, current: i64) -> i64 {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    digits
        .parse::<i64>()
        .ok()
        .filter(|g| *g > 0)
        .unwrap_or(current)
}

pub fn normalize_notes(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Trello due timestamps, e.g. `2024-03-15T10:30:00.000Z`.
const TRELLO_DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const MAX_FRACTION_DIGITS: usize = 6;

#[derive(Debug, Error)]
pub enum DueError {
    #[error("expected a 1 to 6 digit fraction followed by Z")]
    Shape,
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
    #[error("leap seconds are not accepted")]
    LeapSecond,
}

/// The fraction must be present and at most microsecond precision, so no
/// digits are ever dropped by the conversion.
fn check_fraction(raw: &str) -> Result<(), DueError> {
    let body = raw.strip_suffix('Z').ok_or(DueError::Shape)?;
    let (_, fraction) = body.rsplit_once('.').ok_or(DueError::Shape)?;
    let valid = (1..=MAX_FRACTION_DIGITS).contains(&fraction.len())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(DueError::Shape)
    }
}

/// Reformat a Trello due timestamp as a naive ISO-8601 datetime.
///
/// The fraction is dropped when it is zero and printed as microseconds
/// otherwise, so `2024-03-15T10:30:00.000Z` becomes `2024-03-15T10:30:00`.
pub fn convert_due(raw: &str) -> Result<String, DueError> {
    check_fraction(raw)?;
    let parsed = NaiveDateTime::parse_from_str(raw, TRELLO_DUE_FORMAT)?;
    // chrono encodes second 60 as an overflowing nanosecond value.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(DueError::LeapSecond);
    }
    let formatted = if parsed.nanosecond() == 0 {
        parsed.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        parsed.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    };
    Ok(formatted)
}

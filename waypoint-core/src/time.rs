//! Time utilities: calendar dates in the user's timezone.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::ValidationError;

/// Calendar date of `now` as seen from an IANA tz like "America/Chicago".
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate, ValidationError> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| ValidationError::InvalidTimezone(tz.to_string()))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: &str) -> Result<NaiveDate, ValidationError> {
    local_date(Utc::now(), tz)
}

/// Parse a "2026-02-20" style date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Optional date input; omitted or blank means `today`.
pub fn parse_date_or(s: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    match s.map(str::trim) {
        None | Some("") => Ok(today),
        Some(raw) => parse_date(raw),
    }
}

//! Post date parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, ParseError, Utc};

/// A non-empty date string that matched none of the accepted formats.
#[derive(Debug, thiserror::Error)]
#[error("unrecognised date {input:?}: {source}")]
pub struct DateError {
    pub input: String,
    #[source]
    pub source: ParseError,
}

/// Naive formats tried after RFC 3339, interpreted as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Parse a front-matter date.
///
/// Formats are tried in order: RFC 3339 with fractional seconds, RFC 3339,
/// `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` and `YYYY-MM-DDTHH:MM`. The first one
/// that parses wins. Empty input is "no date", not an error.
pub fn parse_date(s: &str) -> Result<Option<DateTime<FixedOffset>>, DateError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    // chrono's RFC 3339 parser accepts an optional fractional part, so it
    // covers both the nano and the plain variant.
    let mut last = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => return Ok(Some(dt)),
        Err(e) => e,
    };

    for fmt in NAIVE_FORMATS {
        let parsed = if fmt.contains("%H") {
            NaiveDateTime::parse_from_str(s, fmt)
        } else {
            NaiveDate::parse_from_str(s, fmt).map(|d| d.and_time(NaiveTime::default()))
        };
        match parsed {
            Ok(naive) => return Ok(Some(naive.and_utc().fixed_offset())),
            Err(e) => last = e,
        }
    }

    Err(DateError {
        input: s.to_string(),
        source: last,
    })
}

/// Whether `date` lies strictly after `now`
pub fn is_future(date: &DateTime<FixedOffset>, now: DateTime<Utc>) -> bool {
    date.with_timezone(&Utc) > now
}

use super::error::{JournalError, Result};
use super::model::Timestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn now_epoch_utc_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Normalizes a client-supplied timestamp to epoch seconds (UTC).
///
/// Accepts epoch seconds as a number or numeric string, or ISO-8601 with `Z`, an offset, or no
/// zone at all (taken as UTC). Absent or empty means now; whitespace alone is invalid.
pub fn coerce_ts(ts: Option<&Timestamp>) -> Result<i64> {
    match ts {
        None => Ok(now_epoch_utc_seconds()),
        Some(Timestamp::Seconds(secs)) => Ok(*secs),
        Some(Timestamp::Fractional(secs)) => truncate(*secs).ok_or_else(invalid_ts),
        Some(Timestamp::Text(text)) if text.is_empty() => Ok(now_epoch_utc_seconds()),
        Some(Timestamp::Text(text)) => {
            let text = text.trim();
            parse_iso(text)
                .or_else(|| text.parse::<f64>().ok().and_then(truncate))
                .ok_or_else(invalid_ts)
        }
    }
}

fn invalid_ts() -> JournalError {
    JournalError::bad_request("invalid ts (expected epoch seconds or ISO-8601)")
}

fn truncate(secs: f64) -> Option<i64> {
    (secs.is_finite() && secs.abs() < i64::MAX as f64).then(|| secs.trunc() as i64)
}

fn parse_iso(text: &str) -> Option<i64> {
    let zoned = text.replace('Z', "+00:00");
    let zoned = DateTime::parse_from_rfc3339(&zoned).ok().or_else(|| {
        ZONED_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(&zoned, format).ok())
    });
    if let Some(dt) = zoned {
        return Some(dt.timestamp());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().timestamp())
}

/// First and last second (both inclusive) of the UTC day containing `ts`. Fails for timestamps
/// outside the representable calendar.
pub fn utc_day_bounds(ts: i64) -> Result<(i64, i64)> {
    let start = DateTime::<Utc>::from_timestamp(ts, 0)
        .and_then(|dt| dt.date_naive().and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
        .ok_or_else(invalid_ts)?;
    let end = start
        .checked_add(SECONDS_PER_DAY - 1)
        .ok_or_else(invalid_ts)?;
    Ok((start, end))
}

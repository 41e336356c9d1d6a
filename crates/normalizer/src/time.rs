use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Coerces one JSON scalar into a UTC timestamp.
///
/// Accepted encodings, tried in order:
/// - RFC 3339 strings (`2024-01-01T12:00:00Z`, with offset);
/// - naive datetime strings (`2024-01-01T12:00:00`, `2024-01-01 12:00:00`),
///   taken as UTC;
/// - date-only strings (`2024-01-01`), taken as midnight UTC;
/// - integers, as Unix seconds;
/// - floats, as Unix seconds with a fractional part.
///
/// Returns `None` for anything else; the caller turns that into an
/// `UnparseableTime` error naming the offending record.
pub fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_time_string(s),
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                let f = n.as_f64()?;
                if !f.is_finite() {
                    return None;
                }
                // Seconds round toward negative infinity so the nanosecond
                // part always counts forward, keeping negative inputs exact.
                let secs = f.floor() as i64;
                let nanos = ((f - f.floor()) * 1e9) as u32;
                DateTime::from_timestamp(secs, nanos)
            }
        }
        _ => None,
    }
}

fn parse_time_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

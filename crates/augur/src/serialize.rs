//! JSON-safe rendering of typed cells for preview samples.
//!
//! Total by construction: every cell variant maps to a JSON scalar or null,
//! and repeated calls on the same value yield identical output.

use chrono::{Duration, NaiveDateTime};
use serde_json::Value;

use crate::schema::CellValue;

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Render one typed cell as a JSON value.
pub fn cell_to_json(cell: Option<&CellValue>) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };

    match cell {
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Int(i) => Value::from(*i),
        // JSON has no NaN or infinity; non-finite floats degrade to null.
        CellValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Complex(c) => Value::String(c.to_string()),
        CellValue::Datetime(dt) => Value::String(format_datetime(dt)),
        CellValue::Timedelta(d) => Value::String(format_timedelta(d)),
        CellValue::Str(s) => Value::String(s.clone()),
    }
}

/// Fixed preview format for date/time values.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Human-readable interval string: `"{days} days [+]HH:MM:SS[.ffffff]"`.
///
/// The clock component is always non-negative; a negative interval carries
/// the sign on the day count and a `+` before the clock, so
/// `-428 days +19:23:03.487674` reads the way it was written.
pub fn format_timedelta(d: &Duration) -> String {
    // num_microseconds is None past ~292k years; fall back to millisecond
    // precision there rather than failing.
    let micros = d
        .num_microseconds()
        .unwrap_or_else(|| d.num_milliseconds().saturating_mul(1000));

    let days = micros.div_euclid(MICROS_PER_DAY);
    let rem = micros.rem_euclid(MICROS_PER_DAY);

    let hours = rem / 3_600_000_000;
    let minutes = (rem / 60_000_000) % 60;
    let seconds = (rem / 1_000_000) % 60;
    let frac = rem % 1_000_000;

    let sign = if days < 0 { "+" } else { "" };
    if frac == 0 {
        format!("{days} days {sign}{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{days} days {sign}{hours:02}:{minutes:02}:{seconds:02}.{frac:06}")
    }
}

/// Structurally re-render an arbitrary JSON document, recursing through
/// arrays and objects and leaving scalars untouched. Exists so callers can
/// funnel already-structured data through the same totality guarantee.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, sanitize(v))).collect())
        }
        scalar => scalar,
    }
}

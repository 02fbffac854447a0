// File: crates/line-core/src/series.rs
// Summary: Raw series probing and normalization into ordered `Point`s.
// Notes:
// - The input shape is decided once, from the first element, and applied to
//   every element. Nothing is filtered here: NaN values survive so the line
//   can break at them while their markers are still drawn.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{kind_of, LineError, Result};

/// First x above this is read as epoch milliseconds.
pub const EPOCH_MILLIS_THRESHOLD: f64 = 1_000_000_000_000.0;
/// First x above this (and not above millis) is read as epoch seconds.
pub const EPOCH_SECONDS_THRESHOLD: f64 = 1_000_000_000.0;

/// Largest instant magnitude a calendar date may take, in epoch millis.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// One normalized observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Calendar instant; `None` when the raw value is not a valid date.
    pub t: Option<DateTime<Utc>>,
    /// Identity key used for cross-chart highlighting.
    /// Record-form input (`{Date, Price}`) never carries one.
    pub x: Option<f64>,
    pub y: f64,
}

impl Point {
    /// Epoch milliseconds of `t`, NaN for an invalid date.
    pub fn t_millis(&self) -> f64 {
        self.t.map(|t| t.timestamp_millis() as f64).unwrap_or(f64::NAN)
    }

    pub fn identity(&self) -> Option<f64> {
        self.x
    }

    /// A point is drawn on the line only when both coordinates are numbers.
    pub fn is_defined(&self) -> bool {
        !self.t_millis().is_nan() && !self.y.is_nan()
    }
}

/// Input format, decided from the first element of the series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesShape {
    /// `[x, y]` pairs with x in epoch milliseconds.
    EpochMillis,
    /// `[x, y]` pairs with x in epoch seconds.
    EpochSeconds,
    /// `{Date, Price}` objects. Points built from these have no identity key.
    Records,
}

impl SeriesShape {
    pub fn probe(first: &Value) -> Result<Self> {
        match first {
            Value::Array(pair) => {
                let start = pair.first().map(coerce_number).unwrap_or(f64::NAN);
                if start > EPOCH_MILLIS_THRESHOLD {
                    Ok(SeriesShape::EpochMillis)
                } else if start > EPOCH_SECONDS_THRESHOLD {
                    Ok(SeriesShape::EpochSeconds)
                } else {
                    Err(LineError::UnrecognizedShape(format!(
                        "pair x {start} is not an epoch timestamp in seconds or milliseconds"
                    )))
                }
            }
            Value::Object(_) => Ok(SeriesShape::Records),
            other => Err(LineError::UnrecognizedShape(format!(
                "expected an [x, y] pair or a {{Date, Price}} record, got {}",
                kind_of(other)
            ))),
        }
    }

    fn point(self, raw: &Value) -> Point {
        match self {
            SeriesShape::EpochMillis | SeriesShape::EpochSeconds => {
                let (x, y) = match raw {
                    Value::Array(pair) => (
                        pair.first().map(coerce_number).unwrap_or(f64::NAN),
                        pair.get(1).map(coerce_number).unwrap_or(f64::NAN),
                    ),
                    _ => (f64::NAN, f64::NAN),
                };
                let ms = if self == SeriesShape::EpochSeconds { x * 1000.0 } else { x };
                Point { t: instant_from_millis(ms), x: Some(x), y }
            }
            SeriesShape::Records => {
                let t = raw.get("Date").and_then(parse_date);
                let y = raw.get("Price").map(coerce_number).unwrap_or(f64::NAN);
                Point { t, x: None, y }
            }
        }
    }
}

/// Normalize a raw series into points, preserving input order.
pub fn normalize(series: &Value) -> Result<Vec<Point>> {
    let items = series.as_array().ok_or(LineError::NotASeries(kind_of(series)))?;
    let first = items.first().ok_or(LineError::EmptySeries)?;
    let shape = SeriesShape::probe(first)?;
    debug!(?shape, len = items.len(), "normalizing series");

    let points: Vec<Point> = items.iter().map(|raw| shape.point(raw)).collect();
    let undated = points.iter().filter(|p| p.t.is_none()).count();
    if undated > 0 {
        warn!(undated, "series has points without a valid date");
    }
    Ok(points)
}

/// Numeric coercion with the same rules as a JavaScript `* 1`.
pub fn coerce_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_str(s),
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        // Single-element arrays coerce through their only member.
        Value::Array(a) if a.is_empty() => 0.0,
        Value::Array(a) if a.len() == 1 => match &a[0] {
            Value::Array(_) | Value::Object(_) => f64::NAN,
            inner => coerce_str(&inner_as_str(inner)),
        },
        _ => f64::NAN,
    }
}

fn inner_as_str(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn coerce_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map(|v| v as f64).unwrap_or(f64::NAN);
        }
    }
    // Rust accepts "inf"/"nan" spellings that JavaScript does not.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a `Date` field the way the browser's `new Date(value)` would for
/// the formats wiki data actually carries.
pub fn parse_date(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Number(n) => instant_from_millis(n.as_f64()?),
        Value::Null => instant_from_millis(0.0),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    const NAIVE: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];
    NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|n| n.and_utc())
}

/// Milliseconds to an instant, truncating toward zero; out of range is `None`.
pub fn instant_from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion_matches_script_rules() {
        assert_eq!(coerce_number(&json!("10.5")), 10.5);
        assert_eq!(coerce_number(&json!(" 42 ")), 42.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!("0x1F")), 31.0);
        assert_eq!(coerce_number(&json!(["7"])), 7.0);
        assert!(coerce_number(&json!("inf")).is_nan());
        assert!(coerce_number(&json!("12abc")).is_nan());
        assert!(coerce_number(&json!({"a": 1})).is_nan());
        assert_eq!(coerce_number(&json!("-Infinity")), f64::NEG_INFINITY);
    }

    #[test]
    fn date_strings() {
        let d = parse_date(&json!("2020-01-01")).unwrap();
        assert_eq!(d.timestamp_millis(), 1_577_836_800_000);
        let d = parse_date(&json!("2020-01-01T12:30:00Z")).unwrap();
        assert_eq!(d.timestamp_millis(), 1_577_836_800_000 + 45_000_000);
        let d = parse_date(&json!("2020-01-01 06:00:00")).unwrap();
        assert_eq!(d.timestamp_millis(), 1_577_836_800_000 + 21_600_000);
        assert!(parse_date(&json!("yesterday")).is_none());
        assert!(parse_date(&json!(f64::MAX)).is_none());
    }
}

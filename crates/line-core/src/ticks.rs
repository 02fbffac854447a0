// File: crates/line-core/src/ticks.rs
// Summary: Tick placement and tick labels for linear and UTC time scales.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Integer tick index range and increment. A negative increment means
/// "divide by `-inc`", which keeps decimal ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (i1, i2, inc) = if power < 0.0 {
        let n = 10f64.powf(-power) / factor;
        let mut i1 = (start * n).round();
        let mut i2 = (stop * n).round();
        if i1 / n < start {
            i1 += 1.0;
        }
        if i2 / n > stop {
            i2 -= 1.0;
        }
        (i1, i2, -n)
    } else {
        let n = 10f64.powf(power) * factor;
        let mut i1 = (start / n).round();
        let mut i2 = (stop / n).round();
        if i1 * n < start {
            i1 += 1.0;
        }
        if i2 * n > stop {
            i2 -= 1.0;
        }
        (i1, i2, n)
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Roughly `count` evenly spaced "nice" values in `[start, stop]`, in the
/// order of the arguments.
pub fn linear_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Spacing between the ticks `linear_ticks` would produce.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Decimal places needed to tell apart ticks `step` apart.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Fixed-point number with thousands grouping and a typographic minus.
pub fn format_fixed(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    let body = format!("{:.*}", decimals, v.abs());
    let (int, frac) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac {
        grouped.push('.');
        grouped.push_str(f);
    }
    let negative = v < 0.0 && body.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative { format!("\u{2212}{grouped}") } else { grouped }
}

/// UTC calendar interval used to space time ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    Millis(i64),
    Second(i64),
    Minute(i64),
    Hour(i64),
    Day(i64),
    Week,
    Month(i64),
    Year(i64),
}

const LADDER: [(TimeInterval, i64); 18] = [
    (TimeInterval::Second(1), SECOND),
    (TimeInterval::Second(5), 5 * SECOND),
    (TimeInterval::Second(15), 15 * SECOND),
    (TimeInterval::Second(30), 30 * SECOND),
    (TimeInterval::Minute(1), MINUTE),
    (TimeInterval::Minute(5), 5 * MINUTE),
    (TimeInterval::Minute(15), 15 * MINUTE),
    (TimeInterval::Minute(30), 30 * MINUTE),
    (TimeInterval::Hour(1), HOUR),
    (TimeInterval::Hour(3), 3 * HOUR),
    (TimeInterval::Hour(6), 6 * HOUR),
    (TimeInterval::Hour(12), 12 * HOUR),
    (TimeInterval::Day(1), DAY),
    (TimeInterval::Day(2), 2 * DAY),
    (TimeInterval::Week, WEEK),
    (TimeInterval::Month(1), MONTH),
    (TimeInterval::Month(3), 3 * MONTH),
    (TimeInterval::Year(1), YEAR),
];

impl TimeInterval {
    /// Interval whose spacing is closest to `|stop - start| / count`.
    pub fn choose(start_ms: f64, stop_ms: f64, count: f64) -> Self {
        let target = (stop_ms - start_ms).abs() / count;
        let i = LADDER.partition_point(|&(_, d)| d as f64 <= target);
        if i == LADDER.len() {
            let years = tick_step(start_ms / YEAR as f64, stop_ms / YEAR as f64, count).abs();
            return TimeInterval::Year((years.round() as i64).max(1));
        }
        if i == 0 {
            let ms = tick_step(start_ms, stop_ms, count).abs().max(1.0);
            return TimeInterval::Millis(ms.round() as i64);
        }
        let (below, below_d) = LADDER[i - 1];
        let (above, above_d) = LADDER[i];
        if target / (below_d as f64) < (above_d as f64) / target { below } else { above }
    }

    /// Interval boundaries in `[start_ms, stop_ms]`. Stops early at the end
    /// of the representable calendar instead of wrapping.
    pub fn range(self, start_ms: i64, stop_ms: i64) -> Vec<i64> {
        let mut out = Vec::new();
        match self {
            TimeInterval::Millis(k) => {
                let base = start_ms.div_euclid(k).checked_mul(k);
                let mut t = base.and_then(|b| if b < start_ms { b.checked_add(k) } else { Some(b) });
                while let Some(ms) = t.filter(|&ms| ms <= stop_ms) {
                    out.push(ms);
                    t = ms.checked_add(k);
                }
            }
            TimeInterval::Year(n) => {
                let Some(first) = DateTime::from_timestamp_millis(start_ms) else { return out };
                let mut year = first.year();
                if year_start(year).map_or(true, |ms| ms < start_ms) {
                    year += 1;
                }
                let n = i32::try_from(n).unwrap_or(i32::MAX);
                let Some(aligned) = year.checked_add((n - year.rem_euclid(n)) % n) else { return out };
                year = aligned;
                while let Some(ms) = year_start(year).filter(|&ms| ms <= stop_ms) {
                    out.push(ms);
                    let Some(next) = year.checked_add(n) else { break };
                    year = next;
                }
            }
            _ => {
                let mut t = self.unit_floor(start_ms);
                if t < start_ms {
                    match self.unit_next(t) {
                        Some(next) => t = next,
                        None => return out,
                    }
                }
                while t <= stop_ms {
                    if self.keeps(t) {
                        out.push(t);
                    }
                    match self.unit_next(t) {
                        Some(next) if next > t => t = next,
                        _ => break,
                    }
                }
            }
        }
        out
    }

    fn unit_floor(self, ms: i64) -> i64 {
        match self {
            TimeInterval::Millis(_) => ms,
            TimeInterval::Second(_) => ms.div_euclid(SECOND) * SECOND,
            TimeInterval::Minute(_) => ms.div_euclid(MINUTE) * MINUTE,
            TimeInterval::Hour(_) => ms.div_euclid(HOUR) * HOUR,
            TimeInterval::Day(_) => ms.div_euclid(DAY) * DAY,
            TimeInterval::Week => sunday_floor(ms),
            TimeInterval::Month(_) => month_floor(ms),
            TimeInterval::Year(_) => year_floor(ms),
        }
    }

    /// Next unit boundary, `None` past the end of the calendar.
    fn unit_next(self, floored: i64) -> Option<i64> {
        match self {
            TimeInterval::Millis(k) => floored.checked_add(k),
            TimeInterval::Second(_) => floored.checked_add(SECOND),
            TimeInterval::Minute(_) => floored.checked_add(MINUTE),
            TimeInterval::Hour(_) => floored.checked_add(HOUR),
            TimeInterval::Day(_) => floored.checked_add(DAY),
            TimeInterval::Week => floored.checked_add(WEEK),
            TimeInterval::Month(_) => add_months(floored, 1),
            TimeInterval::Year(_) => add_months(floored, 12),
        }
    }

    /// Whether a unit boundary falls on this interval's stride.
    fn keeps(self, ms: i64) -> bool {
        let Some(dt) = DateTime::from_timestamp_millis(ms) else { return false };
        match self {
            TimeInterval::Millis(_) | TimeInterval::Week => true,
            TimeInterval::Second(n) => ms.div_euclid(SECOND).rem_euclid(60) % n == 0,
            TimeInterval::Minute(n) => ms.div_euclid(MINUTE).rem_euclid(60) % n == 0,
            TimeInterval::Hour(n) => ms.div_euclid(HOUR).rem_euclid(24) % n == 0,
            TimeInterval::Day(n) => i64::from(dt.day0()) % n == 0,
            TimeInterval::Month(n) => i64::from(dt.month0()) % n == 0,
            TimeInterval::Year(n) => i64::from(dt.year()).rem_euclid(n) == 0,
        }
    }
}

fn sunday_floor(ms: i64) -> i64 {
    let days = ms.div_euclid(DAY);
    // 1970-01-01 was a Thursday.
    let since_sunday = (days + 4).rem_euclid(7);
    (days - since_sunday) * DAY
}

fn month_floor(ms: i64) -> i64 {
    DateTime::from_timestamp_millis(ms)
        .and_then(|dt| NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc().timestamp_millis())
        .unwrap_or(ms)
}

fn year_floor(ms: i64) -> i64 {
    DateTime::from_timestamp_millis(ms)
        .and_then(|dt| year_start(dt.year()))
        .unwrap_or(ms)
}

fn year_start(year: i32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc().timestamp_millis())
}

fn add_months(month_start_ms: i64, months: i32) -> Option<i64> {
    let dt = DateTime::from_timestamp_millis(month_start_ms)?;
    let total = dt.year() * 12 + dt.month0() as i32 + months;
    NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc().timestamp_millis())
}

/// Label for a time tick, picking the coarsest field that is not at its
/// boundary: `.%L`, `:%S`, `%I:%M`, `%I %p`, `%a %d` / `%b %d`, `%B`, `%Y`.
pub fn format_time_tick(ms: i64) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(ms) else {
        return "Invalid Date".to_string();
    };
    let fmt = if ms.rem_euclid(SECOND) != 0 {
        return format!(".{:03}", ms.rem_euclid(SECOND));
    } else if ms.rem_euclid(MINUTE) != 0 {
        ":%S"
    } else if ms.rem_euclid(HOUR) != 0 {
        "%I:%M"
    } else if ms.rem_euclid(DAY) != 0 {
        "%I %p"
    } else if month_floor(ms) < ms {
        if sunday_floor(ms) < ms { "%a %d" } else { "%b %d" }
    } else if year_floor(ms) < ms {
        "%B"
    } else {
        "%Y"
    };
    dt.format(fmt).to_string()
}

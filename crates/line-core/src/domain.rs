// File: crates/line-core/src/domain.rs
// Summary: Axis domains, rounded outward to a power-of-ten step.

use tracing::debug;

use crate::error::{LineError, Result};

/// Closed `[min, max]` interval on one axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// A step of `10^exp` kept exact for negative exponents by dividing by the
/// integral power instead of multiplying by its inexact reciprocal.
#[derive(Clone, Copy, Debug)]
struct DecimalStep {
    exp: i32,
}

impl DecimalStep {
    fn covering(width: f64) -> Self {
        Self { exp: width.log10().floor() as i32 }
    }

    fn value(self) -> f64 {
        if self.exp >= 0 { 10f64.powi(self.exp) } else { 1.0 / 10f64.powi(-self.exp) }
    }

    fn floor(self, v: f64) -> f64 {
        self.snap(v, f64::floor)
    }

    fn ceil(self, v: f64) -> f64 {
        self.snap(v, f64::ceil)
    }

    fn snap(self, v: f64, round: fn(f64) -> f64) -> f64 {
        if self.exp >= 0 {
            let step = 10f64.powi(self.exp);
            step * round(v / step)
        } else {
            let inv = 10f64.powi(-self.exp);
            round(v * inv) / inv
        }
    }
}

/// Plain `[min, max]` over finite values, `None` when there are none.
pub fn raw_extent<I>(values: I) -> Option<Domain>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<Domain>, v| match acc {
            None => Some(Domain::new(v, v)),
            Some(d) => Some(Domain::new(d.min.min(v), d.max.max(v))),
        })
}

/// Half-width given to a single-instant time extent: one day in millis.
pub const MIN_TIME_PAD_MS: f64 = 86_400_000.0;

/// Finite `[min, max]`, telling an empty input apart from an all-NaN one.
fn finite_extent<I>(values: I) -> Result<Domain>
where
    I: IntoIterator<Item = f64>,
{
    let mut seen = false;
    let raw = raw_extent(values.into_iter().inspect(|_| seen = true));
    match raw {
        Some(d) => Ok(d),
        None if seen => Err(LineError::NoFiniteValues),
        None => Err(LineError::EmptySeries),
    }
}

fn round_out(lo: f64, hi: f64) -> Domain {
    let step = DecimalStep::covering(hi - lo);
    Domain::new(step.floor(lo), step.ceil(hi))
}

/// Data extent rounded outward to the power-of-ten step covering its width.
///
/// Non-finite values are skipped. A zero-width extent widens by one step of
/// its own magnitude on each side (one unit when the value is zero).
pub fn extent<I>(values: I) -> Result<Domain>
where
    I: IntoIterator<Item = f64>,
{
    let raw = finite_extent(values)?;
    let (lo, hi) = (raw.min, raw.max);
    let nice = if raw.span() > 0.0 {
        round_out(lo, hi)
    } else {
        let step = if lo == 0.0 { DecimalStep { exp: 0 } } else { DecimalStep::covering(lo.abs()) };
        let pad = step.value();
        Domain::new(step.floor(lo - pad), step.ceil(hi + pad))
    };
    debug!(lo, hi, min = nice.min, max = nice.max, "rounded domain");
    Ok(nice)
}

/// `extent` for epoch-millis values. A single instant widens by a day on
/// each side before rounding, so the axis shows days rather than decades.
pub fn time_extent<I>(millis: I) -> Result<Domain>
where
    I: IntoIterator<Item = f64>,
{
    let raw = finite_extent(millis)?;
    if raw.span() > 0.0 {
        return extent([raw.min, raw.max]);
    }
    let nice = round_out(raw.min - MIN_TIME_PAD_MS, raw.max + MIN_TIME_PAD_MS);
    debug!(at = raw.min, min = nice.min, max = nice.max, "widened single-instant time domain");
    Ok(nice)
}

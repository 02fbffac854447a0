// File: crates/line-core/src/scale.rs
// Summary: Time (X) and linear value (Y) scales mapping domains onto pixel ranges.

use chrono::{DateTime, Utc};

use crate::domain::Domain;
use crate::ticks::{format_fixed, linear_ticks, precision_fixed, tick_step, format_time_tick, TimeInterval};

/// Domain → pixel transform with tick generation, shared by both axes.
pub trait Scale {
    /// Data value to pixel position. NaN in, NaN out.
    fn map(&self, v: f64) -> f64;
    /// Pixel position back to data value.
    fn invert(&self, px: f64) -> f64;
    /// Roughly `count` tick values inside the domain.
    fn ticks(&self, count: f64) -> Vec<f64>;
    /// Label formatter for ticks produced with the same `count`.
    fn tick_format(&self, count: f64) -> Box<dyn Fn(f64) -> String>;
    fn domain(&self) -> Domain;
    fn range(&self) -> (f64, f64);
}

/// Interpolation shared by both scales.
#[derive(Clone, Copy, Debug)]
struct Affine {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl Affine {
    fn new(domain: Domain, range: (f64, f64)) -> Self {
        let (mut d0, mut d1) = (domain.min, domain.max);
        // keep the transform invertible for single-valued domains
        if (d1 - d0).abs() < 1e-12 {
            d0 -= 0.5;
            d1 += 0.5;
        }
        Self { d0, d1, r0: range.0, r1: range.1 }
    }
    #[inline]
    fn map(&self, v: f64) -> f64 {
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }
    #[inline]
    fn invert(&self, px: f64) -> f64 {
        self.d0 + (px - self.r0) / (self.r1 - self.r0) * (self.d1 - self.d0)
    }
}

/// Vertical value scale. The range is usually `[bottom, top]` so larger
/// values sit higher on screen.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    domain: Domain,
    range: (f64, f64),
    affine: Affine,
    /// Fixed tick label precision; derived from the tick step when `None`.
    pub precision: Option<usize>,
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        Self { domain, range, affine: Affine::new(domain, range), precision: None }
    }

    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }
}

impl Scale for LinearScale {
    fn map(&self, v: f64) -> f64 {
        self.affine.map(v)
    }
    fn invert(&self, px: f64) -> f64 {
        self.affine.invert(px)
    }
    fn ticks(&self, count: f64) -> Vec<f64> {
        linear_ticks(self.domain.min, self.domain.max, count)
    }
    fn tick_format(&self, count: f64) -> Box<dyn Fn(f64) -> String> {
        let decimals = self
            .precision
            .unwrap_or_else(|| precision_fixed(tick_step(self.domain.min, self.domain.max, count)));
        Box::new(move |v| format_fixed(v, decimals))
    }
    fn domain(&self) -> Domain {
        self.domain
    }
    fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Horizontal UTC time scale; domain values are epoch milliseconds.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    domain: Domain,
    range: (f64, f64),
    affine: Affine,
}

impl TimeScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        Self { domain, range, affine: Affine::new(domain, range) }
    }

    /// Interval the ticks are spaced on for a given tick count.
    pub fn interval(&self, count: f64) -> TimeInterval {
        TimeInterval::choose(self.domain.min, self.domain.max, count)
    }
}

impl Scale for TimeScale {
    fn map(&self, v: f64) -> f64 {
        self.affine.map(v)
    }
    fn invert(&self, px: f64) -> f64 {
        self.affine.invert(px)
    }
    fn ticks(&self, count: f64) -> Vec<f64> {
        if !(count > 0.0) || !self.domain.min.is_finite() || !self.domain.max.is_finite() {
            return Vec::new();
        }
        let (lo, hi) = if self.domain.min <= self.domain.max {
            (self.domain.min, self.domain.max)
        } else {
            (self.domain.max, self.domain.min)
        };
        // Ticks only exist where a calendar date does.
        let first = DateTime::<Utc>::MIN_UTC.timestamp_millis() as f64;
        let last = DateTime::<Utc>::MAX_UTC.timestamp_millis() as f64;
        let (lo, hi) = (lo.clamp(first, last), hi.clamp(first, last));
        TimeInterval::choose(lo, hi, count)
            .range(lo.ceil() as i64, hi.floor() as i64)
            .into_iter()
            .map(|ms| ms as f64)
            .collect()
    }
    fn tick_format(&self, _count: f64) -> Box<dyn Fn(f64) -> String> {
        Box::new(|v| format_time_tick(v as i64))
    }
    fn domain(&self) -> Domain {
        self.domain
    }
    fn range(&self) -> (f64, f64) {
        self.range
    }
}

// File: crates/line-core/src/line.rs
// Summary: Path generator turning data into SVG path data, broken at undefined points.

use serde::{Deserialize, Serialize};

use crate::svg::num;

/// Interpolation between consecutive defined points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    #[default]
    Linear,
    /// Horizontal then vertical: each value holds until the next point.
    StepAfter,
}

/// Sub-paths of one generated line, in pixel space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinePath {
    pub curve: Curve,
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl LinePath {
    /// SVG path data with coordinates rounded to three decimals.
    /// A segment with a single point is closed so it still renders as a dot.
    pub fn to_path_data(&self) -> String {
        let mut d = String::new();
        for seg in &self.segments {
            let Some(&(x0, y0)) = seg.first() else { continue };
            d.push_str(&format!("M{},{}", coord(x0), coord(y0)));
            let mut prev = (x0, y0);
            for &(x, y) in &seg[1..] {
                if self.curve == Curve::StepAfter {
                    d.push_str(&format!("L{},{}", coord(x), coord(prev.1)));
                }
                d.push_str(&format!("L{},{}", coord(x), coord(y)));
                prev = (x, y);
            }
            if seg.len() == 1 {
                d.push('Z');
            }
        }
        d
    }
}

fn coord(v: f64) -> String {
    num((v * 1000.0).round() / 1000.0)
}

/// Builds a `LinePath` from items through pixel accessors.
pub struct LineGenerator<T> {
    x: Box<dyn Fn(&T) -> f64>,
    y: Box<dyn Fn(&T) -> f64>,
    defined: Option<Box<dyn Fn(&T) -> bool>>,
    curve: Curve,
}

impl<T> LineGenerator<T> {
    pub fn new(x: impl Fn(&T) -> f64 + 'static, y: impl Fn(&T) -> f64 + 'static) -> Self {
        Self { x: Box::new(x), y: Box::new(y), defined: None, curve: Curve::Linear }
    }

    /// Points failing `defined` break the line. Without a predicate a point
    /// is defined when both pixel coordinates are numbers.
    pub fn defined(mut self, defined: impl Fn(&T) -> bool + 'static) -> Self {
        self.defined = Some(Box::new(defined));
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn generate(&self, data: &[T]) -> LinePath {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for item in data {
            let (x, y) = ((self.x)(item), (self.y)(item));
            let ok = match &self.defined {
                Some(f) => f(item),
                None => !x.is_nan() && !y.is_nan(),
            };
            if ok {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        LinePath { curve: self.curve, segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_splits_path() {
        let data = [(1.0, 1.0), (2.0, f64::NAN), (3.0, 3.0), (4.0, 2.0)];
        let path = LineGenerator::new(|p: &(f64, f64)| p.0 * 10.0, |p: &(f64, f64)| p.1 * 10.0).generate(&data);
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.to_path_data(), "M10,10ZM30,30L40,20");
    }

    #[test]
    fn step_after_holds_value() {
        let data = [(0.0, 0.0), (1.0, 1.0)];
        let path = LineGenerator::new(|p: &(f64, f64)| p.0, |p: &(f64, f64)| p.1)
            .curve(Curve::StepAfter)
            .generate(&data);
        assert_eq!(path.to_path_data(), "M0,0L1,0L1,1");
    }

    #[test]
    fn coordinates_round_to_three_places() {
        let data = [(0.12345, 1.0 / 3.0), (2.0, 2.0)];
        let path = LineGenerator::new(|p: &(f64, f64)| p.0, |p: &(f64, f64)| p.1).generate(&data);
        assert_eq!(path.to_path_data(), "M0.123,0.333L2,2");
    }
}

// File: crates/line-core/tests/domain.rs
// Purpose: Outward power-of-ten rounding of axis domains and its degenerate cases.

use line_core::{extent, Domain, LineError};

fn assert_close(got: Domain, min: f64, max: f64) {
    assert!((got.min - min).abs() < 1e-12, "min {} != {}", got.min, min);
    assert!((got.max - max).abs() < 1e-12, "max {} != {}", got.max, max);
}

#[test]
fn rounds_to_tens() {
    assert_eq!(extent([12.0, 40.0, 87.0]).unwrap(), Domain::new(10.0, 90.0));
}

#[test]
fn rounds_to_hundredths() {
    assert_close(extent([0.012, 0.05, 0.087]).unwrap(), 0.01, 0.09);
}

#[test]
fn rounds_large_epoch_ranges() {
    // ten days of millis: step is 1e8
    let lo = 1_700_000_000_000.0;
    let hi = lo + 864_000_000.0;
    let d = extent([lo, hi]).unwrap();
    assert_eq!(d, Domain::new(1_700_000_000_000.0, 1_700_900_000_000.0));
    assert!(d.contains(lo) && d.contains(hi));
}

#[test]
fn negative_values_round_away_from_zero() {
    assert_eq!(extent([-12.0, 87.0]).unwrap(), Domain::new(-20.0, 90.0));
}

#[test]
fn zero_width_gets_a_minimal_span() {
    assert_eq!(extent([50.0, 50.0]).unwrap(), Domain::new(40.0, 60.0));
    assert_eq!(extent([0.0]).unwrap(), Domain::new(-1.0, 1.0));
    assert_close(extent([0.25]).unwrap(), 0.1, 0.4);
}

#[test]
fn nan_values_are_skipped() {
    assert_eq!(extent([12.0, f64::NAN, 87.0]).unwrap(), Domain::new(10.0, 90.0));
}

#[test]
fn empty_and_all_nan_fail() {
    assert!(matches!(extent(Vec::<f64>::new()), Err(LineError::EmptySeries)));
    assert!(matches!(extent([f64::NAN, f64::INFINITY]), Err(LineError::NoFiniteValues)));
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    trivial = { 1, 0.8, 1.2 },
    easy = { 2, 0.7, 1.3 },
    medium = { 3, 0.6, 1.4 },
    hard = { 4, 0.5, 1.5 },
    extreme = { 5, 0.4, 1.6 },
)]
fn factors_widen_with_complexity(level: u8, min: f64, max: f64) {
    let (lo, hi) = complexity_factors(Complexity::new(level).unwrap());
    assert!((lo - min).abs() < f64::EPSILON);
    assert!((hi - max).abs() < f64::EPSILON);
}

#[parameterized(
    zero = { 0.0 },
    negative = { -5.0 },
    nan = { f64::NAN },
)]
fn estimate_rejects_bad_hours(hours: f64) {
    let result = MonteCarloEstimator::new().estimate(hours, Complexity::default());
    assert!(matches!(result, Err(Error::InvalidHours(_))));
}

#[test]
fn estimate_mean_is_near_the_input() {
    // complexity 3 noise is U(0.6, 1.4), mean 1.0; with 1000 samples the
    // sample mean stays well within 10% of 20 hours
    let estimate = MonteCarloEstimator::new()
        .estimate(20.0, Complexity::new(3).unwrap())
        .unwrap();
    assert!(
        (estimate.mean_duration - 20.0).abs() < 2.0,
        "mean {} too far from 20",
        estimate.mean_duration
    );
}

#[test]
fn estimate_samples_stay_in_the_factor_range() {
    let estimate = MonteCarloEstimator::new()
        .estimate(10.0, Complexity::new(1).unwrap())
        .unwrap();
    assert!(estimate.confidence_interval.0 >= 10.0 * 0.8);
    assert!(estimate.confidence_interval.1 <= 10.0 * 1.2);
    assert!(estimate.p80_duration >= estimate.confidence_interval.0);
    assert!(estimate.p80_duration <= estimate.confidence_interval.1);
}

#[test]
fn estimate_percentiles_are_ordered() {
    let estimate = MonteCarloEstimator::new()
        .estimate(40.0, Complexity::new(5).unwrap())
        .unwrap();
    let (p5, p95) = estimate.confidence_interval;
    assert!(p5 <= estimate.mean_duration);
    assert!(estimate.mean_duration <= p95);
    assert!(p5 <= estimate.p80_duration && estimate.p80_duration <= p95);
}

#[test]
fn low_complexity_is_low_risk() {
    // complexity 1 caps samples at 1.2x, below the 1.3x risk threshold
    let estimate = MonteCarloEstimator::new()
        .estimate(10.0, Complexity::new(1).unwrap())
        .unwrap();
    assert_eq!(estimate.risk_level, RiskLevel::Low);
}

#[test]
fn high_complexity_raises_the_spread() {
    let narrow = MonteCarloEstimator::new()
        .estimate(20.0, Complexity::new(1).unwrap())
        .unwrap();
    let wide = MonteCarloEstimator::new()
        .estimate(20.0, Complexity::new(5).unwrap())
        .unwrap();
    assert!(wide.std_duration > narrow.std_duration);
}

#[test]
fn estimate_echoes_its_inputs() {
    let estimate = MonteCarloEstimator::new()
        .estimate(12.5, Complexity::new(2).unwrap())
        .unwrap();
    assert!((estimate.estimated_hours - 12.5).abs() < f64::EPSILON);
    assert_eq!(estimate.complexity.level(), 2);
}

#[parameterized(
    low = { RiskLevel::Low, "low" },
    medium = { RiskLevel::Medium, "medium" },
    high = { RiskLevel::High, "high" },
)]
fn risk_level_as_str(level: RiskLevel, expected: &str) {
    assert_eq!(level.as_str(), expected);
}

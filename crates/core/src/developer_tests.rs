// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn dev(availability: f64, workload: f64) -> Developer {
    let mut dev = Developer::new(1, "Alice", ["backend"], availability, 3).unwrap();
    dev.current_workload = workload;
    dev
}

#[test]
fn new_starts_with_no_workload() {
    let dev = Developer::new(1, "Alice", ["Backend", "SQL"], 40.0, 4).unwrap();
    assert_eq!(dev.current_workload, 0.0);
    assert!(dev.skills.contains("backend"));
    assert!(dev.skills.contains("sql"));
}

#[parameterized(
    zero = { 0.0 },
    negative = { -10.0 },
    nan = { f64::NAN },
)]
fn new_rejects_bad_availability(availability: f64) {
    let result = Developer::new(1, "Alice", ["backend"], availability, 3);
    assert!(matches!(result, Err(Error::InvalidAvailability(_))));
}

#[parameterized(
    zero = { 0 },
    six = { 6 },
)]
fn new_rejects_bad_experience(level: u8) {
    let result = Developer::new(1, "Alice", ["backend"], 40.0, level);
    assert!(matches!(result, Err(Error::InvalidExperience(l)) if l == level));
}

#[parameterized(
    idle = { 40.0, 0.0, 0.0 },
    half = { 40.0, 20.0, 0.5 },
    full = { 40.0, 40.0, 1.0 },
    over = { 40.0, 60.0, 1.5 },
)]
fn workload_ratio(availability: f64, workload: f64, expected: f64) {
    assert!((dev(availability, workload).workload_ratio() - expected).abs() < 1e-9);
}

#[parameterized(
    fits_exactly = { 40.0, 30.0, 10.0, true },
    fits_with_room = { 40.0, 10.0, 10.0, true },
    over_by_a_little = { 40.0, 38.0, 10.0, false },
    already_full = { 40.0, 40.0, 0.1, false },
)]
fn capacity_gate(availability: f64, workload: f64, hours: f64, expected: bool) {
    assert_eq!(dev(availability, workload).has_capacity_for(hours), expected);
}

#[test]
fn remaining_availability_is_headroom() {
    assert!((dev(40.0, 15.0).remaining_availability() - 25.0).abs() < 1e-9);
}

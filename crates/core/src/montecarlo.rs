// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Monte Carlo task-duration estimation.
//!
//! Draws independent multiplicative-noise samples around the estimate with
//! a complexity-dependent spread, and reports distribution statistics plus
//! a coarse risk level.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ticket::Complexity;

/// Number of samples per estimate.
pub const SIMULATION_RUNS: usize = 1000;

/// Coarse schedule-risk classification from the 80th percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// p80 under 1.3x the estimate.
    Low,
    /// p80 under 1.5x the estimate.
    Medium,
    /// p80 at or above 1.5x the estimate.
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Simulated completion-time distribution for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub estimated_hours: f64,
    pub complexity: Complexity,
    pub mean_duration: f64,
    pub std_duration: f64,
    pub p80_duration: f64,
    /// (5th, 95th) percentiles.
    pub confidence_interval: (f64, f64),
    pub risk_level: RiskLevel,
}

/// Multiplicative noise range (min, max) per complexity level.
pub fn complexity_factors(complexity: Complexity) -> (f64, f64) {
    match complexity.level() {
        1 => (0.8, 1.2),
        2 => (0.7, 1.3),
        3 => (0.6, 1.4),
        4 => (0.5, 1.5),
        _ => (0.4, 1.6),
    }
}

/// Monte Carlo duration estimator.
#[derive(Debug, Clone)]
pub struct MonteCarloEstimator {
    runs: usize,
}

impl Default for MonteCarloEstimator {
    fn default() -> Self {
        MonteCarloEstimator { runs: SIMULATION_RUNS }
    }
}

impl MonteCarloEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the completion-time distribution for a task.
    ///
    /// Draws `simulated = estimated_hours * U(min, max)` with the range
    /// given by the complexity level, then reports mean, standard
    /// deviation, p80, the (p5, p95) interval, and the risk level.
    /// Non-positive estimates are rejected before any sampling.
    pub fn estimate(&self, estimated_hours: f64, complexity: Complexity) -> Result<DurationEstimate> {
        if estimated_hours.is_nan() || estimated_hours <= 0.0 {
            return Err(Error::InvalidHours(estimated_hours));
        }

        let (min_factor, max_factor) = complexity_factors(complexity);
        let mut rng = rand::thread_rng();

        let mut samples: Vec<f64> = (0..self.runs)
            .map(|_| estimated_hours * rng.gen_range(min_factor..max_factor))
            .collect();
        samples.sort_by(f64::total_cmp);

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        let p80 = percentile(&samples, 80.0);

        let risk_level = if p80 < estimated_hours * 1.3 {
            RiskLevel::Low
        } else if p80 < estimated_hours * 1.5 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };

        Ok(DurationEstimate {
            estimated_hours,
            complexity,
            mean_duration: mean,
            std_duration: variance.sqrt(),
            p80_duration: p80,
            confidence_interval: (percentile(&samples, 5.0), percentile(&samples, 95.0)),
            risk_level,
        })
    }
}

/// Linear-interpolation percentile over pre-sorted samples.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
#[path = "montecarlo_tests.rs"]
mod tests;

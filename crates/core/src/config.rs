// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration.
//!
//! Tunables for the learned-assignment model and the retry policy, loaded
//! from a TOML file. Every field has a default, so an absent or partial
//! file yields a working configuration. Scoring weights, discretization
//! thresholds, and the simulation sample count are contractual constants
//! and deliberately not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Hyperparameters of the value-table assignment model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RlConfig {
    /// TD update step size (alpha). Fixed across training.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Future-reward discount (gamma).
    #[serde(default = "default_discount_factor")]
    pub discount_factor: f64,
    /// Initial exploration probability (epsilon).
    #[serde(default = "default_exploration_rate")]
    pub exploration_rate: f64,
    /// Lower bound the exploration rate decays toward.
    #[serde(default = "default_exploration_floor")]
    pub exploration_floor: f64,
    /// Multiplicative decay applied after each training pass.
    #[serde(default = "default_exploration_decay")]
    pub exploration_decay: f64,
    /// Training passes over the completed-ticket set.
    #[serde(default = "default_episodes")]
    pub episodes: u32,
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_discount_factor() -> f64 {
    0.9
}

fn default_exploration_rate() -> f64 {
    0.1
}

fn default_exploration_floor() -> f64 {
    0.01
}

fn default_exploration_decay() -> f64 {
    0.995
}

fn default_episodes() -> u32 {
    100
}

impl Default for RlConfig {
    fn default() -> Self {
        RlConfig {
            learning_rate: default_learning_rate(),
            discount_factor: default_discount_factor(),
            exploration_rate: default_exploration_rate(),
            exploration_floor: default_exploration_floor(),
            exploration_decay: default_exploration_decay(),
            episodes: default_episodes(),
        }
    }
}

/// Retry policy for mutations that can see transiently stale state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Delay multiplier between attempts.
    #[serde(default = "default_backoff")]
    pub backoff: u32,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    100
}

fn default_backoff() -> u32 {
    2
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff: default_backoff(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub rl: RlConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

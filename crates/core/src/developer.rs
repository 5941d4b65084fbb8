// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Developer records and capacity helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Unique developer identifier.
pub type DeveloperId = u32;

/// A resource with finite per-period availability and a skill set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Developer {
    pub id: DeveloperId,
    pub name: String,
    /// Lowercase skill tags.
    pub skills: BTreeSet<String>,
    /// Hours available per period.
    pub availability: f64,
    /// Hours currently committed.
    pub current_workload: f64,
    /// Experience on a 1-5 scale.
    pub experience_level: u8,
}

impl Developer {
    /// Creates a developer with no current workload.
    pub fn new(
        id: DeveloperId,
        name: impl Into<String>,
        skills: impl IntoIterator<Item = impl Into<String>>,
        availability: f64,
        experience_level: u8,
    ) -> Result<Self> {
        if availability.is_nan() || availability <= 0.0 {
            return Err(Error::InvalidAvailability(availability));
        }
        if !(1..=5).contains(&experience_level) {
            return Err(Error::InvalidExperience(experience_level));
        }
        Ok(Developer {
            id,
            name: name.into(),
            skills: skills.into_iter().map(|s| s.into().to_lowercase()).collect(),
            availability,
            current_workload: 0.0,
            experience_level,
        })
    }

    /// Fraction of nominal availability currently committed.
    ///
    /// A developer with no availability is treated as fully loaded.
    pub fn workload_ratio(&self) -> f64 {
        if self.availability > 0.0 {
            self.current_workload / self.availability
        } else {
            1.0
        }
    }

    /// Hours of headroom remaining this period.
    pub fn remaining_availability(&self) -> f64 {
        self.availability - self.current_workload
    }

    /// The availability gate: true if the given estimate fits in the
    /// developer's remaining hours.
    pub fn has_capacity_for(&self, estimated_hours: f64) -> bool {
        self.current_workload + estimated_hours <= self.availability
    }
}

#[cfg(test)]
#[path = "developer_tests.rs"]
mod tests;

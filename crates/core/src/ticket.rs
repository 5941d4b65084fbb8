// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core ticket types for the sprint backend.
//!
//! This module contains the fundamental work-item types: Ticket, Priority,
//! Status, Complexity, and TicketDraft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::analyze::EntityHints;
use crate::developer::DeveloperId;
use crate::error::{Error, Result};

/// Unique ticket identifier.
pub type TicketId = u32;

/// Business priority of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Multiplier applied to a ticket's weight in workload optimization.
    pub fn weight(&self) -> f64 {
        match self {
            Priority::Low => 0.8,
            Priority::Medium => 1.0,
            Priority::High => 1.3,
            Priority::Critical => 1.6,
        }
    }

    /// Ordinal rank, higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// Workflow status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not yet assigned. Initial state for new tickets.
    Backlog,
    /// Assigned to a developer and being worked on.
    InProgress,
    /// Finished. Terminal state.
    Completed,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }

    /// Returns true if this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed)
    }

    /// Check if a transition from this status to target is valid.
    ///
    /// Completion is irreversible; all other non-self transitions are valid.
    pub fn can_transition_to(&self, target: Status) -> bool {
        !self.is_terminal() && *self != target
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "backlog" => Ok(Status::Backlog),
            "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Technical complexity on a 1-5 scale.
///
/// The constructor is the only way to obtain a value, so downstream
/// consumers (duration simulation, workload weighting) never see an
/// out-of-range level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Complexity(u8);

impl Complexity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a complexity level, rejecting values outside 1-5.
    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Complexity(level))
        } else {
            Err(Error::InvalidComplexity(level))
        }
    }

    /// Returns the raw 1-5 level.
    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for Complexity {
    /// Medium complexity, the documented fallback when no estimate exists.
    fn default() -> Self {
        Complexity(3)
    }
}

impl TryFrom<u8> for Complexity {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Complexity::new(level)
    }
}

impl From<Complexity> for u8 {
    fn from(c: Complexity) -> u8 {
        c.0
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work to be completed by one developer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub complexity: Complexity,
    pub estimated_hours: f64,
    pub status: Status,
    /// Set only while the ticket is in progress or completed.
    pub assigned_to: Option<DeveloperId>,
    /// Actual hours spent, recorded at completion.
    pub completion_time: Option<f64>,
    /// Ids of tickets this ticket depends on.
    #[serde(default)]
    pub dependencies: BTreeSet<TicketId>,
    /// Optional due date used for dynamic priority adjustment.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Hints extracted from the source text by the text collaborator.
    #[serde(default)]
    pub entities: Option<EntityHints>,
    /// Opaque key returned by an external issue tracker on export.
    #[serde(default)]
    pub external_key: Option<String>,
}

impl Ticket {
    /// Creates a backlog ticket, validating the estimate.
    pub fn new(
        id: TicketId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        complexity: Complexity,
        estimated_hours: f64,
    ) -> Result<Self> {
        if estimated_hours.is_nan() || estimated_hours <= 0.0 {
            return Err(Error::InvalidHours(estimated_hours));
        }
        Ok(Ticket {
            id,
            title: title.into(),
            description: description.into(),
            priority,
            complexity,
            estimated_hours,
            status: Status::Backlog,
            assigned_to: None,
            completion_time: None,
            dependencies: BTreeSet::new(),
            deadline: None,
            entities: None,
            external_key: None,
        })
    }

    /// Title and description joined for keyword extraction.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A parsed ticket candidate supplied by document ingestion, before it
/// becomes a [`Ticket`] in the working set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_hours: f64,
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for sprint-core operations.

use thiserror::Error;

/// All possible errors that can occur in sprint-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ticket not found: {0}")]
    TicketNotFound(u32),

    #[error("developer not found: {0}")]
    DeveloperNotFound(u32),

    #[error("duplicate ticket id: {0}\n  hint: ticket ids must be unique across the working set")]
    DuplicateTicket(u32),

    #[error(
        "duplicate developer id: {0}\n  hint: developer ids must be unique across the working set"
    )]
    DuplicateDeveloper(u32),

    #[error("ticket {0} is already completed\n  hint: completed tickets cannot be assigned or re-completed")]
    TicketCompleted(u32),

    #[error("ticket {0} has no assigned developer\n  hint: assign a developer before completing")]
    TicketUnassigned(u32),

    #[error("developer {developer} does not have enough availability\n  hint: reduce their workload, lower the estimate, or pick another developer")]
    InsufficientAvailability { developer: String },

    #[error("ticket {0} has not been exported\n  hint: export the ticket before syncing its status")]
    NotExported(u32),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high, critical")]
    InvalidPriority(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: backlog, in_progress, completed")]
    InvalidStatus(String),

    #[error("invalid complexity: {0}\n  hint: complexity is a 1-5 scale")]
    InvalidComplexity(u8),

    #[error("invalid estimated hours: {0}\n  hint: estimated hours must be a positive number")]
    InvalidHours(f64),

    #[error("invalid availability: {0}\n  hint: availability must be a positive number of hours")]
    InvalidAvailability(f64),

    #[error("invalid experience level: {0}\n  hint: experience level is a 1-5 scale")]
    InvalidExperience(u8),

    #[error("snapshot save failed: {0}")]
    SaveFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("regex error: {0}")]
    Pattern(#[from] regex::Error),
}

/// A specialized Result type for sprint-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

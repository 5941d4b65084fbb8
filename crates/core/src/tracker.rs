// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External issue-tracker collaborator interface.
//!
//! The core only relies on the shape: it sends an export payload and
//! stores the returned key opaquely on the ticket for later status syncs.
//! Concrete HTTP clients live outside this crate.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ticket::Priority;

/// Export payload sent to an external tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketExport {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_hours: f64,
    /// External account name of the assigned developer, if any.
    pub assignee: Option<String>,
}

/// An external issue tracker the core can push tickets to.
pub trait IssueTracker {
    /// Creates an external ticket, returning its key (e.g. "SS-42").
    fn create(&mut self, export: &TicketExport) -> Result<String>;

    /// Pushes a status change for a previously created ticket.
    fn update_status(&mut self, key: &str, status: &str) -> Result<()>;
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence collaborator interface.
//!
//! The persistence layer lives outside this crate; the core only relies on
//! the shape: a full snapshot of both collections plus the metric log,
//! supplied at start-up and written back after every mutation.

use serde::{Deserialize, Serialize};

use crate::developer::Developer;
use crate::error::Result;
use crate::history::PerformanceMetric;
use crate::ticket::Ticket;

/// Full working-set snapshot exchanged with the persistence collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub developers: Vec<Developer>,
    pub tickets: Vec<Ticket>,
    pub metrics: Vec<PerformanceMetric>,
}

/// Storage for working-set snapshots.
pub trait SnapshotStore {
    /// Loads the last saved snapshot, `None` on first start.
    fn load(&mut self) -> Result<Option<Snapshot>>;

    /// Persists a full snapshot, replacing any previous one.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// In-memory store for tests and embedding without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a snapshot, as if previously saved.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore { snapshot: Some(snapshot), saves: 0 }
    }

    /// Number of saves performed so far.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// The last saved snapshot, if any.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Historical performance store.
//!
//! The [`PerformanceLog`] is an append-only log of completion metrics, one
//! record per (developer, ticket) completion event. Per-developer summaries
//! are derived on demand and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::developer::DeveloperId;
use crate::ticket::TicketId;

/// One completion event. Never mutated after creation, except for ticket-id
/// remapping when the working set is renumbered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub developer_id: DeveloperId,
    pub ticket_id: TicketId,
    /// Actual hours spent.
    pub completion_time: f64,
    pub revisions: u32,
    /// Sentiment in [0, 1].
    pub sentiment_score: f64,
    pub timestamp: DateTime<Utc>,
}

/// Derived per-developer performance summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSummary {
    /// Mean completion time in hours.
    pub velocity: f64,
    /// 1 / (1 + 0.1 * total revisions).
    pub accuracy: f64,
    /// Mean sentiment score.
    pub sentiment: f64,
    pub tickets_completed: usize,
}

/// Append-only log of completion metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceLog {
    metrics: Vec<PerformanceMetric>,
}

impl PerformanceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from previously persisted metrics.
    pub fn from_metrics(metrics: Vec<PerformanceMetric>) -> Self {
        PerformanceLog { metrics }
    }

    /// Appends a completion event stamped with the current time.
    pub fn record(
        &mut self,
        developer_id: DeveloperId,
        ticket_id: TicketId,
        completion_time: f64,
        revisions: u32,
        sentiment_score: f64,
    ) -> &PerformanceMetric {
        self.metrics.push(PerformanceMetric {
            developer_id,
            ticket_id,
            completion_time,
            revisions,
            sentiment_score,
            timestamp: Utc::now(),
        });
        &self.metrics[self.metrics.len() - 1]
    }

    /// All metrics, oldest first.
    pub fn metrics(&self) -> &[PerformanceMetric] {
        &self.metrics
    }

    /// Metrics for one developer, oldest first.
    pub fn metrics_for(&self, developer_id: DeveloperId) -> Vec<&PerformanceMetric> {
        self.metrics
            .iter()
            .filter(|m| m.developer_id == developer_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Mean completion time for a developer, 0 with no history.
    pub fn velocity(&self, developer_id: DeveloperId) -> f64 {
        let metrics = self.metrics_for(developer_id);
        if metrics.is_empty() {
            return 0.0;
        }
        metrics.iter().map(|m| m.completion_time).sum::<f64>() / metrics.len() as f64
    }

    /// Revision-derived accuracy for a developer, 0 with no history.
    pub fn accuracy(&self, developer_id: DeveloperId) -> f64 {
        let metrics = self.metrics_for(developer_id);
        if metrics.is_empty() {
            return 0.0;
        }
        let total_revisions: u32 = metrics.iter().map(|m| m.revisions).sum();
        1.0 / (1.0 + f64::from(total_revisions) * 0.1)
    }

    /// Derives summaries for every developer with at least one metric.
    ///
    /// Developers with no history are absent from the map; callers treat
    /// absence as "no history" and fall back to their own defaults.
    pub fn summaries(&self) -> HashMap<DeveloperId, HistoricalSummary> {
        let mut out = HashMap::new();
        for metric in &self.metrics {
            if out.contains_key(&metric.developer_id) {
                continue;
            }
            let metrics = self.metrics_for(metric.developer_id);
            let sentiment =
                metrics.iter().map(|m| m.sentiment_score).sum::<f64>() / metrics.len() as f64;
            out.insert(
                metric.developer_id,
                HistoricalSummary {
                    velocity: self.velocity(metric.developer_id),
                    accuracy: self.accuracy(metric.developer_id),
                    sentiment,
                    tickets_completed: metrics.len(),
                },
            );
        }
        out
    }

    /// Rewrites ticket ids after a working-set renumbering. Metrics whose
    /// ticket id is absent from the map are left untouched.
    pub fn remap_ticket_ids(&mut self, mapping: &HashMap<TicketId, TicketId>) {
        for metric in &mut self.metrics {
            if let Some(new_id) = mapping.get(&metric.ticket_id) {
                metric.ticket_id = *new_id;
            }
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workload optimization and balancing.
//!
//! The optimizer performs a sequential greedy pass over backlog tickets:
//! each assignment immediately reduces the chosen developer's remaining
//! capacity, so later tickets in the same pass see updated figures. This
//! is not globally optimal. Infeasible tickets are omitted from the
//! result, never reported as errors.
//!
//! The balancer is advisory only and mutates nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::developer::{Developer, DeveloperId};
use crate::history::HistoricalSummary;
use crate::score::ticket_skill_match;
use crate::ticket::{Complexity, Status, Ticket, TicketId};

/// Minimum hours for a rebalancing suggestion to be worth surfacing.
const MIN_TRANSFER_HOURS: f64 = 1.0;

/// Multiplier applied to a ticket's weight per complexity level.
pub fn complexity_weight(complexity: Complexity) -> f64 {
    match complexity.level() {
        1 => 1.0,
        2 => 1.5,
        3 => 2.0,
        4 => 3.0,
        _ => 4.0,
    }
}

/// Weight of a ticket for capacity accounting: estimated hours scaled by
/// complexity and priority.
pub fn task_weight(ticket: &Ticket) -> f64 {
    ticket.estimated_hours * complexity_weight(ticket.complexity) * ticket.priority.weight()
}

/// A developer's capacity figures for one optimizer pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperCapacity {
    /// Nominal availability in hours.
    pub base_capacity: f64,
    /// Availability scaled by historical velocity and accuracy.
    pub effective_capacity: f64,
    /// Effective capacity minus current workload.
    pub available_capacity: f64,
    /// Committed fraction of effective capacity.
    pub utilization: f64,
}

/// Effective capacity of a developer given their history.
///
/// Velocity and accuracy default to 1.0 multipliers without a summary.
pub fn developer_capacity(
    developer: &Developer,
    summary: Option<&HistoricalSummary>,
) -> DeveloperCapacity {
    let velocity = summary.map(|s| s.velocity).unwrap_or(1.0);
    let accuracy = summary.map(|s| s.accuracy).unwrap_or(1.0);

    let effective = developer.availability * velocity * accuracy;
    let available = effective - developer.current_workload;
    let utilization = if effective > 0.0 {
        developer.current_workload / effective
    } else {
        1.0
    };

    DeveloperCapacity {
        base_capacity: developer.availability,
        effective_capacity: effective,
        available_capacity: available,
        utilization,
    }
}

/// One optimizer decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub ticket_id: TicketId,
    pub developer_id: DeveloperId,
    pub score: f64,
}

/// Greedy constrained assignment of backlog tickets to developers.
///
/// Tickets are taken in priority order (critical first), then by
/// descending weight within a tier. For each ticket the highest-scoring
/// developer with sufficient remaining capacity wins (first wins ties);
/// the winner's capacity figures are updated before the next ticket.
pub fn optimize(
    tickets: &[Ticket],
    developers: &[Developer],
    summaries: &HashMap<DeveloperId, HistoricalSummary>,
) -> Vec<Assignment> {
    let mut backlog: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.status == Status::Backlog)
        .collect();
    if backlog.is_empty() {
        return Vec::new();
    }

    backlog.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| task_weight(b).total_cmp(&task_weight(a)))
    });

    let mut capacities: HashMap<DeveloperId, DeveloperCapacity> = developers
        .iter()
        .map(|dev| (dev.id, developer_capacity(dev, summaries.get(&dev.id))))
        .collect();

    let mut assignments = Vec::new();

    for ticket in backlog {
        let weight = task_weight(ticket);
        let mut best: Option<(DeveloperId, f64)> = None;

        for dev in developers {
            let Some(capacity) = capacities.get(&dev.id) else {
                continue;
            };
            if capacity.available_capacity < weight {
                continue;
            }

            let summary = summaries.get(&dev.id);
            let velocity = summary.map(|s| s.velocity).unwrap_or(1.0);
            let accuracy = summary.map(|s| s.accuracy).unwrap_or(1.0);

            let score = ticket_skill_match(ticket, dev) * 0.4
                + (1.0 - capacity.utilization) * 0.3
                + velocity * 0.2
                + accuracy * 0.1;

            if best.map(|(_, s)| score > s).unwrap_or(true) {
                best = Some((dev.id, score));
            }
        }

        if let Some((developer_id, score)) = best {
            assignments.push(Assignment {
                ticket_id: ticket.id,
                developer_id,
                score,
            });
            if let Some(capacity) = capacities.get_mut(&developer_id) {
                capacity.available_capacity -= weight;
                capacity.utilization = if capacity.effective_capacity > 0.0 {
                    (capacity.effective_capacity - capacity.available_capacity)
                        / capacity.effective_capacity
                } else {
                    1.0
                };
            }
        }
    }

    tracing::debug!(assigned = assignments.len(), "optimizer pass complete");
    assignments
}

/// One developer's row in the balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub developer_id: DeveloperId,
    pub developer_name: String,
    pub current_workload: f64,
    pub effective_capacity: f64,
    pub utilization: f64,
}

/// A suggested pairwise hour transfer between developers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSuggestion {
    pub from_developer: String,
    pub to_developer: String,
    pub transfer_hours: f64,
    pub reason: String,
}

/// Advisory workload-balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadReport {
    /// Capacity-weighted average utilization.
    pub average_utilization: f64,
    pub workload_distribution: Vec<WorkloadEntry>,
    pub suggestions: Vec<TransferSuggestion>,
}

/// Computes utilization spread and pairwise transfer suggestions.
///
/// Developers more than 0.1 above the average utilization are flagged as
/// overutilized, more than 0.1 below as underutilized. For each
/// (over, under) pair, the suggested transfer is the smaller of either
/// side's distance from the average-utilization workload; suggestions
/// of one hour or less are dropped.
pub fn balance(
    developers: &[Developer],
    summaries: &HashMap<DeveloperId, HistoricalSummary>,
) -> WorkloadReport {
    let mut distribution = Vec::with_capacity(developers.len());
    let mut total_capacity = 0.0;
    let mut total_workload = 0.0;

    for dev in developers {
        let capacity = developer_capacity(dev, summaries.get(&dev.id));
        distribution.push(WorkloadEntry {
            developer_id: dev.id,
            developer_name: dev.name.clone(),
            current_workload: dev.current_workload,
            effective_capacity: capacity.effective_capacity,
            utilization: capacity.utilization,
        });
        total_capacity += capacity.effective_capacity;
        total_workload += dev.current_workload;
    }

    let average_utilization = if total_capacity > 0.0 {
        total_workload / total_capacity
    } else {
        0.0
    };

    let overutilized: Vec<&WorkloadEntry> = distribution
        .iter()
        .filter(|d| d.utilization > average_utilization + 0.1)
        .collect();
    let underutilized: Vec<&WorkloadEntry> = distribution
        .iter()
        .filter(|d| d.utilization < average_utilization - 0.1)
        .collect();

    let mut suggestions = Vec::new();
    for over in &overutilized {
        for under in &underutilized {
            let transfer_hours = f64::min(
                over.current_workload - over.effective_capacity * average_utilization,
                under.effective_capacity * average_utilization - under.current_workload,
            );

            if transfer_hours > MIN_TRANSFER_HOURS {
                suggestions.push(TransferSuggestion {
                    from_developer: over.developer_name.clone(),
                    to_developer: under.developer_name.clone(),
                    transfer_hours,
                    reason: format!(
                        "balance workload from {:.1}% to {:.1}% utilization",
                        over.utilization * 100.0,
                        under.utilization * 100.0
                    ),
                });
            }
        }
    }

    WorkloadReport {
        average_utilization,
        workload_distribution: distribution,
        suggestions,
    }
}

#[cfg(test)]
#[path = "balance_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only progress monitoring and reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::developer::{Developer, DeveloperId};
use crate::history::HistoricalSummary;
use crate::ticket::{Status, Ticket, TicketId};

/// Utilization at or above this marks a developer as a bottleneck.
pub const BOTTLENECK_THRESHOLD: f64 = 0.8;
/// Recorded time over this multiple of the estimate marks a slow task.
pub const SLOW_TASK_THRESHOLD: f64 = 1.5;
/// Dependency fan-in at or above this marks a blocking ticket.
const BLOCKING_FAN_IN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

/// A flagged constraint on sprint throughput.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Bottleneck {
    /// An overloaded developer.
    Developer {
        developer_id: DeveloperId,
        developer_name: String,
        utilization: f64,
        current_workload: f64,
        availability: f64,
        /// In-progress tickets held by this developer.
        affected_tickets: usize,
        severity: Severity,
    },
    /// A backlog ticket that many others depend on.
    Task {
        ticket_id: TicketId,
        ticket_title: String,
        dependents: usize,
        severity: Severity,
    },
}

/// An in-progress ticket running past its estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlowTask {
    pub ticket_id: TicketId,
    pub ticket_title: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub overrun_ratio: f64,
    pub assigned_to: Option<DeveloperId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Success,
}

/// A rule-derived observation about the working set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Ticket counts by status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_tickets: usize,
    pub completed_tickets: usize,
    pub in_progress_tickets: usize,
    pub backlog_tickets: usize,
    pub completion_rate: f64,
}

/// Per-developer progress figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperProgress {
    pub developer_id: DeveloperId,
    pub developer_name: String,
    pub total_tickets: usize,
    pub completed_tickets: usize,
    pub utilization: f64,
    pub avg_completion_time: f64,
    pub accuracy: f64,
}

/// Full progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub summary: ProgressSummary,
    pub developer_metrics: Vec<DeveloperProgress>,
    pub bottlenecks: Vec<Bottleneck>,
    pub slow_tasks: Vec<SlowTask>,
    pub insights: Vec<Insight>,
    pub generated_at: DateTime<Utc>,
}

/// Lightweight counters for a live dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealTimeMetrics {
    pub total_tickets: usize,
    pub completed_tickets: usize,
    pub in_progress_tickets: usize,
    pub backlog_tickets: usize,
    pub completion_rate: f64,
    pub utilization_rate: f64,
    pub avg_completion_time: f64,
    pub timestamp: DateTime<Utc>,
}

fn status_counts(tickets: &[Ticket]) -> (usize, usize, usize) {
    let completed = tickets.iter().filter(|t| t.status == Status::Completed).count();
    let in_progress = tickets.iter().filter(|t| t.status == Status::InProgress).count();
    let backlog = tickets.iter().filter(|t| t.status == Status::Backlog).count();
    (completed, in_progress, backlog)
}

fn dependents(tickets: &[Ticket], id: TicketId) -> usize {
    tickets.iter().filter(|t| t.dependencies.contains(&id)).count()
}

/// Generates a full progress report from the working set.
pub fn report(
    tickets: &[Ticket],
    developers: &[Developer],
    summaries: &HashMap<DeveloperId, HistoricalSummary>,
) -> ProgressReport {
    let (completed, in_progress, backlog) = status_counts(tickets);
    let total = tickets.len();
    let completion_rate = if total > 0 {
        completed as f64 / total as f64
    } else {
        0.0
    };

    let summary = ProgressSummary {
        total_tickets: total,
        completed_tickets: completed,
        in_progress_tickets: in_progress,
        backlog_tickets: backlog,
        completion_rate,
    };

    let developer_metrics = developers
        .iter()
        .map(|dev| {
            let dev_tickets: Vec<&Ticket> = tickets
                .iter()
                .filter(|t| t.assigned_to == Some(dev.id))
                .collect();
            let completed_count = dev_tickets
                .iter()
                .filter(|t| t.status == Status::Completed)
                .count();
            let perf = summaries.get(&dev.id);
            DeveloperProgress {
                developer_id: dev.id,
                developer_name: dev.name.clone(),
                total_tickets: dev_tickets.len(),
                completed_tickets: completed_count,
                utilization: dev.workload_ratio(),
                avg_completion_time: perf.map(|s| s.velocity).unwrap_or(0.0),
                accuracy: perf.map(|s| s.accuracy).unwrap_or(0.0),
            }
        })
        .collect();

    let bottlenecks = identify_bottlenecks(tickets, developers);
    let slow_tasks = identify_slow_tasks(tickets);
    let insights = generate_insights(tickets, developers, &bottlenecks, &slow_tasks);

    ProgressReport {
        summary,
        developer_metrics,
        bottlenecks,
        slow_tasks,
        insights,
        generated_at: Utc::now(),
    }
}

fn identify_bottlenecks(tickets: &[Ticket], developers: &[Developer]) -> Vec<Bottleneck> {
    let mut bottlenecks = Vec::new();

    for dev in developers {
        let utilization = dev.workload_ratio();
        if utilization >= BOTTLENECK_THRESHOLD {
            let affected = tickets
                .iter()
                .filter(|t| t.assigned_to == Some(dev.id) && t.status == Status::InProgress)
                .count();
            bottlenecks.push(Bottleneck::Developer {
                developer_id: dev.id,
                developer_name: dev.name.clone(),
                utilization,
                current_workload: dev.current_workload,
                availability: dev.availability,
                affected_tickets: affected,
                severity: if utilization > 0.9 {
                    Severity::High
                } else {
                    Severity::Medium
                },
            });
        }
    }

    for ticket in tickets {
        if ticket.status != Status::Backlog {
            continue;
        }
        let fan_in = dependents(tickets, ticket.id);
        if fan_in >= BLOCKING_FAN_IN {
            bottlenecks.push(Bottleneck::Task {
                ticket_id: ticket.id,
                ticket_title: ticket.title.clone(),
                dependents: fan_in,
                severity: Severity::Medium,
            });
        }
    }

    bottlenecks
}

fn identify_slow_tasks(tickets: &[Ticket]) -> Vec<SlowTask> {
    tickets
        .iter()
        .filter(|t| t.status == Status::InProgress && t.assigned_to.is_some())
        .filter_map(|t| {
            let actual = t.completion_time?;
            if actual > t.estimated_hours * SLOW_TASK_THRESHOLD {
                Some(SlowTask {
                    ticket_id: t.id,
                    ticket_title: t.title.clone(),
                    estimated_hours: t.estimated_hours,
                    actual_hours: actual,
                    overrun_ratio: actual / t.estimated_hours,
                    assigned_to: t.assigned_to,
                })
            } else {
                None
            }
        })
        .collect()
}

fn generate_insights(
    tickets: &[Ticket],
    developers: &[Developer],
    bottlenecks: &[Bottleneck],
    slow_tasks: &[SlowTask],
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let total = tickets.len();
    let completed = tickets.iter().filter(|t| t.status == Status::Completed).count();
    let completion_rate = if total > 0 {
        completed as f64 / total as f64
    } else {
        0.0
    };

    if completion_rate < 0.3 {
        insights.push(Insight {
            kind: InsightKind::Warning,
            message: "Low completion rate. Consider reducing scope or adding resources."
                .to_string(),
        });
    } else if completion_rate > 0.8 {
        insights.push(Insight {
            kind: InsightKind::Success,
            message: "High completion rate. Team is performing well.".to_string(),
        });
    }

    let dev_bottlenecks = bottlenecks
        .iter()
        .filter(|b| matches!(b, Bottleneck::Developer { .. }))
        .count();
    if dev_bottlenecks > 0 {
        insights.push(Insight {
            kind: InsightKind::Warning,
            message: format!(
                "{dev_bottlenecks} developer(s) are overutilized. Consider redistributing tasks."
            ),
        });
    }

    if !slow_tasks.is_empty() {
        insights.push(Insight {
            kind: InsightKind::Warning,
            message: format!(
                "{} task(s) are taking longer than estimated. Review estimates and complexity.",
                slow_tasks.len()
            ),
        });
    }

    let utilizations: Vec<f64> = developers
        .iter()
        .filter(|d| d.availability > 0.0)
        .map(Developer::workload_ratio)
        .collect();
    if !utilizations.is_empty() {
        let max = utilizations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = utilizations.iter().copied().fold(f64::INFINITY, f64::min);
        if max - min > 0.5 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                message: "Uneven workload distribution. Consider balancing tasks among developers."
                    .to_string(),
            });
        }
    }

    insights
}

/// Computes real-time counters for a dashboard.
pub fn metrics(tickets: &[Ticket], developers: &[Developer]) -> RealTimeMetrics {
    let (completed, in_progress, backlog) = status_counts(tickets);
    let total = tickets.len();

    let total_workload: f64 = developers.iter().map(|d| d.current_workload).sum();
    let total_availability: f64 = developers.iter().map(|d| d.availability).sum();

    let completed_times: Vec<f64> = tickets
        .iter()
        .filter(|t| t.status == Status::Completed)
        .filter_map(|t| t.completion_time)
        .collect();
    let avg_completion_time = if completed_times.is_empty() {
        0.0
    } else {
        completed_times.iter().sum::<f64>() / completed_times.len() as f64
    };

    RealTimeMetrics {
        total_tickets: total,
        completed_tickets: completed,
        in_progress_tickets: in_progress,
        backlog_tickets: backlog,
        completion_rate: if total > 0 {
            completed as f64 / total as f64
        } else {
            0.0
        },
        utilization_rate: if total_availability > 0.0 {
            total_workload / total_availability
        } else {
            0.0
        },
        avg_completion_time,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;

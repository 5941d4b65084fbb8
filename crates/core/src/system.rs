// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sprint system: owner of the full working set.
//!
//! [`SprintSystem`] holds tickets, developers, the performance log, and the
//! learned assignment model. Every mutating operation takes `&mut self`,
//! so exclusive access to the whole working set for the duration of a
//! mutation is enforced by the borrow checker; a concurrent deployment
//! wraps the system in a single lock or actor.
//!
//! Validation always precedes mutation: an operation that returns an error
//! has changed nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::analyze::{self, TextAnalyzer};
use crate::balance::{self, Assignment, WorkloadReport};
use crate::config::EngineConfig;
use crate::developer::{Developer, DeveloperId};
use crate::error::{Error, Result};
use crate::history::{HistoricalSummary, PerformanceLog, PerformanceMetric};
use crate::montecarlo::{DurationEstimate, MonteCarloEstimator};
use crate::progress::{self, ProgressReport, RealTimeMetrics};
use crate::recommend::{self, Recommendation, RecommendationMethod, MAX_RECOMMENDATIONS};
use crate::retry;
use crate::rl::RlAssignment;
use crate::score;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::ticket::{Priority, Status, Ticket, TicketDraft, TicketId};
use crate::tracker::{IssueTracker, TicketExport};

/// Completed tickets required before the assignment model is trained.
pub const MIN_TRAINING_TICKETS: usize = 5;

/// Aggregate working-set counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub total_tickets: usize,
    pub completed_tickets: usize,
    pub in_progress_tickets: usize,
    pub backlog_tickets: usize,
    pub total_workload: f64,
    pub total_availability: f64,
    /// Committed fraction of total availability, in [0, 1].
    pub utilization_rate: f64,
}

/// A developer's metric history plus the derived summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperPerformance {
    pub metrics: Vec<PerformanceMetric>,
    pub summary: HistoricalSummary,
}

/// One priority change made by the dynamic adjustment pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityAdjustment {
    pub ticket_id: TicketId,
    pub old_priority: Priority,
    pub new_priority: Priority,
    pub reason: String,
}

/// Owner of the sprint working set and its cooperating engines.
pub struct SprintSystem {
    tickets: Vec<Ticket>,
    developers: Vec<Developer>,
    log: PerformanceLog,
    rl: RlAssignment,
    estimator: MonteCarloEstimator,
    config: EngineConfig,
    store: Option<Box<dyn SnapshotStore>>,
}

impl SprintSystem {
    /// Creates an empty system with no persistence.
    pub fn new(config: EngineConfig) -> Self {
        let rl = RlAssignment::new(config.rl.clone());
        Self::with_model(config, rl)
    }

    /// Creates an empty system with a fixed model seed, for deterministic
    /// tests.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        let rl = RlAssignment::with_seed(config.rl.clone(), seed);
        Self::with_model(config, rl)
    }

    fn with_model(config: EngineConfig, rl: RlAssignment) -> Self {
        SprintSystem {
            tickets: Vec::new(),
            developers: Vec::new(),
            log: PerformanceLog::new(),
            rl,
            estimator: MonteCarloEstimator::new(),
            config,
            store: None,
        }
    }

    /// Creates a system backed by a persistence collaborator: loads the
    /// last snapshot and trains the assignment model when enough
    /// completion history exists.
    pub fn with_store(config: EngineConfig, mut store: Box<dyn SnapshotStore>) -> Result<Self> {
        let snapshot = store.load()?;
        let mut system = Self::new(config);
        system.store = Some(store);
        if let Some(snap) = snapshot {
            system.developers = snap.developers;
            system.tickets = snap.tickets;
            system.log = PerformanceLog::from_metrics(snap.metrics);
        }
        system.train_model();
        Ok(system)
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn developers(&self) -> &[Developer] {
        &self.developers
    }

    pub fn performance_log(&self) -> &PerformanceLog {
        &self.log
    }

    /// Looks up a ticket by id.
    pub fn ticket(&self, ticket_id: TicketId) -> Result<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.id == ticket_id)
            .ok_or(Error::TicketNotFound(ticket_id))
    }

    /// Looks up a developer by id.
    pub fn developer(&self, developer_id: DeveloperId) -> Result<&Developer> {
        self.developers
            .iter()
            .find(|d| d.id == developer_id)
            .ok_or(Error::DeveloperNotFound(developer_id))
    }

    /// Adds a developer, rejecting duplicate ids.
    pub fn add_developer(&mut self, developer: Developer) -> Result<()> {
        if self.developers.iter().any(|d| d.id == developer.id) {
            return Err(Error::DuplicateDeveloper(developer.id));
        }
        self.developers.push(developer);
        self.save()
    }

    /// Adds a ticket, rejecting duplicate ids.
    pub fn add_ticket(&mut self, ticket: Ticket) -> Result<()> {
        if self.tickets.iter().any(|t| t.id == ticket.id) {
            return Err(Error::DuplicateTicket(ticket.id));
        }
        self.tickets.push(ticket);
        self.save()
    }

    /// Creates a backlog ticket from a feature story via the text
    /// collaborator: complexity is estimated from the combined text and
    /// entity hints are kept on the ticket. The new id is one past the
    /// highest existing id.
    pub fn create_ticket(
        &mut self,
        analyzer: &dyn TextAnalyzer,
        draft: &TicketDraft,
    ) -> Result<TicketId> {
        let text = format!("{} {}", draft.title, draft.description);
        let complexity = analyzer.estimate_complexity(&text);
        let entities = analyzer.extract_entities(&draft.description);

        let id = self.tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let mut ticket = Ticket::new(
            id,
            draft.title.clone(),
            draft.description.clone(),
            draft.priority,
            complexity,
            draft.estimated_hours,
        )?;
        ticket.entities = Some(entities);

        self.tickets.push(ticket);
        self.save()?;
        tracing::info!(ticket = id, "created ticket from story");
        Ok(id)
    }

    /// Ingests a batch of parsed drafts, each as if manually entered.
    pub fn import_drafts(
        &mut self,
        analyzer: &dyn TextAnalyzer,
        drafts: &[TicketDraft],
    ) -> Result<Vec<TicketId>> {
        drafts
            .iter()
            .map(|draft| self.create_ticket(analyzer, draft))
            .collect()
    }

    /// Trains the assignment model from completion history. Returns false
    /// when there are too few completed assignments to learn from.
    pub fn train_model(&mut self) -> bool {
        let completed = self
            .tickets
            .iter()
            .filter(|t| t.status == Status::Completed && t.assigned_to.is_some())
            .count();
        if completed < MIN_TRAINING_TICKETS {
            return false;
        }
        let summaries = self.log.summaries();
        self.rl.train(&self.tickets, &self.developers, &summaries);
        true
    }

    /// Composite recommendation for a ticket: the learned pick first
    /// (scored as skill 0.6 + availability 0.4), then the heuristic top 3,
    /// deduplicated by developer and re-sorted by score. The learned pick
    /// wins ties because it is inserted first and the sort is stable.
    pub fn recommendations(&mut self, ticket_id: TicketId) -> Result<Vec<Recommendation>> {
        let ticket = self.ticket(ticket_id)?.clone();
        let summaries = self.log.summaries();

        let mut recommendations = Vec::new();
        let mut seen: HashSet<DeveloperId> = HashSet::new();

        if let Some(pick) = self.rl.recommend(&ticket, &self.developers, false) {
            if let Some(dev) = self.developers.iter().find(|d| d.id == pick) {
                let skill = score::ticket_skill_match(&ticket, dev);
                let availability = score::availability_score(dev);
                recommendations.push(Recommendation {
                    developer_id: dev.id,
                    developer_name: dev.name.clone(),
                    match_score: skill * 0.6 + availability * 0.4,
                    skills_match: summaries.get(&dev.id).cloned(),
                    method: RecommendationMethod::Rl,
                });
                seen.insert(dev.id);
            }
        }

        for rec in recommend::recommend(&ticket, &self.developers, &summaries) {
            if seen.insert(rec.developer_id) {
                recommendations.push(rec);
            }
        }

        recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        recommendations.truncate(MAX_RECOMMENDATIONS);
        Ok(recommendations)
    }

    /// Monte Carlo completion-time projection for a ticket.
    pub fn estimate_timeline(&self, ticket_id: TicketId) -> Result<DurationEstimate> {
        let ticket = self.ticket(ticket_id)?;
        self.estimator.estimate(ticket.estimated_hours, ticket.complexity)
    }

    /// Assigns a developer to a ticket.
    ///
    /// Validates everything up front (ticket exists and is not completed,
    /// developer exists and passes the availability gate), then applies
    /// the mutation and snapshot write-back under the bounded-retry
    /// policy. Reassignment releases the previous developer's hours.
    pub fn assign(&mut self, ticket_id: TicketId, developer_id: DeveloperId) -> Result<()> {
        let ticket = self.ticket(ticket_id)?;
        if ticket.status == Status::Completed {
            return Err(Error::TicketCompleted(ticket_id));
        }
        let hours = ticket.estimated_hours;

        let developer = self.developer(developer_id)?;
        if !developer.has_capacity_for(hours) {
            return Err(Error::InsufficientAvailability {
                developer: developer.name.clone(),
            });
        }

        let retry_config = self.config.retry.clone();
        retry::retry(&retry_config, || {
            self.apply_assignment(ticket_id, developer_id);
            self.save()
        })?;

        tracing::info!(ticket = ticket_id, developer = developer_id, "assigned ticket");
        Ok(())
    }

    /// Applies the assignment mutation. Idempotent so a retried attempt
    /// never double-counts workload.
    fn apply_assignment(&mut self, ticket_id: TicketId, developer_id: DeveloperId) {
        let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return;
        };
        if ticket.assigned_to == Some(developer_id) {
            return;
        }
        let hours = ticket.estimated_hours;
        let previous = ticket.assigned_to;

        ticket.assigned_to = Some(developer_id);
        ticket.status = Status::InProgress;

        if let Some(prev_id) = previous {
            if let Some(prev) = self.developers.iter_mut().find(|d| d.id == prev_id) {
                prev.current_workload -= hours;
            }
        }
        if let Some(dev) = self.developers.iter_mut().find(|d| d.id == developer_id) {
            dev.current_workload += hours;
        }
    }

    /// Completes a ticket, recording the performance metric and releasing
    /// the developer's committed hours.
    ///
    /// Rejected before any mutation: unknown ticket, already-completed
    /// ticket, unassigned ticket, non-positive completion time.
    pub fn complete(
        &mut self,
        ticket_id: TicketId,
        completion_time: f64,
        revisions: u32,
        sentiment_score: f64,
    ) -> Result<()> {
        if completion_time.is_nan() || completion_time <= 0.0 {
            return Err(Error::InvalidHours(completion_time));
        }

        let ticket = self.ticket(ticket_id)?;
        if ticket.status == Status::Completed {
            return Err(Error::TicketCompleted(ticket_id));
        }
        let Some(developer_id) = ticket.assigned_to else {
            return Err(Error::TicketUnassigned(ticket_id));
        };
        let hours = ticket.estimated_hours;

        if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == ticket_id) {
            ticket.status = Status::Completed;
            ticket.completion_time = Some(completion_time);
        }
        self.log
            .record(developer_id, ticket_id, completion_time, revisions, sentiment_score);
        if let Some(dev) = self.developers.iter_mut().find(|d| d.id == developer_id) {
            dev.current_workload -= hours;
        }

        tracing::info!(
            ticket = ticket_id,
            developer = developer_id,
            completion_time,
            "completed ticket"
        );
        self.save()
    }

    /// Completes a ticket with free-text feedback, scoring the text for
    /// sentiment with the keyword scorer.
    pub fn complete_with_feedback(
        &mut self,
        ticket_id: TicketId,
        completion_time: f64,
        revisions: u32,
        feedback: &str,
    ) -> Result<()> {
        self.complete(ticket_id, completion_time, revisions, analyze::sentiment(feedback))
    }

    /// Renumbers tickets 1..=n in ascending id order and rewrites the
    /// ticket ids on dependencies and performance metrics to match.
    pub fn reset_ticket_ids(&mut self) -> Result<()> {
        let mut order: Vec<usize> = (0..self.tickets.len()).collect();
        order.sort_by_key(|&i| self.tickets[i].id);

        let mapping: HashMap<TicketId, TicketId> = order
            .iter()
            .enumerate()
            .map(|(pos, &i)| (self.tickets[i].id, pos as TicketId + 1))
            .collect();

        for ticket in &mut self.tickets {
            if let Some(new_id) = mapping.get(&ticket.id) {
                ticket.id = *new_id;
            }
            ticket.dependencies = ticket
                .dependencies
                .iter()
                .map(|dep| mapping.get(dep).copied().unwrap_or(*dep))
                .collect();
        }
        self.log.remap_ticket_ids(&mapping);
        self.save()
    }

    /// Runs the greedy optimizer over the backlog and applies the
    /// resulting assignments, re-checking each developer's hour gate at
    /// apply time.
    pub fn optimize_workload(&mut self) -> Result<Vec<Assignment>> {
        let summaries = self.log.summaries();
        let assignments = balance::optimize(&self.tickets, &self.developers, &summaries);

        for assignment in &assignments {
            let hours = match self.ticket(assignment.ticket_id) {
                Ok(t) => t.estimated_hours,
                Err(_) => continue,
            };
            let fits = self
                .developers
                .iter()
                .find(|d| d.id == assignment.developer_id)
                .map(|d| d.has_capacity_for(hours))
                .unwrap_or(false);
            if fits {
                self.apply_assignment(assignment.ticket_id, assignment.developer_id);
            }
        }

        if !assignments.is_empty() {
            self.save()?;
        }
        Ok(assignments)
    }

    /// Advisory workload-balance report; mutates nothing.
    pub fn balance_workload(&self) -> WorkloadReport {
        balance::balance(&self.developers, &self.log.summaries())
    }

    /// Full progress report over the working set.
    pub fn progress_report(&self) -> ProgressReport {
        progress::report(&self.tickets, &self.developers, &self.log.summaries())
    }

    /// Real-time dashboard counters.
    pub fn realtime_metrics(&self) -> RealTimeMetrics {
        progress::metrics(&self.tickets, &self.developers)
    }

    /// Aggregate ticket and workload counters.
    pub fn system_status(&self) -> SystemStatus {
        let completed = self.tickets.iter().filter(|t| t.status == Status::Completed).count();
        let in_progress = self.tickets.iter().filter(|t| t.status == Status::InProgress).count();
        let backlog = self.tickets.iter().filter(|t| t.status == Status::Backlog).count();

        let total_workload: f64 = self.developers.iter().map(|d| d.current_workload).sum();
        let total_availability: f64 = self.developers.iter().map(|d| d.availability).sum();

        SystemStatus {
            total_tickets: self.tickets.len(),
            completed_tickets: completed,
            in_progress_tickets: in_progress,
            backlog_tickets: backlog,
            total_workload,
            total_availability,
            utilization_rate: if total_availability > 0.0 {
                total_workload / total_availability
            } else {
                0.0
            },
        }
    }

    /// A developer's metric history and summary, `None` without history.
    pub fn developer_performance(&self, developer_id: DeveloperId) -> Option<DeveloperPerformance> {
        let summary = self.log.summaries().remove(&developer_id)?;
        Some(DeveloperPerformance {
            metrics: self
                .log
                .metrics_for(developer_id)
                .into_iter()
                .cloned()
                .collect(),
            summary,
        })
    }

    /// Exports a ticket to an external tracker and stores the returned key
    /// on the ticket.
    pub fn export_ticket(
        &mut self,
        tracker: &mut dyn IssueTracker,
        ticket_id: TicketId,
    ) -> Result<String> {
        let ticket = self.ticket(ticket_id)?;
        let assignee = ticket
            .assigned_to
            .and_then(|id| self.developers.iter().find(|d| d.id == id))
            .map(|d| d.name.to_lowercase().replace(' ', "."));
        let export = TicketExport {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            priority: ticket.priority,
            estimated_hours: ticket.estimated_hours,
            assignee,
        };

        let key = tracker.create(&export)?;
        if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == ticket_id) {
            ticket.external_key = Some(key.clone());
        }
        self.save()?;
        Ok(key)
    }

    /// Pushes a status string for a previously exported ticket.
    pub fn sync_external_status(
        &self,
        tracker: &mut dyn IssueTracker,
        ticket_id: TicketId,
        status: &str,
    ) -> Result<()> {
        let ticket = self.ticket(ticket_id)?;
        let key = ticket
            .external_key
            .as_deref()
            .ok_or(Error::NotExported(ticket_id))?;
        tracker.update_status(key, status)
    }

    /// Adjusts ticket priorities from system load, deadlines, dependency
    /// fan-in, and underutilized developers. Returns the changes made.
    pub fn adjust_priorities(&mut self) -> Result<Vec<PriorityAdjustment>> {
        let adjustments = self.adjust_priorities_at(Utc::now());
        if !adjustments.is_empty() {
            self.save()?;
        }
        Ok(adjustments)
    }

    fn adjust_priorities_at(&mut self, now: DateTime<Utc>) -> Vec<PriorityAdjustment> {
        let mut adjustments = Vec::new();

        // High system utilization: shed medium-priority backlog work.
        if self.system_status().utilization_rate > 0.9 {
            for ticket in &mut self.tickets {
                if ticket.status == Status::Backlog && ticket.priority == Priority::Medium {
                    ticket.priority = Priority::Low;
                    adjustments.push(PriorityAdjustment {
                        ticket_id: ticket.id,
                        old_priority: Priority::Medium,
                        new_priority: Priority::Low,
                        reason: "high system utilization".to_string(),
                    });
                }
            }
        }

        // Deadline proximity.
        for ticket in &mut self.tickets {
            if ticket.status == Status::Completed {
                continue;
            }
            let Some(deadline) = ticket.deadline else {
                continue;
            };
            let days_left = (deadline - now).num_days();
            if days_left <= 3 && ticket.priority.rank() < Priority::High.rank() {
                let old = ticket.priority;
                ticket.priority = Priority::High;
                adjustments.push(PriorityAdjustment {
                    ticket_id: ticket.id,
                    old_priority: old,
                    new_priority: Priority::High,
                    reason: "approaching deadline".to_string(),
                });
            }
        }

        // Dependency fan-in: promote backlog tickets many others wait on.
        let fan_in: Vec<(TicketId, usize)> = self
            .tickets
            .iter()
            .filter(|t| t.status == Status::Backlog)
            .map(|t| {
                let count = self
                    .tickets
                    .iter()
                    .filter(|other| other.dependencies.contains(&t.id))
                    .count();
                (t.id, count)
            })
            .collect();
        for (ticket_id, count) in fan_in {
            if count < 3 {
                continue;
            }
            if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == ticket_id) {
                if ticket.priority.rank() < Priority::High.rank() {
                    let old = ticket.priority;
                    ticket.priority = Priority::High;
                    adjustments.push(PriorityAdjustment {
                        ticket_id,
                        old_priority: old,
                        new_priority: Priority::High,
                        reason: format!("blocking {count} other tasks"),
                    });
                }
            }
        }

        // Feed underutilized developers their best-matching backlog work.
        let idle: Vec<Developer> = self
            .developers
            .iter()
            .filter(|d| d.workload_ratio() < 0.3)
            .cloned()
            .collect();
        for dev in idle {
            let mut candidates: Vec<(TicketId, f64)> = self
                .tickets
                .iter()
                .filter(|t| t.status == Status::Backlog)
                .map(|t| (t.id, score::ticket_skill_match(t, &dev)))
                .collect();
            candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

            for (ticket_id, _) in candidates.into_iter().take(2) {
                if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == ticket_id) {
                    if ticket.priority == Priority::Low {
                        ticket.priority = Priority::Medium;
                        adjustments.push(PriorityAdjustment {
                            ticket_id,
                            old_priority: Priority::Low,
                            new_priority: Priority::Medium,
                            reason: format!("matches underutilized developer: {}", dev.name),
                        });
                    }
                }
            }
        }

        adjustments
    }

    fn save(&mut self) -> Result<()> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        let snapshot = Snapshot {
            developers: self.developers.clone(),
            tickets: self.tickets.clone(),
            metrics: self.log.metrics().to_vec(),
        };
        store
            .save(&snapshot)
            .map_err(|err| Error::SaveFailed(err.to_string()))
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;

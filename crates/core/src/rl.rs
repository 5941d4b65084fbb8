// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Value-table assignment learning.
//!
//! Maintains a learned estimate of expected reward per (discretized state,
//! developer) pair, trained from historical assignment outcomes with a
//! single-step temporal-difference update. Ticket completion is treated as
//! episodic: the next state equals the current state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::RlConfig;
use crate::developer::{Developer, DeveloperId};
use crate::history::HistoricalSummary;
use crate::score::ticket_skill_match;
use crate::ticket::{Priority, Status, Ticket};

/// Discretization bucket for the state components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
        }
    }
}

/// Discretized (skill, availability, workload, priority) situation.
///
/// Workload has inverted sense: a high bucket means a heavily loaded
/// developer, which is a risk signal rather than a benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentState {
    pub skill: Level,
    pub availability: Level,
    pub workload: Level,
    pub priority: Priority,
}

/// Learned value estimates per (state, developer) pair.
///
/// Grows monotonically as new pairs are observed; entries are never
/// removed. Unseen pairs read as 0.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<AssignmentState, HashMap<DeveloperId, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a (state, developer) pair, 0 when unseen.
    pub fn value(&self, state: &AssignmentState, developer_id: DeveloperId) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&developer_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Maximum value over all developers seen in a state, 0 when unseen.
    pub fn max_value(&self, state: &AssignmentState) -> f64 {
        self.values
            .get(state)
            .map(|actions| actions.values().fold(0.0_f64, |acc, v| acc.max(*v)))
            .unwrap_or(0.0)
    }

    fn set(&mut self, state: AssignmentState, developer_id: DeveloperId, value: f64) {
        self.values.entry(state).or_default().insert(developer_id, value);
    }

    /// Number of states observed so far.
    pub fn states(&self) -> usize {
        self.values.len()
    }
}

/// Reinforcement-style assignment recommender.
pub struct RlAssignment {
    config: RlConfig,
    exploration_rate: f64,
    q_table: QTable,
    rng: StdRng,
}

impl RlAssignment {
    /// Creates an untrained model with an entropy-seeded rng.
    pub fn new(config: RlConfig) -> Self {
        let rng = StdRng::from_entropy();
        Self::with_rng(config, rng)
    }

    /// Creates an untrained model with a fixed seed, for deterministic tests.
    pub fn with_seed(config: RlConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RlConfig, rng: StdRng) -> Self {
        RlAssignment {
            exploration_rate: config.exploration_rate,
            config,
            q_table: QTable::new(),
            rng,
        }
    }

    /// Current exploration rate (decays during training).
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// The learned value table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Discretizes a (ticket, developer) pair into an [`AssignmentState`].
    pub fn state_for(&self, ticket: &Ticket, developer: &Developer) -> AssignmentState {
        let skill = ticket_skill_match(ticket, developer);
        let headroom = developer.remaining_availability();
        let ratio = developer.workload_ratio();

        AssignmentState {
            skill: if skill > 0.7 {
                Level::High
            } else if skill > 0.4 {
                Level::Medium
            } else {
                Level::Low
            },
            availability: if headroom > 20.0 {
                Level::High
            } else if headroom > 10.0 {
                Level::Medium
            } else {
                Level::Low
            },
            workload: if ratio > 0.8 {
                Level::High
            } else if ratio > 0.5 {
                Level::Medium
            } else {
                Level::Low
            },
            priority: ticket.priority,
        }
    }

    /// Reward for a completed assignment. All terms are additive and
    /// unclipped: +10 for on-time completion (within 1.2x the estimate)
    /// else -5, -2 per revision, +5x sentiment, +3x skill match.
    pub fn reward(
        &self,
        ticket: &Ticket,
        developer: &Developer,
        completion_time: f64,
        revisions: u32,
        sentiment_score: f64,
    ) -> f64 {
        let mut reward = 0.0;

        if completion_time <= ticket.estimated_hours * 1.2 {
            reward += 10.0;
        } else {
            reward -= 5.0;
        }

        reward -= f64::from(revisions) * 2.0;
        reward += sentiment_score * 5.0;
        reward += ticket_skill_match(ticket, developer) * 3.0;

        reward
    }

    /// Temporal-difference update:
    /// `Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`.
    pub fn update(
        &mut self,
        state: AssignmentState,
        developer_id: DeveloperId,
        reward: f64,
        next_state: &AssignmentState,
    ) {
        let current = self.q_table.value(&state, developer_id);
        let next_max = self.q_table.max_value(next_state);
        let updated = current
            + self.config.learning_rate
                * (reward + self.config.discount_factor * next_max - current);
        self.q_table.set(state, developer_id, updated);
    }

    /// Trains the value table from completed tickets with a known
    /// assignment, one pass per configured episode.
    ///
    /// The actual historical assignment is the taken action; the next state
    /// equals the current state. Completion time falls back to the
    /// estimate, sentiment to the developer's summary (0.7 without one).
    /// The exploration rate decays multiplicatively toward its floor after
    /// each episode.
    pub fn train(
        &mut self,
        tickets: &[Ticket],
        developers: &[Developer],
        summaries: &HashMap<DeveloperId, HistoricalSummary>,
    ) {
        tracing::info!(
            episodes = self.config.episodes,
            tickets = tickets.len(),
            "training assignment value table"
        );

        let mut order: Vec<usize> = (0..tickets.len()).collect();

        for episode in 0..self.config.episodes {
            order.shuffle(&mut self.rng);

            for &idx in &order {
                let ticket = &tickets[idx];
                if ticket.status != Status::Completed {
                    continue;
                }
                let Some(assigned) = ticket.assigned_to else {
                    continue;
                };
                let Some(developer) = developers.iter().find(|d| d.id == assigned) else {
                    continue;
                };

                let state = self.state_for(ticket, developer);
                let completion_time = ticket.completion_time.unwrap_or(ticket.estimated_hours);
                let sentiment = summaries.get(&assigned).map(|s| s.sentiment).unwrap_or(0.7);

                let reward = self.reward(ticket, developer, completion_time, 0, sentiment);
                self.update(state, assigned, reward, &state);
            }

            self.exploration_rate = self
                .config
                .exploration_floor
                .max(self.exploration_rate * self.config.exploration_decay);

            if episode % 10 == 0 {
                tracing::debug!(
                    episode,
                    exploration_rate = self.exploration_rate,
                    "training episode"
                );
            }
        }
    }

    /// Picks a developer for a ticket via the epsilon-greedy policy.
    ///
    /// Developers failing the availability gate are excluded; `None` means
    /// no developer passed it. The state is derived from the first
    /// available developer as a representative for the whole candidate
    /// set; every candidate is valued against that one state. Random
    /// exploration only happens in training mode; otherwise the
    /// maximal-value developers are found and ties are broken uniformly
    /// at random.
    pub fn recommend(
        &mut self,
        ticket: &Ticket,
        developers: &[Developer],
        training: bool,
    ) -> Option<DeveloperId> {
        let available: Vec<&Developer> = developers
            .iter()
            .filter(|dev| dev.has_capacity_for(ticket.estimated_hours))
            .collect();

        let first = available.first()?;
        let state = self.state_for(ticket, first);

        if training && self.rng.gen::<f64>() < self.exploration_rate {
            return available.choose(&mut self.rng).map(|dev| dev.id);
        }

        let max_q = available
            .iter()
            .map(|dev| self.q_table.value(&state, dev.id))
            .fold(f64::NEG_INFINITY, f64::max);
        let best: Vec<DeveloperId> = available
            .iter()
            .filter(|dev| self.q_table.value(&state, dev.id) == max_q)
            .map(|dev| dev.id)
            .collect();

        best.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
#[path = "rl_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sprint-core: Shared library for the sprint planning engine
//!
//! This crate provides the ticket and developer data model, the scoring
//! and recommendation engines, the learned assignment model, duration
//! estimation, and workload optimization used by the sprint tooling.

pub mod analyze;
pub mod balance;
pub mod config;
pub mod developer;
pub mod error;
pub mod history;
pub mod montecarlo;
pub mod progress;
pub mod recommend;
pub mod retry;
pub mod rl;
pub mod score;
pub mod skills;
pub mod snapshot;
pub mod system;
pub mod ticket;
pub mod tracker;

pub use config::{EngineConfig, RetryConfig, RlConfig};
pub use developer::{Developer, DeveloperId};
pub use error::{Error, Result};
pub use history::{HistoricalSummary, PerformanceLog, PerformanceMetric};
pub use montecarlo::{DurationEstimate, MonteCarloEstimator, RiskLevel};
pub use recommend::{Recommendation, RecommendationMethod};
pub use system::{PriorityAdjustment, SprintSystem, SystemStatus};
pub use ticket::{Complexity, Priority, Status, Ticket, TicketDraft, TicketId};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Heuristic developer ranking for a ticket.
//!
//! Developers failing the availability gate are excluded outright rather
//! than scored low; an empty result is a normal outcome meaning the caller
//! must wait, add capacity, or escalate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::developer::{Developer, DeveloperId};
use crate::history::HistoricalSummary;
use crate::score::match_score;
use crate::ticket::Ticket;

/// Maximum entries returned by a ranking.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// How a recommendation was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMethod {
    /// Weighted heuristic scoring.
    Heuristic,
    /// Learned value-table pick.
    Rl,
}

impl RecommendationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMethod::Heuristic => "heuristic",
            RecommendationMethod::Rl => "rl",
        }
    }
}

/// One ranked developer for a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub developer_id: DeveloperId,
    pub developer_name: String,
    pub match_score: f64,
    /// The developer's historical summary, if any.
    pub skills_match: Option<HistoricalSummary>,
    pub method: RecommendationMethod,
}

/// Ranks developers for a ticket, top 3 by descending match score.
///
/// Ties keep the original developer order (the sort is stable).
pub fn recommend(
    ticket: &Ticket,
    developers: &[Developer],
    summaries: &HashMap<DeveloperId, HistoricalSummary>,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = developers
        .iter()
        .filter(|dev| dev.has_capacity_for(ticket.estimated_hours))
        .map(|dev| {
            let summary = summaries.get(&dev.id);
            Recommendation {
                developer_id: dev.id,
                developer_name: dev.name.clone(),
                match_score: match_score(ticket, dev, summary),
                skills_match: summary.cloned(),
                method: RecommendationMethod::Heuristic,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

#[cfg(test)]
#[path = "recommend_tests.rs"]
mod tests;

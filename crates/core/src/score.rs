// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Developer-ticket match scoring.
//!
//! The composite score blends four signals with fixed weights:
//! skill overlap 0.4, availability headroom 0.3, historical performance
//! 0.2, experience 0.1. The weights are part of the scoring contract and
//! must not drift.

use crate::developer::Developer;
use crate::history::HistoricalSummary;
use crate::skills::{extract_skills, skill_match};
use crate::ticket::Ticket;

pub const SKILL_WEIGHT: f64 = 0.4;
pub const AVAILABILITY_WEIGHT: f64 = 0.3;
pub const HISTORY_WEIGHT: f64 = 0.2;
pub const EXPERIENCE_WEIGHT: f64 = 0.1;

const VELOCITY_WEIGHT: f64 = 0.6;
const ACCURACY_WEIGHT: f64 = 0.3;
const SENTIMENT_WEIGHT: f64 = 0.1;

/// Skill overlap between a ticket's extracted tags and a developer.
pub fn ticket_skill_match(ticket: &Ticket, developer: &Developer) -> f64 {
    let required = extract_skills(&ticket.text());
    skill_match(&required, &developer.skills)
}

/// Piecewise availability score on the developer's workload ratio.
pub fn availability_score(developer: &Developer) -> f64 {
    let ratio = developer.workload_ratio();
    if ratio >= 1.0 {
        0.1
    } else if ratio >= 0.8 {
        0.3
    } else if ratio >= 0.5 {
        0.7
    } else {
        1.0
    }
}

/// Weighted historical performance, neutral 0.5 with no history.
///
/// Velocity enters unnormalized (mean hours, routinely above 1.0) even
/// though the other terms are 0-1 scores. Kept for behavior parity with
/// the historical scoring contract.
pub fn historical_score(summary: Option<&HistoricalSummary>) -> f64 {
    match summary {
        None => 0.5,
        Some(s) => {
            s.velocity * VELOCITY_WEIGHT
                + s.accuracy * ACCURACY_WEIGHT
                + s.sentiment * SENTIMENT_WEIGHT
        }
    }
}

/// Composite 0-1 match score for a (ticket, developer) pair.
pub fn match_score(
    ticket: &Ticket,
    developer: &Developer,
    summary: Option<&HistoricalSummary>,
) -> f64 {
    let skill = ticket_skill_match(ticket, developer);
    let availability = availability_score(developer);
    let history = historical_score(summary);
    let experience = f64::from(developer.experience_level) / 5.0;

    skill * SKILL_WEIGHT
        + availability * AVAILABILITY_WEIGHT
        + history * HISTORY_WEIGHT
        + experience * EXPERIENCE_WEIGHT
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text analysis collaborator interface.
//!
//! The core consumes entity extraction and complexity estimation as black
//! boxes when a ticket is created from a feature story. [`KeywordAnalyzer`]
//! is the in-crate keyword/regex implementation; model-backed analyzers
//! live outside the crate behind the same trait.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ticket::{Complexity, Priority};

/// Hints extracted from free text, feeding ticket creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityHints {
    /// Priorities implied by the text, most salient first. Never empty
    /// after extraction; defaults to medium.
    pub priorities: Vec<Priority>,
    /// Free-text dependency phrases ("blocked by the billing migration").
    pub dependencies: Vec<String>,
    /// Free-text deadline phrases ("due March 3, 2026").
    pub deadlines: Vec<String>,
}

/// Text analysis consumed at ticket creation.
pub trait TextAnalyzer {
    /// Extracts priority, dependency, and deadline hints from text.
    fn extract_entities(&self, text: &str) -> EntityHints;

    /// Estimates complexity on the 1-5 scale from text.
    fn estimate_complexity(&self, text: &str) -> Complexity;
}

const PRIORITY_KEYWORDS: &[(Priority, &[&str])] = &[
    (Priority::High, &["high", "critical", "urgent", "asap", "immediately", "important"]),
    (Priority::Medium, &["medium", "normal", "regular", "standard"]),
    (Priority::Low, &["low", "minor", "optional", "later", "nice-to-have"]),
];

const COMPLEXITY_HIGH: &[&str] = &[
    "complex", "complicated", "difficult", "challenging", "advanced", "multiple", "integrate",
    "scalable", "distributed", "enterprise",
];
const COMPLEXITY_MEDIUM: &[&str] = &["moderate", "several", "some", "few", "update", "improve"];
const COMPLEXITY_LOW: &[&str] =
    &["simple", "basic", "easy", "straightforward", "single", "minor"];

const DEPENDENCY_PATTERNS: &[&str] = &[
    r"dependenc(?:y|ies)\s*[:\-]?\s*([^\n\r]+)",
    r"requires?\s+([^\n\r]+)",
    r"after\s+([^\n\r]+)",
    r"blocked\s+by\s+([^\n\r]+)",
];

const DEADLINE_PATTERNS: &[&str] = &[
    r"deadline\s*[:\-]?\s*([^\n\r]+)",
    r"due\s*[:\-]?\s*([^\n\r]+)",
    r"by\s+([a-z]+\s+\d{1,2},?\s+\d{4})",
    r"before\s+([^\n\r]+)",
];

/// Keyword and regex based analyzer.
pub struct KeywordAnalyzer {
    dependency_patterns: Vec<Regex>,
    deadline_patterns: Vec<Regex>,
}

impl KeywordAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(KeywordAnalyzer {
            dependency_patterns: compile(DEPENDENCY_PATTERNS)?,
            deadline_patterns: compile(DEADLINE_PATTERNS)?,
        })
    }
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| Ok(Regex::new(p)?)).collect()
}

fn captures(patterns: &[Regex], text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                out.push(m.as_str().trim().to_string());
            }
        }
    }
    out
}

impl TextAnalyzer for KeywordAnalyzer {
    fn extract_entities(&self, text: &str) -> EntityHints {
        let lower = text.to_lowercase();

        let mut priorities: Vec<Priority> = PRIORITY_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(priority, _)| *priority)
            .collect();
        if priorities.is_empty() {
            priorities.push(Priority::Medium);
        }

        EntityHints {
            priorities,
            dependencies: captures(&self.dependency_patterns, &lower),
            deadlines: captures(&self.deadline_patterns, &lower),
        }
    }

    /// Counts weighted complexity keywords (high 3, medium 2, low 1),
    /// maps the score to 1-5, then nudges by text length: over 500
    /// characters adds a level, under 100 removes one.
    fn estimate_complexity(&self, text: &str) -> Complexity {
        let lower = text.to_lowercase();

        let count = |keywords: &[&str]| keywords.iter().filter(|k| lower.contains(*k)).count();
        let score =
            count(COMPLEXITY_HIGH) * 3 + count(COMPLEXITY_MEDIUM) * 2 + count(COMPLEXITY_LOW);

        let mut level = (score / 2 + 1).clamp(1, 5) as u8;
        if text.len() > 500 {
            level = (level + 1).min(Complexity::MAX);
        } else if text.len() < 100 {
            level = (level - 1).max(Complexity::MIN);
        }

        // level is clamped to 1..=5 above, so construction cannot fail
        Complexity::new(level).unwrap_or_default()
    }
}

/// Keyword sentiment in [0, 1] for completion feedback, 0.5 neutral.
pub fn sentiment(text: &str) -> f64 {
    const POSITIVE: &[&str] =
        &["good", "great", "excellent", "completed", "success", "working", "fixed"];
    const NEGATIVE: &[&str] =
        &["issue", "problem", "error", "bug", "failed", "broken", "blocked"];

    let lower = text.to_lowercase();
    let positive = POSITIVE.iter().filter(|w| lower.contains(*w)).count() as i64;
    let negative = NEGATIVE.iter().filter(|w| lower.contains(*w)).count() as i64;

    if positive > negative {
        (0.5 + (positive - negative) as f64 * 0.1).min(0.9)
    } else if negative > positive {
        (0.5 - (negative - positive) as f64 * 0.1).max(0.1)
    } else {
        0.5
    }
}

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod tests;

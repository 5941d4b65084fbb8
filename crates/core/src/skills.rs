// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Skill tag extraction and overlap scoring.
//!
//! Required skills are derived from ticket text by case-insensitive keyword
//! matching against a fixed vocabulary. The overlap score between required
//! tags and a developer's tags is the basis of every scorer in the crate.

use std::collections::BTreeSet;

/// Fixed vocabulary: skill tag and the keywords that imply it.
pub const SKILL_VOCABULARY: &[(&str, &[&str])] = &[
    ("auth", &["auth", "login"]),
    ("database", &["database", "sql"]),
    ("api", &["api", "endpoint"]),
    ("frontend", &["frontend", "ui", "react"]),
    ("backend", &["backend", "server"]),
];

/// Score for an exact tag match.
pub const EXACT_MATCH_WEIGHT: f64 = 1.0;
/// Score for a related (substring) tag match.
pub const RELATED_MATCH_WEIGHT: f64 = 0.7;

/// Derives required skill tags from free text.
///
/// Matching is case-insensitive substring search; each tag appears at most
/// once, in vocabulary order. Always succeeds, possibly with an empty set.
pub fn extract_skills(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Overlap score in [0, 1] between required tags and a developer's tags.
///
/// With no required skills the score is a neutral 0.5. Each required skill
/// awards 1.0 for an exact match, else 0.7 for the first related match
/// (either tag containing the other as a substring). The sum is averaged
/// over the required skills and capped at 1.0.
pub fn skill_match(required: &[&str], developer_skills: &BTreeSet<String>) -> f64 {
    if required.is_empty() {
        return 0.5;
    }

    let mut total = 0.0;
    for skill in required {
        if developer_skills.contains(*skill) {
            total += EXACT_MATCH_WEIGHT;
        } else if developer_skills
            .iter()
            .any(|dev_skill| dev_skill.contains(skill) || skill.contains(dev_skill.as_str()))
        {
            total += RELATED_MATCH_WEIGHT;
        }
    }

    (total / required.len() as f64).min(1.0)
}

#[cfg(test)]
#[path = "skills_tests.rs"]
mod tests;

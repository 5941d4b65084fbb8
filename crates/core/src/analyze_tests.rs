// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn analyzer() -> KeywordAnalyzer {
    KeywordAnalyzer::new().unwrap()
}

#[parameterized(
    urgent = { "this is urgent, ship asap", Priority::High },
    standard = { "standard cleanup work", Priority::Medium },
    minor = { "minor cosmetic tweak, optional", Priority::Low },
)]
fn priority_keywords_are_detected(text: &str, expected: Priority) {
    let hints = analyzer().extract_entities(text);
    assert!(hints.priorities.contains(&expected));
}

#[test]
fn no_priority_keyword_defaults_to_medium() {
    let hints = analyzer().extract_entities("refactor the parser");
    assert_eq!(hints.priorities, vec![Priority::Medium]);
}

#[test]
fn dependencies_are_captured() {
    let hints = analyzer().extract_entities("Blocked by the billing migration");
    assert_eq!(hints.dependencies.len(), 1);
    assert!(hints.dependencies[0].contains("billing migration"));
}

#[test]
fn requires_phrase_is_a_dependency() {
    let hints = analyzer().extract_entities("requires schema v2 rollout");
    assert!(!hints.dependencies.is_empty());
}

#[test]
fn deadlines_are_captured() {
    let hints = analyzer().extract_entities("deadline: end of the sprint");
    assert!(!hints.deadlines.is_empty());
    assert!(hints.deadlines[0].contains("end of the sprint"));
}

#[test]
fn dated_deadline_is_captured() {
    let hints = analyzer().extract_entities("must land by March 3, 2026");
    assert!(hints.deadlines.iter().any(|d| d.contains("2026")));
}

#[test]
fn plain_text_has_no_extracted_entities() {
    let hints = analyzer().extract_entities("improve logging in the worker");
    assert!(hints.dependencies.is_empty());
    assert!(hints.deadlines.is_empty());
}

#[parameterized(
    plain_short = { "write docs", 1 },
    low_keyword = { "a simple, basic, straightforward single change", 2 },
    high_keywords = {
        "integrate the distributed enterprise system with multiple scalable services and keep the complex, complicated deployment working across the challenging advanced setup so everything holds together",
        5
    },
)]
fn complexity_from_keywords(text: &str, expected: u8) {
    assert_eq!(analyzer().estimate_complexity(text).level(), expected);
}

#[test]
fn short_text_lowers_complexity() {
    // "update" alone scores 2, mapping to level 2, minus one for brevity
    assert_eq!(analyzer().estimate_complexity("update the readme").level(), 1);
}

#[test]
fn long_text_raises_complexity() {
    let text = "plain words ".repeat(50);
    assert!(text.len() > 500);
    assert_eq!(analyzer().estimate_complexity(&text).level(), 2);
}

#[parameterized(
    positive = { "great work, fixed and working", 0.8 },
    negative = { "broken build, error everywhere", 0.3 },
    neutral = { "status update for the week", 0.5 },
    mixed_even = { "good fix but a new bug", 0.5 },
)]
fn sentiment_keyword_counts(text: &str, expected: f64) {
    assert!((sentiment(text) - expected).abs() < 1e-9);
}

#[test]
fn sentiment_is_clamped() {
    let glowing = "good great excellent completed success working fixed";
    assert!((sentiment(glowing) - 0.9).abs() < 1e-9);
    let dire = "issue problem error bug failed broken blocked";
    assert!((sentiment(dire) - 0.1).abs() < 1e-9);
}

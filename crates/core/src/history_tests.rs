// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

fn log_with(entries: &[(DeveloperId, TicketId, f64, u32, f64)]) -> PerformanceLog {
    let mut log = PerformanceLog::new();
    for &(dev, ticket, time, revisions, sentiment) in entries {
        log.record(dev, ticket, time, revisions, sentiment);
    }
    log
}

#[test]
fn record_appends_in_order() {
    let log = log_with(&[(1, 10, 5.0, 0, 0.8), (1, 11, 7.0, 1, 0.6)]);
    assert_eq!(log.len(), 2);
    assert_eq!(log.metrics()[0].ticket_id, 10);
    assert_eq!(log.metrics()[1].ticket_id, 11);
}

#[test]
fn record_returns_the_stored_metric() {
    let mut log = PerformanceLog::new();
    let metric = log.record(3, 20, 4.5, 2, 0.9);
    assert_eq!(metric.developer_id, 3);
    assert_eq!(metric.ticket_id, 20);
    assert_eq!(metric.revisions, 2);
}

#[test]
fn velocity_is_mean_completion_time() {
    let log = log_with(&[(1, 10, 4.0, 0, 0.5), (1, 11, 8.0, 0, 0.5)]);
    assert!((log.velocity(1) - 6.0).abs() < 1e-9);
}

#[test]
fn velocity_without_history_is_zero() {
    let log = PerformanceLog::new();
    assert_eq!(log.velocity(1), 0.0);
}

#[test]
fn accuracy_decays_with_total_revisions() {
    // 5 revisions total: 1 / (1 + 0.5) = 2/3
    let log = log_with(&[(1, 10, 4.0, 2, 0.5), (1, 11, 8.0, 3, 0.5)]);
    assert!((log.accuracy(1) - 1.0 / 1.5).abs() < 1e-9);
}

#[test]
fn accuracy_with_no_revisions_is_one() {
    let log = log_with(&[(1, 10, 4.0, 0, 0.5)]);
    assert!((log.accuracy(1) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn accuracy_without_history_is_zero() {
    let log = PerformanceLog::new();
    assert_eq!(log.accuracy(1), 0.0);
}

#[test]
fn metrics_for_filters_by_developer() {
    let log = log_with(&[(1, 10, 4.0, 0, 0.5), (2, 11, 8.0, 0, 0.5), (1, 12, 2.0, 0, 0.5)]);
    let mine = log.metrics_for(1);
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|m| m.developer_id == 1));
}

#[test]
fn summaries_cover_only_developers_with_history() {
    let log = log_with(&[(1, 10, 4.0, 1, 0.8), (1, 11, 6.0, 0, 0.6), (2, 12, 3.0, 0, 0.9)]);
    let summaries = log.summaries();
    assert_eq!(summaries.len(), 2);
    assert!(!summaries.contains_key(&3));

    let one = &summaries[&1];
    assert!((one.velocity - 5.0).abs() < 1e-9);
    assert!((one.accuracy - 1.0 / 1.1).abs() < 1e-9);
    assert!((one.sentiment - 0.7).abs() < 1e-9);
    assert_eq!(one.tickets_completed, 2);
}

#[test]
fn summaries_empty_log_is_empty() {
    assert!(PerformanceLog::new().summaries().is_empty());
}

#[test]
fn remap_ticket_ids_rewrites_known_ids() {
    let mut log = log_with(&[(1, 10, 4.0, 0, 0.5), (2, 20, 3.0, 0, 0.5)]);
    let mapping: HashMap<TicketId, TicketId> = [(10, 1)].into();
    log.remap_ticket_ids(&mapping);
    assert_eq!(log.metrics()[0].ticket_id, 1);
    // unmapped ids are left untouched
    assert_eq!(log.metrics()[1].ticket_id, 20);
}

#[test]
fn from_metrics_round_trip() {
    let log = log_with(&[(1, 10, 4.0, 0, 0.5)]);
    let rebuilt = PerformanceLog::from_metrics(log.metrics().to_vec());
    assert_eq!(rebuilt.len(), 1);
    assert!((rebuilt.velocity(1) - 4.0).abs() < 1e-9);
}

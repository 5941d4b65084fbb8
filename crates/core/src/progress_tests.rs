// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::ticket::{Complexity, Priority};

fn ticket(id: TicketId, status: Status, assigned: Option<DeveloperId>) -> Ticket {
    let mut t = Ticket::new(
        id,
        "server work",
        "",
        Priority::Medium,
        Complexity::default(),
        8.0,
    )
    .unwrap();
    t.status = status;
    t.assigned_to = assigned;
    t
}

fn dev(id: DeveloperId, name: &str, availability: f64, workload: f64) -> Developer {
    let mut d = Developer::new(id, name, ["backend"], availability, 3).unwrap();
    d.current_workload = workload;
    d
}

#[test]
fn summary_counts_by_status() {
    let tickets = vec![
        ticket(1, Status::Completed, Some(1)),
        ticket(2, Status::Completed, Some(1)),
        ticket(3, Status::InProgress, Some(1)),
        ticket(4, Status::Backlog, None),
    ];
    let report = report(&tickets, &[], &HashMap::new());
    assert_eq!(report.summary.total_tickets, 4);
    assert_eq!(report.summary.completed_tickets, 2);
    assert_eq!(report.summary.in_progress_tickets, 1);
    assert_eq!(report.summary.backlog_tickets, 1);
    assert!((report.summary.completion_rate - 0.5).abs() < 1e-9);
}

#[test]
fn empty_working_set_reports_zero_rate() {
    let r = report(&[], &[], &HashMap::new());
    assert_eq!(r.summary.completion_rate, 0.0);
    assert!(r.bottlenecks.is_empty());
    assert!(r.slow_tasks.is_empty());
}

#[test]
fn overloaded_developer_is_a_bottleneck() {
    // exactly at the 0.8 threshold counts
    let developers = vec![dev(1, "Alice", 40.0, 32.0), dev(2, "Bob", 40.0, 20.0)];
    let tickets = vec![ticket(1, Status::InProgress, Some(1))];
    let r = report(&tickets, &developers, &HashMap::new());

    assert_eq!(r.bottlenecks.len(), 1);
    match &r.bottlenecks[0] {
        Bottleneck::Developer { developer_id, affected_tickets, severity, .. } => {
            assert_eq!(*developer_id, 1);
            assert_eq!(*affected_tickets, 1);
            assert_eq!(*severity, Severity::Medium);
        }
        other => panic!("expected developer bottleneck, got {other:?}"),
    }
}

#[test]
fn severely_overloaded_developer_is_high_severity() {
    let developers = vec![dev(1, "Alice", 40.0, 38.0)];
    let r = report(&[], &developers, &HashMap::new());
    match &r.bottlenecks[0] {
        Bottleneck::Developer { severity, .. } => assert_eq!(*severity, Severity::High),
        other => panic!("expected developer bottleneck, got {other:?}"),
    }
}

#[test]
fn heavily_depended_on_backlog_ticket_is_a_bottleneck() {
    let mut blocker = ticket(1, Status::Backlog, None);
    blocker.title = "schema redesign".into();
    let mut tickets = vec![blocker];
    for id in 2..=4 {
        let mut t = ticket(id, Status::Backlog, None);
        t.dependencies.insert(1);
        tickets.push(t);
    }
    let r = report(&tickets, &[], &HashMap::new());

    let task = r
        .bottlenecks
        .iter()
        .find(|b| matches!(b, Bottleneck::Task { .. }))
        .unwrap();
    match task {
        Bottleneck::Task { ticket_id, dependents, .. } => {
            assert_eq!(*ticket_id, 1);
            assert_eq!(*dependents, 3);
        }
        _ => unreachable!(),
    }
}

#[test]
fn two_dependents_is_not_a_bottleneck() {
    let mut tickets = vec![ticket(1, Status::Backlog, None)];
    for id in 2..=3 {
        let mut t = ticket(id, Status::Backlog, None);
        t.dependencies.insert(1);
        tickets.push(t);
    }
    let r = report(&tickets, &[], &HashMap::new());
    assert!(r.bottlenecks.is_empty());
}

#[test]
fn slow_task_needs_recorded_time_past_threshold() {
    let mut slow = ticket(1, Status::InProgress, Some(1));
    slow.completion_time = Some(13.0); // 8h estimate, 1.5x is 12h

    let mut on_track = ticket(2, Status::InProgress, Some(1));
    on_track.completion_time = Some(11.0);

    let no_time = ticket(3, Status::InProgress, Some(1));

    let r = report(&[slow, on_track, no_time], &[], &HashMap::new());
    assert_eq!(r.slow_tasks.len(), 1);
    assert_eq!(r.slow_tasks[0].ticket_id, 1);
    assert!((r.slow_tasks[0].overrun_ratio - 13.0 / 8.0).abs() < 1e-9);
}

#[test]
fn insights_flag_low_completion_rate() {
    let tickets = vec![ticket(1, Status::Backlog, None), ticket(2, Status::Backlog, None)];
    let r = report(&tickets, &[], &HashMap::new());
    assert!(r
        .insights
        .iter()
        .any(|i| i.kind == InsightKind::Warning && i.message.contains("Low completion rate")));
}

#[test]
fn insights_praise_high_completion_rate() {
    let tickets = vec![ticket(1, Status::Completed, Some(1)); 5];
    let r = report(&tickets, &[], &HashMap::new());
    assert!(r.insights.iter().any(|i| i.kind == InsightKind::Success));
}

#[test]
fn insights_flag_uneven_utilization() {
    let developers = vec![dev(1, "Alice", 40.0, 30.0), dev(2, "Bob", 40.0, 0.0)];
    let r = report(&[], &developers, &HashMap::new());
    assert!(r
        .insights
        .iter()
        .any(|i| i.message.contains("Uneven workload distribution")));
}

#[test]
fn developer_metrics_use_summaries() {
    let developers = vec![dev(1, "Alice", 40.0, 10.0)];
    let summaries: HashMap<DeveloperId, HistoricalSummary> = [(
        1,
        HistoricalSummary {
            velocity: 6.0,
            accuracy: 0.9,
            sentiment: 0.7,
            tickets_completed: 3,
        },
    )]
    .into();
    let tickets = vec![ticket(1, Status::Completed, Some(1)), ticket(2, Status::InProgress, Some(1))];
    let r = report(&tickets, &developers, &summaries);

    let m = &r.developer_metrics[0];
    assert_eq!(m.total_tickets, 2);
    assert_eq!(m.completed_tickets, 1);
    assert!((m.avg_completion_time - 6.0).abs() < 1e-9);
    assert!((m.accuracy - 0.9).abs() < 1e-9);
}

#[test]
fn metrics_aggregate_the_working_set() {
    let mut done = ticket(1, Status::Completed, Some(1));
    done.completion_time = Some(6.0);
    let tickets = vec![done, ticket(2, Status::InProgress, Some(1)), ticket(3, Status::Backlog, None)];
    let developers = vec![dev(1, "Alice", 40.0, 8.0), dev(2, "Bob", 40.0, 12.0)];

    let m = metrics(&tickets, &developers);
    assert_eq!(m.total_tickets, 3);
    assert_eq!(m.completed_tickets, 1);
    assert!((m.completion_rate - 1.0 / 3.0).abs() < 1e-9);
    assert!((m.utilization_rate - 20.0 / 80.0).abs() < 1e-9);
    assert!((m.avg_completion_time - 6.0).abs() < 1e-9);
}

#[test]
fn metrics_empty_working_set() {
    let m = metrics(&[], &[]);
    assert_eq!(m.completion_rate, 0.0);
    assert_eq!(m.utilization_rate, 0.0);
    assert_eq!(m.avg_completion_time, 0.0);
}

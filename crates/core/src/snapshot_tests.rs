// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::ticket::{Complexity, Priority, Ticket};

fn snapshot() -> Snapshot {
    let ticket = Ticket::new(
        1,
        "Fix login",
        "auth is broken",
        Priority::High,
        Complexity::default(),
        8.0,
    )
    .unwrap();
    let developer = Developer::new(1, "Alice", ["auth"], 40.0, 3).unwrap();
    Snapshot {
        developers: vec![developer],
        tickets: vec![ticket],
        metrics: Vec::new(),
    }
}

#[test]
fn empty_store_loads_none() {
    let mut store = MemoryStore::new();
    assert!(store.load().unwrap().is_none());
    assert_eq!(store.saves(), 0);
}

#[test]
fn save_then_load_round_trips() {
    let mut store = MemoryStore::new();
    store.save(&snapshot()).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.tickets.len(), 1);
    assert_eq!(loaded.tickets[0].id, 1);
    assert_eq!(loaded.developers[0].name, "Alice");
    assert_eq!(store.saves(), 1);
}

#[test]
fn save_replaces_the_previous_snapshot() {
    let mut store = MemoryStore::new();
    store.save(&snapshot()).unwrap();

    let mut next = snapshot();
    next.tickets.clear();
    store.save(&next).unwrap();

    assert!(store.last().unwrap().tickets.is_empty());
    assert_eq!(store.saves(), 2);
}

#[test]
fn seeded_store_loads_its_snapshot() {
    let mut store = MemoryStore::with_snapshot(snapshot());
    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.developers.len(), 1);
}

#[test]
fn snapshot_serde_round_trip() {
    let json = serde_json::to_string(&snapshot()).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tickets[0].title, "Fix login");
    assert_eq!(back.developers[0].id, 1);
}
